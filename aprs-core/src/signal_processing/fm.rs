//! Narrowband FM modulator (§4.5).
//!
//! Integrates real-valued audio into instantaneous phase and emits complex
//! baseband `exp(i*psi[n])`. Phase is carried across streaming buffer
//! boundaries within one frame (§4.5 Contract, §5 no cross-frame state).

use num_complex::Complex64;
use std::f64::consts::TAU;

pub struct FmModulator {
    /// Sensitivity `k = 2*pi*deviation_hz / sample_rate`.
    sensitivity: f64,
    phase: f64,
}

impl FmModulator {
    pub fn new(deviation_hz: f64, sample_rate: f64) -> Self {
        Self {
            sensitivity: TAU * deviation_hz / sample_rate,
            phase: 0.0,
        }
    }

    /// Modulates one buffer of audio samples, carrying the phase
    /// accumulator forward for the next call.
    pub fn modulate(&mut self, audio: &[f32]) -> Vec<Complex64> {
        let mut out = Vec::with_capacity(audio.len());
        for &x in audio {
            self.phase += self.sensitivity * x as f64;
            out.push(Complex64::new(self.phase.cos(), self.phase.sin()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_unit_magnitude() {
        let mut fm = FmModulator::new(5_000.0, 48_000.0);
        let audio: Vec<f32> = (0..100).map(|i| (i as f32 * 0.1).sin()).collect();
        let out = fm.modulate(&audio);
        for c in out {
            assert!((c.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn phase_continuous_across_buffer_boundary() {
        let audio: Vec<f32> = (0..200).map(|i| (i as f32 * 0.05).sin()).collect();

        let mut whole = FmModulator::new(5_000.0, 48_000.0);
        let out_whole = whole.modulate(&audio);

        let mut split = FmModulator::new(5_000.0, 48_000.0);
        let mut out_split = split.modulate(&audio[..100]);
        out_split.extend(split.modulate(&audio[100..]));

        for (a, b) in out_whole.iter().zip(out_split.iter()) {
            assert!((a - b).norm() < 1e-9);
        }
    }

    #[test]
    fn phase_step_bounded_by_sensitivity_times_max_amplitude() {
        // Property 5 (FM half): |arg(s[n+1] * conj(s[n]))| <= k * max|x|.
        let deviation = 5_000.0;
        let sample_rate = 48_000.0;
        let k = TAU * deviation / sample_rate;

        let audio: Vec<f32> = (0..500).map(|i| (i as f32 * 0.02).sin()).collect();
        let max_amp = audio.iter().fold(0.0f32, |m, &v| m.max(v.abs())) as f64;

        let mut fm = FmModulator::new(deviation, sample_rate);
        let out = fm.modulate(&audio);

        for window in out.windows(2) {
            let delta = (window[1] * window[0].conj()).arg().abs();
            assert!(delta <= k * max_amp + 1e-9);
        }
    }
}
