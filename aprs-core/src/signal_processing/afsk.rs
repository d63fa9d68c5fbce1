//! Bell-202 AFSK tone synthesis (§4.4).
//!
//! Converts an NRZI-encoded bit stream into a phase-continuous audio
//! waveform: each input bit selects mark or space tone for one
//! `samples_per_symbol`-sample interval.

use std::f64::consts::TAU;

/// Phase-continuous Bell-202 AFSK synthesizer.
///
/// The phase accumulator is never reset between bits or between calls to
/// [`Self::synthesize`] within the same frame — discontinuities would
/// produce spectral splatter (§4.4 Algorithm).
pub struct AfskSynthesizer {
    mark_hz: f64,
    space_hz: f64,
    sample_rate: f64,
    samples_per_symbol: usize,
    /// `true` maps an NRZI-held (logical `1`) bit to mark; `false` inverts
    /// the mapping (`mark_is_nrzi_one` in `PipelineConfig`).
    mark_is_nrzi_one: bool,
    phase: f64,
}

impl AfskSynthesizer {
    pub fn new(
        mark_hz: f64,
        space_hz: f64,
        sample_rate: f64,
        samples_per_symbol: usize,
        mark_is_nrzi_one: bool,
    ) -> Self {
        Self {
            mark_hz,
            space_hz,
            sample_rate,
            samples_per_symbol,
            mark_is_nrzi_one,
            phase: 0.0,
        }
    }

    /// Synthesizes the full audio waveform for an NRZI bit stream.
    /// Output length is `nrzi_bits.len() * samples_per_symbol`.
    pub fn synthesize(&mut self, nrzi_bits: &[bool]) -> Vec<f32> {
        let mut out = Vec::with_capacity(nrzi_bits.len() * self.samples_per_symbol);
        for &bit in nrzi_bits {
            let is_mark = bit == self.mark_is_nrzi_one;
            let freq = if is_mark { self.mark_hz } else { self.space_hz };
            let increment = TAU * freq / self.sample_rate;
            for _ in 0..self.samples_per_symbol {
                self.phase += increment;
                if self.phase >= TAU {
                    self.phase -= TAU;
                } else if self.phase < 0.0 {
                    self.phase += TAU;
                }
                out.push(self.phase.sin() as f32);
            }
        }
        out
    }
}
