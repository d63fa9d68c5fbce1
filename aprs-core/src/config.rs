//! Pipeline-wide configuration and output-format selection.

use serde::{Deserialize, Serialize};

/// Output sample format emitted by the sample sink (§3, §4.7, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Interleaved signed 8-bit I/Q, scaled by 127.
    #[default]
    IqS8,
    /// Interleaved little-endian float32 I/Q, pass-through.
    IqF32,
    /// Mono little-endian float32 PCM audio, pre-FM (bypasses FM + interpolator).
    PcmF32,
}

/// Parameters for the signal-generation pipeline (§4.1–§4.8).
///
/// Defaults match the worked values in `spec.md` §3/§4: Bell-202 AFSK
/// (1200 Hz mark, 2200 Hz space, 1200 baud) over 48 kHz audio, 5 kHz peak
/// FM deviation, ×50 polyphase interpolation to 2.4 Msps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Mark tone frequency in Hz.
    pub mark_hz: f64,
    /// Space tone frequency in Hz.
    pub space_hz: f64,
    /// Baud rate (bits/second) of the AFSK line signal.
    pub baud: f64,
    /// Audio sample rate in Hz (pre-interpolation).
    pub audio_sample_rate: f64,
    /// Peak FM deviation in Hz.
    pub fm_deviation_hz: f64,
    /// Polyphase interpolation factor (`L` in §4.6).
    pub interpolation_factor: usize,
    /// Output sample format.
    pub output_format: OutputFormat,
    /// Number of opening `0x7E` flag bytes to emit (≥ 1, default 6).
    pub preamble_flags: u8,
    /// Number of closing `0x7E` flag bytes to emit (≥ 1, default 2).
    pub trailer_flags: u8,
    /// NRZI-to-tone polarity: `true` means a held NRZI line level (logical
    /// `1` input bit) is transmitted as mark; `false` inverts the mapping.
    /// This is the "single named boolean" called out as an Open Question
    /// in `spec.md` §9.
    pub mark_is_nrzi_one: bool,
    /// Maximum information-payload length in bytes (§7 `OversizedInfo`).
    pub max_info_len: usize,
    /// Chunk size (audio samples) used when streaming FM + interpolation
    /// (§4.8 step 5).
    pub stream_chunk_samples: usize,
}

impl PipelineConfig {
    pub const MARK_HZ: f64 = 1200.0;
    pub const SPACE_HZ: f64 = 2200.0;
    pub const BAUD: f64 = 1200.0;
    pub const AUDIO_SAMPLE_RATE: f64 = 48_000.0;
    pub const FM_DEVIATION_HZ: f64 = 5_000.0;
    pub const INTERPOLATION_FACTOR: usize = 50;
    pub const MAX_INFO_LEN: usize = 256;
    pub const STREAM_CHUNK_SAMPLES: usize = 4096;

    /// Samples per audio symbol, `audio_sample_rate / baud` (§3).
    pub fn samples_per_symbol(&self) -> usize {
        (self.audio_sample_rate / self.baud).round() as usize
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mark_hz: Self::MARK_HZ,
            space_hz: Self::SPACE_HZ,
            baud: Self::BAUD,
            audio_sample_rate: Self::AUDIO_SAMPLE_RATE,
            fm_deviation_hz: Self::FM_DEVIATION_HZ,
            interpolation_factor: Self::INTERPOLATION_FACTOR,
            output_format: OutputFormat::default(),
            preamble_flags: 6,
            trailer_flags: 2,
            mark_is_nrzi_one: true,
            max_info_len: Self::MAX_INFO_LEN,
            stream_chunk_samples: Self::STREAM_CHUNK_SAMPLES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_constants() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.mark_hz, 1200.0);
        assert_eq!(cfg.space_hz, 2200.0);
        assert_eq!(cfg.baud, 1200.0);
        assert_eq!(cfg.audio_sample_rate, 48_000.0);
        assert_eq!(cfg.samples_per_symbol(), 40);
        assert_eq!(cfg.interpolation_factor, 50);
        assert_eq!(cfg.max_info_len, 256);
    }
}
