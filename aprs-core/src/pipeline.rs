//! Pipeline orchestrator (§4.8): composes frame building, bit
//! serialization/stuffing, NRZI encoding, AFSK synthesis, FM modulation,
//! polyphase interpolation, and sample-sink output into the single
//! invocation surface described in `spec.md` §6.

use num_complex::Complex64;

use crate::ax25::bitstream::{check_no_long_one_run, nrzi_encode, serialize_and_stuff};
use crate::ax25::frame::Frame;
use crate::config::{OutputFormat, PipelineConfig};
use crate::errors::{ConfigError, InvariantError};
use crate::logging::SignalLogger;
use crate::signal_processing::{AfskSynthesizer, FmModulator, PolyphaseInterpolator};
use crate::sink::{write_iq_f32, write_iq_s8, write_pcm_f32, SampleSink};
use crate::Result;

/// Bundles callsign/addressing, payload, and pipeline parameters for one
/// transmission (§6).
#[derive(Debug, Clone)]
pub struct TransmitRequest {
    pub src_callsign: String,
    pub src_ssid: u8,
    pub dest_callsign: String,
    pub dest_ssid: u8,
    /// Comma-separated `CALL[-SSID]` digipeater path, e.g. `"WIDE1-1,WIDE2-1"`.
    pub digi_path: String,
    pub info: Vec<u8>,
    pub config: PipelineConfig,
}

impl TransmitRequest {
    pub fn new(src_callsign: impl Into<String>, info: impl Into<Vec<u8>>) -> Self {
        Self {
            src_callsign: src_callsign.into(),
            src_ssid: 0,
            dest_callsign: "APRS".to_string(),
            dest_ssid: 0,
            digi_path: String::new(),
            info: info.into(),
            config: PipelineConfig::default(),
        }
    }
}

/// Summary of a completed `generate()` call, useful for logging/telemetry.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub frame_bytes: usize,
    pub stuffed_bits: usize,
    pub audio_samples: usize,
    pub output_samples: usize,
    pub output_bytes: usize,
}

/// Builds a frame, synthesizes its waveform, and writes it to `sink` in the
/// requested output format (§4.8).
pub fn generate(request: &TransmitRequest, sink: &mut dyn SampleSink) -> Result<GenerateReport> {
    let mut logger = SignalLogger::default();
    generate_with_logger(request, sink, &mut logger)
}

/// As [`generate`], but records stage-boundary events into the supplied
/// logger (§4.11; frame length, stuffed bit count, audio sample count,
/// interpolator chunk count).
pub fn generate_with_logger(
    request: &TransmitRequest,
    sink: &mut dyn SampleSink,
    logger: &mut SignalLogger,
) -> Result<GenerateReport> {
    let cfg = &request.config;

    if cfg.interpolation_factor == 0 {
        return Err(crate::errors::AprsError::Config(
            ConfigError::InterpolationFactorZero {
                value: cfg.interpolation_factor,
            },
        ));
    }

    // 1. Build frame bytes (§4.1).
    let frame = Frame::build(
        &request.src_callsign,
        request.src_ssid,
        &request.dest_callsign,
        request.dest_ssid,
        &request.digi_path,
        &request.info,
        cfg.max_info_len,
    )?;
    let frame_bytes = frame.to_bytes();
    logger.info("FRAME", format!("built {}-byte AX.25 UI frame", frame_bytes.len()));

    // 2. Expand to stuffed, flag-framed bits (§4.2) and verify the
    //    bit-stuff invariant (§7 InternalInvariantFailure).
    let stuffed = serialize_and_stuff(&frame_bytes, cfg.preamble_flags, cfg.trailer_flags);
    let preamble_bits = cfg.preamble_flags.max(1) as usize * 8;
    let trailer_bits = cfg.trailer_flags.max(1) as usize * 8;
    let body_end = stuffed.len().saturating_sub(trailer_bits);
    check_no_long_one_run(&stuffed[preamble_bits..body_end]).map_err(|e: InvariantError| {
        crate::errors::AprsError::Invariant(e)
    })?;
    logger.info("STUFF", format!("serialized to {} stuffed bits", stuffed.len()));

    // 3. NRZI-encode (§4.3).
    let nrzi_bits = nrzi_encode(&stuffed, true);
    logger.info("NRZI", format!("NRZI-encoded {} bits", nrzi_bits.len()));

    // 4. Synthesize AFSK audio for the whole frame into one buffer (§4.4,
    //    §9 "buffered vs. streaming" trade-off).
    let mut afsk = AfskSynthesizer::new(
        cfg.mark_hz,
        cfg.space_hz,
        cfg.audio_sample_rate,
        cfg.samples_per_symbol(),
        cfg.mark_is_nrzi_one,
    );
    let audio = afsk.synthesize(&nrzi_bits);
    logger.info("AFSK", format!("synthesized {} audio samples", audio.len()));

    let mut report = GenerateReport {
        frame_bytes: frame_bytes.len(),
        stuffed_bits: stuffed.len(),
        audio_samples: audio.len(),
        output_samples: 0,
        output_bytes: 0,
    };

    if cfg.output_format == OutputFormat::PcmF32 {
        write_pcm_f32(sink, &audio).map_err(crate::errors::AprsError::Sink)?;
        report.output_samples = audio.len();
        report.output_bytes = audio.len() * 4;
        logger.info("SINK", format!("wrote {} PCM_F32 bytes", report.output_bytes));
        return Ok(report);
    }

    // 5. Stream FM + interpolation in fixed-size chunks (§4.8 step 5). The
    //    interpolator's polyphase branches are purely causal (each output
    //    is a function of the current and past input samples only, with no
    //    look-ahead taps), so every input sample's `L` outputs are complete
    //    as soon as `process` returns them — there is no filter tail left
    //    to drain once the loop below has consumed all of `audio`.
    let mut fm = FmModulator::new(cfg.fm_deviation_hz, cfg.audio_sample_rate);
    let mut interpolator = PolyphaseInterpolator::new(cfg.interpolation_factor);
    let chunk_size = cfg.stream_chunk_samples.max(1);

    let mut chunks_streamed = 0usize;
    for chunk in audio.chunks(chunk_size) {
        let baseband = fm.modulate(chunk);
        let (interpolated, _consumed) = interpolator.process(&baseband);
        write_output_chunk(sink, cfg.output_format, &interpolated)?;
        report.output_samples += interpolated.len();
        chunks_streamed += 1;
    }

    report.output_bytes = match cfg.output_format {
        OutputFormat::IqS8 => report.output_samples * 2,
        OutputFormat::IqF32 => report.output_samples * 8,
        OutputFormat::PcmF32 => unreachable!("handled above"),
    };

    logger.info(
        "SINK",
        format!(
            "streamed {chunks_streamed} chunks, wrote {} output samples ({} bytes)",
            report.output_samples, report.output_bytes
        ),
    );

    Ok(report)
}

fn write_output_chunk(
    sink: &mut dyn SampleSink,
    format: OutputFormat,
    samples: &[Complex64],
) -> Result<()> {
    match format {
        OutputFormat::IqS8 => write_iq_s8(sink, samples).map_err(crate::errors::AprsError::Sink),
        OutputFormat::IqF32 => write_iq_f32(sink, samples).map_err(crate::errors::AprsError::Sink),
        OutputFormat::PcmF32 => unreachable!("PCM_F32 bypasses the interpolator"),
    }
}
