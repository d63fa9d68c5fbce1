//! Sample sink: the write-capability boundary described in `spec.md` §9
//! ("the pipeline takes a write-sink capability... as a parameter").

use num_complex::Complex64;

use crate::errors::SinkError;

/// A byte-oriented write capability. Implementors are provided for an
/// in-memory buffer and a buffered file; an SDR streaming adapter is out
/// of scope (§1, §9 "SDR driver decoupling").
pub trait SampleSink {
    fn write_samples(&mut self, bytes: &[u8]) -> Result<(), SinkError>;
}

impl SampleSink for Vec<u8> {
    fn write_samples(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Buffered-writer sink over any `std::io::Write`, covering file and
/// stdout/stderr destinations.
pub struct WriterSink<W: std::io::Write> {
    writer: std::io::BufWriter<W>,
}

impl<W: std::io::Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: std::io::BufWriter::new(writer),
        }
    }

    pub fn flush(&mut self) -> Result<(), SinkError> {
        std::io::Write::flush(&mut self.writer).map_err(SinkError::Io)
    }
}

impl<W: std::io::Write> SampleSink for WriterSink<W> {
    fn write_samples(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        self.writer.write_all(bytes).map_err(SinkError::Io)
    }
}

/// Quantizes and writes a buffer of complex baseband samples per §4.7.
pub fn write_iq_f32(sink: &mut dyn SampleSink, samples: &[Complex64]) -> Result<(), SinkError> {
    let mut bytes = Vec::with_capacity(samples.len() * 8);
    for s in samples {
        bytes.extend_from_slice(&(s.re as f32).to_le_bytes());
        bytes.extend_from_slice(&(s.im as f32).to_le_bytes());
    }
    sink.write_samples(&bytes)
}

/// `SCHAR_MAX` scale factor for `IQ_S8` quantization (§4.7).
const S8_SCALE: f64 = 127.0;

pub fn write_iq_s8(sink: &mut dyn SampleSink, samples: &[Complex64]) -> Result<(), SinkError> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for s in samples {
        bytes.push(quantize_s8(s.re));
        bytes.push(quantize_s8(s.im));
    }
    sink.write_samples(&bytes)
}

/// Multiplies by 127, rounds toward zero, and clamps to `[-128, 127]`.
fn quantize_s8(value: f64) -> u8 {
    let scaled = (value * S8_SCALE).trunc();
    let clamped = scaled.clamp(-128.0, 127.0);
    clamped as i8 as u8
}

pub fn write_pcm_f32(sink: &mut dyn SampleSink, audio: &[f32]) -> Result<(), SinkError> {
    let mut bytes = Vec::with_capacity(audio.len() * 4);
    for &s in audio {
        bytes.extend_from_slice(&s.to_le_bytes());
    }
    sink.write_samples(&bytes)
}
