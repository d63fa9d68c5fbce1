//! Structured logging for the CLI front end: renders the events emitted by
//! a pipeline run to stdout/stderr/file in `json`, `logfmt`, or `pretty`
//! form (§4.11).

use crate::config::{LogFormat, LogTarget, LoggingConfig};
use aprs_core::logging::{LogConfig, LogLevel as CoreLogLevel, SignalLogger};
use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Structured log event types emitted around a `generate()` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    /// A frame was built for transmission.
    FrameBuilt(FrameBuiltEvent),

    /// A pipeline stage completed; carries the core logger's per-stage
    /// entries verbatim.
    PipelineStage(PipelineStageEvent),

    /// Output was written to the sink.
    SinkWritten(SinkWrittenEvent),

    Info { message: String },
    Warn { message: String },
    Error { message: String, details: Option<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameBuiltEvent {
    pub timestamp: DateTime<Utc>,
    pub src_callsign: String,
    pub dest_callsign: String,
    pub frame_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStageEvent {
    pub timestamp: DateTime<Utc>,
    pub subsystem: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SinkWrittenEvent {
    pub timestamp: DateTime<Utc>,
    pub destination: String,
    pub output_samples: usize,
    pub output_bytes: usize,
}

/// Logger that renders `LogEvent`s to the configured target/format.
pub struct StructuredLogger {
    config: LoggingConfig,
    writer: Box<dyn Write + Send>,
    start_time: DateTime<Utc>,
}

impl StructuredLogger {
    pub fn new(config: LoggingConfig) -> Result<Self> {
        let writer: Box<dyn Write + Send> = match &config.target {
            LogTarget::Stdout => Box::new(io::stdout()),
            LogTarget::Stderr => Box::new(io::stderr()),
            LogTarget::File => {
                let path = config
                    .file_path
                    .as_ref()
                    .ok_or_else(|| color_eyre::eyre::eyre!("file path required for file logging"))?;
                Box::new(BufWriter::new(File::create(path)?))
            }
        };

        Ok(Self {
            config,
            writer,
            start_time: Utc::now(),
        })
    }

    pub fn log(&mut self, event: LogEvent) -> Result<()> {
        let output = match self.config.format {
            LogFormat::Json => serde_json::to_string(&event)?,
            LogFormat::Logfmt => self.format_logfmt(&event),
            LogFormat::Pretty => self.format_pretty(&event),
        };
        writeln!(self.writer, "{output}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Drains a core `SignalLogger`'s collected entries into `PipelineStage`
    /// events, in order.
    pub fn log_core_entries(&mut self, logger: &SignalLogger) -> Result<()> {
        for entry in logger.entries() {
            self.log(LogEvent::PipelineStage(PipelineStageEvent {
                timestamp: Utc::now(),
                subsystem: entry.subsystem.to_string(),
                message: entry.message.clone(),
            }))?;
        }
        Ok(())
    }

    fn format_logfmt(&self, event: &LogEvent) -> String {
        let ts = Utc::now().to_rfc3339();
        match event {
            LogEvent::FrameBuilt(e) => format!(
                "ts=\"{ts}\" type=frame_built src=\"{}\" dest=\"{}\" frame_bytes={}",
                e.src_callsign, e.dest_callsign, e.frame_bytes
            ),
            LogEvent::PipelineStage(e) => format!(
                "ts=\"{ts}\" type=pipeline_stage subsystem={} msg=\"{}\"",
                e.subsystem, e.message
            ),
            LogEvent::SinkWritten(e) => format!(
                "ts=\"{ts}\" type=sink_written destination=\"{}\" samples={} bytes={}",
                e.destination, e.output_samples, e.output_bytes
            ),
            LogEvent::Info { message } => format!("ts=\"{ts}\" level=info msg=\"{message}\""),
            LogEvent::Warn { message } => format!("ts=\"{ts}\" level=warn msg=\"{message}\""),
            LogEvent::Error { message, details } => match details {
                Some(d) => format!("ts=\"{ts}\" level=error msg=\"{message}\" details=\"{d}\""),
                None => format!("ts=\"{ts}\" level=error msg=\"{message}\""),
            },
        }
    }

    fn format_pretty(&self, event: &LogEvent) -> String {
        let ts = Utc::now().format("%Y-%m-%d %H:%M:%S%.3f");
        match event {
            LogEvent::FrameBuilt(e) => format!(
                "[{ts}] FRAME: {} -> {} ({} bytes)",
                e.src_callsign, e.dest_callsign, e.frame_bytes
            ),
            LogEvent::PipelineStage(e) => format!("[{ts}] {}: {}", e.subsystem, e.message),
            LogEvent::SinkWritten(e) => format!(
                "[{ts}] SINK: wrote {} samples ({} bytes) to {}",
                e.output_samples, e.output_bytes, e.destination
            ),
            LogEvent::Info { message } => format!("[{ts}] INFO: {message}"),
            LogEvent::Warn { message } => format!("[{ts}] WARN: {message}"),
            LogEvent::Error { message, details } => match details {
                Some(d) => format!("[{ts}] ERROR: {message} | {d}"),
                None => format!("[{ts}] ERROR: {message}"),
            },
        }
    }

    pub fn elapsed(&self) -> f64 {
        (Utc::now() - self.start_time).num_milliseconds() as f64 / 1000.0
    }
}

/// Converts the CLI's logging level to the core crate's level, preserving
/// the subsystem toggles at their defaults.
pub fn to_core_log_config(level: &super::config::LogLevel) -> LogConfig {
    let level = match level {
        super::config::LogLevel::Debug => CoreLogLevel::Debug,
        super::config::LogLevel::Info => CoreLogLevel::Info,
        super::config::LogLevel::Warn => CoreLogLevel::Warn,
        super::config::LogLevel::Error => CoreLogLevel::Error,
    };
    LogConfig {
        level,
        ..Default::default()
    }
}
