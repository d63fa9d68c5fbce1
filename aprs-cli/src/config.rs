//! CLI-specific configuration: a single flat TOML document per invocation
//! (§4.10 — no multi-file `include`/merge machinery).

use aprs_core::{OutputFormat, PipelineConfig};
use color_eyre::eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete CLI configuration: addressing, payload, output, and pipeline
/// parameter overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Source station callsign (required).
    pub callsign: String,
    /// Source SSID, `0` if omitted.
    #[serde(default)]
    pub ssid: u8,
    /// Destination callsign, conventionally `"APRS"`.
    #[serde(default = "default_destination")]
    pub destination: String,
    #[serde(default)]
    pub destination_ssid: u8,
    /// Comma-separated digipeater path, e.g. `"WIDE1-1,WIDE2-1"`.
    #[serde(default)]
    pub path: String,
    /// Information-field payload text.
    #[serde(default)]
    pub message: String,
    /// Output file path; omit to write to stdout.
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Pipeline parameter overrides; any field omitted keeps its default.
    #[serde(default)]
    pub pipeline: PipelineOverrides,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_destination() -> String {
    "APRS".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            callsign: String::new(),
            ssid: 0,
            destination: default_destination(),
            destination_ssid: 0,
            path: String::new(),
            message: String::new(),
            output: None,
            pipeline: PipelineOverrides::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from a single TOML file. Fields absent from the
    /// file fall back to `Default::default()`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file: {}", path.display()))?;
        let config: CliConfig =
            toml::from_str(&content).wrap_err("failed to parse TOML configuration")?;
        Ok(config)
    }

    /// Builds the `PipelineConfig` this run should use, applying overrides
    /// on top of the spec defaults.
    pub fn pipeline_config(&self) -> PipelineConfig {
        let mut cfg = PipelineConfig::default();
        let o = &self.pipeline;
        if let Some(v) = o.mark_hz {
            cfg.mark_hz = v;
        }
        if let Some(v) = o.space_hz {
            cfg.space_hz = v;
        }
        if let Some(v) = o.baud {
            cfg.baud = v;
        }
        if let Some(v) = o.audio_sample_rate {
            cfg.audio_sample_rate = v;
        }
        if let Some(v) = o.fm_deviation_hz {
            cfg.fm_deviation_hz = v;
        }
        if let Some(v) = o.interpolation_factor {
            cfg.interpolation_factor = v;
        }
        if let Some(v) = o.output_format {
            cfg.output_format = v;
        }
        if let Some(v) = o.preamble_flags {
            cfg.preamble_flags = v;
        }
        if let Some(v) = o.trailer_flags {
            cfg.trailer_flags = v;
        }
        if let Some(v) = o.mark_is_nrzi_one {
            cfg.mark_is_nrzi_one = v;
        }
        cfg
    }
}

/// Optional overrides layered onto `PipelineConfig::default()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineOverrides {
    pub mark_hz: Option<f64>,
    pub space_hz: Option<f64>,
    pub baud: Option<f64>,
    pub audio_sample_rate: Option<f64>,
    pub fm_deviation_hz: Option<f64>,
    pub interpolation_factor: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub preamble_flags: Option<u8>,
    pub trailer_flags: Option<u8>,
    pub mark_is_nrzi_one: Option<bool>,
}

/// Logging output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_target")]
    pub target: LogTarget,
    #[serde(default)]
    pub file_path: Option<PathBuf>,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default = "default_log_level")]
    pub level: LogLevel,
}

fn default_log_target() -> LogTarget {
    LogTarget::Stderr
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            target: default_log_target(),
            file_path: None,
            format: default_log_format(),
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    Stdout,
    Stderr,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Logfmt,
    Pretty,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_toml() {
        let toml_str = r#"
            callsign = "N0CALL"
            message = "Hello"
        "#;
        let cfg: CliConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.callsign, "N0CALL");
        assert_eq!(cfg.destination, "APRS");
        assert_eq!(cfg.message, "Hello");
    }

    #[test]
    fn pipeline_overrides_apply_on_top_of_defaults() {
        let toml_str = r#"
            callsign = "N0CALL"

            [pipeline]
            preamble_flags = 8
        "#;
        let cfg: CliConfig = toml::from_str(toml_str).unwrap();
        let pipeline = cfg.pipeline_config();
        assert_eq!(pipeline.preamble_flags, 8);
        assert_eq!(pipeline.trailer_flags, 2);
        assert_eq!(pipeline.mark_hz, 1200.0);
    }
}
