mod config;
mod logging;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use std::path::PathBuf;

use aprs_core::sink::WriterSink;
use aprs_core::{generate_with_logger, TransmitRequest};
use config::CliConfig;
use logging::{FrameBuiltEvent, LogEvent, SinkWrittenEvent, StructuredLogger};

#[derive(Parser, Debug)]
#[command(author, version, about = "AX.25/APRS Bell-202 AFSK signal generator", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source station callsign (overrides config).
    #[arg(long)]
    callsign: Option<String>,

    /// Digipeater path, e.g. "WIDE1-1,WIDE2-1" (overrides config).
    #[arg(long)]
    path: Option<String>,

    /// Information-field message text (overrides config).
    #[arg(short, long)]
    message: Option<String>,

    /// Output sample file path (overrides config); omit for stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    let mut cli_config = match &args.config {
        Some(path) => CliConfig::from_file(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => CliConfig::default(),
    };

    if let Some(callsign) = args.callsign {
        cli_config.callsign = callsign;
    }
    if let Some(path) = args.path {
        cli_config.path = path;
    }
    if let Some(message) = args.message {
        cli_config.message = message;
    }
    if let Some(output) = args.output {
        cli_config.output = Some(output);
    }
    if args.verbose {
        cli_config.logging.level = config::LogLevel::Debug;
    }

    if cli_config.callsign.is_empty() {
        eprintln!("Error: a source callsign is required (--callsign or config `callsign`)");
        std::process::exit(1);
    }

    let mut logger = StructuredLogger::new(cli_config.logging.clone())?;

    let request = TransmitRequest {
        src_callsign: cli_config.callsign.clone(),
        src_ssid: cli_config.ssid,
        dest_callsign: cli_config.destination.clone(),
        dest_ssid: cli_config.destination_ssid,
        digi_path: cli_config.path.clone(),
        info: cli_config.message.as_bytes().to_vec(),
        config: cli_config.pipeline_config(),
    };

    let frame_bytes_estimate = request.info.len() + 16;
    logger.log(LogEvent::FrameBuilt(FrameBuiltEvent {
        timestamp: chrono::Utc::now(),
        src_callsign: request.src_callsign.clone(),
        dest_callsign: request.dest_callsign.clone(),
        frame_bytes: frame_bytes_estimate,
    }))?;

    let mut core_logger = aprs_core::logging::SignalLogger::new(logging::to_core_log_config(
        &cli_config.logging.level,
    ));

    let destination_label = match &cli_config.output {
        Some(path) => path.display().to_string(),
        None => "<stdout>".to_string(),
    };

    let report = if let Some(path) = &cli_config.output {
        let file = std::fs::File::create(path)
            .wrap_err_with(|| format!("failed to create output file: {}", path.display()))?;
        let mut sink = WriterSink::new(file);
        let report = generate_with_logger(&request, &mut sink, &mut core_logger)
            .map_err(|e| color_eyre::eyre::eyre!("{e}"))?;
        sink.flush().map_err(|e| color_eyre::eyre::eyre!("{e}"))?;
        report
    } else {
        let mut sink = WriterSink::new(std::io::stdout());
        let report = generate_with_logger(&request, &mut sink, &mut core_logger)
            .map_err(|e| color_eyre::eyre::eyre!("{e}"))?;
        sink.flush().map_err(|e| color_eyre::eyre::eyre!("{e}"))?;
        report
    };

    logger.log_core_entries(&core_logger)?;

    logger.log(LogEvent::SinkWritten(SinkWrittenEvent {
        timestamp: chrono::Utc::now(),
        destination: destination_label,
        output_samples: report.output_samples,
        output_bytes: report.output_bytes,
    }))?;

    Ok(())
}
