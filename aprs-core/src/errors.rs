//! APRS/AX.25 pipeline error types, one variant group per stage.

use thiserror::Error;

/// Top-level error type for all `aprs-core` operations.
#[derive(Debug, Error)]
pub enum AprsError {
    #[error("callsign error: {0}")]
    Callsign(#[from] CallsignError),

    #[error("digipeater path error: {0}")]
    Path(#[from] PathError),

    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("pipeline configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("internal invariant failure: {0}")]
    Invariant(#[from] InvariantError),
}

/// Callsign/address validation errors (§4.1, §7).
#[derive(Debug, Error)]
pub enum CallsignError {
    #[error("callsign is empty")]
    Empty,

    #[error("callsign {callsign:?} exceeds 6 characters")]
    TooLong { callsign: String },

    #[error("callsign {callsign:?} contains an invalid character {ch:?} (only uppercase alphanumerics and spaces are allowed)")]
    InvalidChar { callsign: String, ch: char },

    #[error("SSID {ssid} out of range [0, 15]")]
    SsidOutOfRange { ssid: u8 },
}

/// Digipeater path errors.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("digi path entry {entry:?} is malformed: {reason}")]
    MalformedEntry { entry: String, reason: String },

    #[error("digi path has {count} hops, exceeding the maximum of 8")]
    TooManyHops { count: usize },

    #[error(transparent)]
    Callsign(#[from] CallsignError),
}

/// Frame-construction errors.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("information payload is {len} bytes, exceeding the configured maximum of {max}")]
    OversizedInfo { len: usize, max: usize },
}

/// Pipeline parameter validation errors: a `PipelineConfig` value that
/// cannot be realized by the DSP stages (e.g. a user-settable TOML
/// override with no valid range check at the config layer itself).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("interpolation_factor must be positive, got {value}")]
    InterpolationFactorZero { value: usize },
}

/// Sample-sink write errors (§7: no rollback on partial writes).
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("write to sink failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Internal post-condition failures. These indicate a bug in the core
/// itself and are never retried (§7).
#[derive(Debug, Error)]
pub enum InvariantError {
    #[error("bit-stuffing post-condition violated: found a run of {run} consecutive 1 bits outside a flag")]
    BitStuffRunLength { run: usize },

    #[error("address field has {count} addresses flagged as last, expected exactly 1")]
    AddressLastBitCount { count: usize },

    #[error("FCS re-check failed: recomputed {recomputed:#06x}, frame carries {frame:#06x}")]
    FcsMismatch { recomputed: u16, frame: u16 },
}

/// Result type alias for `aprs-core` operations.
pub type Result<T> = std::result::Result<T, AprsError>;
