use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the recording monitor.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// The SSH private key could not be opened or read from disk.
    #[error("Unable to read private key {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The remote listing could not be fetched (spawn failure or non-zero exit).
    #[error("Remote listing failed: {0}")]
    Transport(String),

    /// The remote listing did not complete within the allotted time.
    #[error("Remote listing timed out after {0}s")]
    Timeout(u64),

    /// The report could not be rendered.
    #[error("Failed to render report: {0}")]
    Report(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MonitorError {
    /// `true` for failures that should be reported as an unhealthy connection
    /// rather than aborting the run.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, MonitorError::Transport(_) | MonitorError::Timeout(_))
    }
}

/// Convenience alias used throughout the monitor crates.
pub type Result<T> = std::result::Result<T, MonitorError>;
