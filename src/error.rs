use std::path::PathBuf;

use hashdup_core::RecordError;

/// Everything that can abort a run. All of them are terminal.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("{0}")]
    Usage(String),

    #[error("Configuration error in {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("Cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File size {len} of {path} is not multiple of hash size {width}")]
    SizeMismatch {
        path: PathBuf,
        len: u64,
        width: usize,
    },

    #[error("Reading error: got {read} of {expected} bytes before end of file")]
    TruncatedRead { read: usize, expected: usize },

    #[error("Reading error: {0}")]
    Read(#[source] std::io::Error),

    #[error("Memory error: cannot allocate {bytes} bytes for {what}")]
    Resource { what: &'static str, bytes: u64 },

    #[error("Cannot write report: {0}")]
    Output(#[source] std::io::Error),

    #[error(transparent)]
    Core(#[from] RecordError),
}

pub type Result<T, E = DriverError> = std::result::Result<T, E>;
