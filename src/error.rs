use std::path::PathBuf;
use thiserror::Error;

/// failure reported by a transport primitive
#[derive(Error, Debug)]
pub enum TransportError {
    /// the server has no such file or directory, callers decide whether
    /// that is acceptable
    #[error("not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Failed(String),
}

/// fatal failure of a remote session or the reconciliation run
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("failed to connect to {host}: {source}")]
    Connect {
        host: String,
        source: TransportError,
    },

    #[error("remote {operation} failed for {path}: {source}")]
    Transport {
        operation: &'static str,
        path: String,
        source: TransportError,
    },

    #[error("working dir differs: expected {expected}, server is in {actual}")]
    Consistency { expected: String, actual: String },

    #[error("failed to read local file {}: {source}", path.display())]
    LocalFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("not connected")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, SyncError>;
