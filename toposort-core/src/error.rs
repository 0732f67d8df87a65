use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort a run. Per-endpoint probe failures are not errors,
/// they surface as [`crate::ProbeOutcome::Unreachable`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("no network connectivity ({host}:{port} {reason})")]
    NoConnectivity {
        host: String,
        port: u16,
        reason: String,
    },

    #[error("fetching {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("cannot build HTTP client: {0}")]
    HttpClient(String),

    #[error("malformed source document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("producer record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("source document lists no producers")]
    NoEndpoints,

    #[error("writing {} failed: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
