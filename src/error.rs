//! Error type shared by loaders, validation and exporters
//!
//! The calculation engines themselves are infallible; only the edges that
//! touch files or user-supplied configuration return `Result`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid assumption: {0}")]
    InvalidAssumption(String),

    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
