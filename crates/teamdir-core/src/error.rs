//! Error types for roster loading

use thiserror::Error;

/// Roster load failure
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("roster transport error: {0}")]
    Transport(String),

    #[error("roster fetch returned http status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("roster io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("roster decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid roster format: expected array")]
    NotAnArray,

    #[error("invalid roster record at index {index}: expected object")]
    InvalidRecord { index: usize },
}

/// Result type for roster loading
pub type LoadResult<T> = Result<T, LoadError>;
