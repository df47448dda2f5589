//! Error types for the directory

use teamdir_core::MemberId;
use thiserror::Error;

/// Failure to project a single member into markup
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("member {name:?} has no id")]
    MissingId { name: String },

    #[error("member {id} has a photo with disallowed scheme: {photo}")]
    UnsafePhoto { id: MemberId, photo: String },

    #[error("render failed: {0}")]
    Other(String),
}

/// Result type for rendering one member
pub type RenderResult<T> = Result<T, RenderError>;

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
