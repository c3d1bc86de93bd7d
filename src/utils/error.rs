//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading a V8 log (malformed input)
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to read log: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid log format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Errors raised when a model document fails the consumer's required-field check
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Model document is not a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
