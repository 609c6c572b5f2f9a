//! Error types and handling infrastructure for cardbook.
//!
//! Page navigation itself never fails: a rejected page turn is silent. The errors below cover
//! the surrounding machinery, namely the terminal, configuration loading and the audio backends.
//!
//! `thiserror` describes the library error; the binary wraps it with `anyhow` for context.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cardbook operations.
#[derive(Error, Debug)]
pub enum CardError {
    /// File system and terminal IO errors
    #[error("IO operation failed: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be found at an explicitly requested path
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file exists but could not be parsed
    #[error("Failed to parse configuration {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Configuration values that fail validation (empty book, zero lock, ...)
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Audio backend errors (player spawn failure, missing asset, ...)
    #[error("Audio operation failed: {message}")]
    AudioError { message: String },
}

/// Standard Result type for cardbook operations.
pub type Result<T> = std::result::Result<T, CardError>;

impl CardError {
    /// Create an Io error with additional context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an AudioError with a descriptive message
    pub fn audio(message: impl Into<String>) -> Self {
        Self::AudioError {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for CardError {
    fn from(err: std::io::Error) -> Self {
        let message = match err.kind() {
            std::io::ErrorKind::NotFound => "File not found",
            std::io::ErrorKind::PermissionDenied => "Permission denied",
            _ => "IO operation failed",
        };
        Self::Io {
            message: message.to_string(),
            source: err,
        }
    }
}
