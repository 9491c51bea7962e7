//! Error types for the render-launcher-core library.
//!
//! This module provides granular error variants for different failure modes,
//! so that a failed snapshot write or a malformed settings file can be
//! reported precisely instead of being silently dropped.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur within the render-launcher-core library.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (invalid environment values, bad overrides).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The canvas geometry cannot produce a usable scale factor.
    #[error("Invalid canvas geometry: {0}")]
    InvalidGeometry(String),

    /// A settings file could not be opened for reading or writing.
    #[error("Cannot open {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file ended before the named field.
    #[error("Missing field `{field}` at line {line}")]
    MissingField { field: &'static str, line: usize },

    /// A settings line could not be parsed as the type its field requires.
    #[error("Malformed field `{field}` at line {line}: expected {expected}, found {raw:?}")]
    MalformedField {
        field: &'static str,
        expected: &'static str,
        raw: String,
        line: usize,
    },

    /// A text field contains a line break and cannot be written on one line.
    #[error("Field `{field}` must not contain line breaks")]
    InvalidText { field: &'static str },

    /// The settings file has more lines than the format defines.
    #[error("Unexpected trailing data at line {line}")]
    TrailingData { line: usize },

    /// UI-related errors (window creation, event loop).
    #[error("UI error: {0}")]
    Ui(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a geometry error with the given message.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::InvalidGeometry(msg.into())
    }

    /// Creates a UI error with the given message.
    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui(msg.into())
    }

    /// Wraps an I/O failure on `path` as [`AppError::OpenFile`].
    pub fn open_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OpenFile {
            path: path.into(),
            source,
        }
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
