//! Error types for runenv operations.
//!
//! This module defines [`EnvError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - The registry itself has exactly one failure: [`EnvError::ImmutableWrite`]
//! - Loading custom defaults and parsing CLI overrides add their own variants
//! - Use `anyhow::Error` (via `EnvError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for runenv operations.
#[derive(Debug, Error)]
pub enum EnvError {
    /// A key was set or removed on the read-only registry.
    #[error("Environment registry is read-only: cannot modify '{key}'")]
    ImmutableWrite { key: String },

    /// Custom defaults file not found at the given location.
    #[error("Custom defaults file not found: {path}")]
    DefaultsNotFound { path: PathBuf },

    /// Failed to parse the custom defaults file.
    #[error("Failed to parse custom defaults at {path}: {message}")]
    DefaultsParse { path: PathBuf, message: String },

    /// A `KEY=VALUE` override could not be parsed.
    #[error("Invalid override '{input}': expected KEY=VALUE")]
    InvalidOverride { input: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for runenv operations.
pub type Result<T> = std::result::Result<T, EnvError>;
