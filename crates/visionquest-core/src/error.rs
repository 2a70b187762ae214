//! Core error types for visionquest-core.
//!
//! Nothing inside the session state machine or the scoring formula can fail.
//! Errors only come from the outside world: the config file, export targets
//! and the CSV/PDF writers.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for visionquest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Report export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to locate or create the configuration directory
    #[error("Cannot resolve configuration directory: {0}")]
    DataDir(String),

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Report export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    /// CSV writer failed
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// PDF generation failed
    #[error("PDF export failed: {0}")]
    Pdf(String),

    /// Writing the report file failed
    #[error("Failed to write report to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
