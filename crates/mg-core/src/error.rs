//! Error types for mg-core

use thiserror::Error;

/// Core error type for Migra
#[derive(Error, Debug)]
pub enum CoreError {
    /// M001: Configuration file not found
    #[error("[M001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// M002: Invalid configuration value
    #[error("[M002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// M003: Migration root missing or unreadable
    #[error("[M003] Failed to list migration artifacts in '{path}': {message}")]
    Discovery { path: String, message: String },

    /// M004: Artifact rejected before execution (wrong suffix, bad version)
    #[error("[M004] Invalid migration artifact '{name}': {reason}")]
    InvalidArtifact { name: String, reason: String },

    /// M005: IO error
    #[error("[M005] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// M006: IO error with file path context
    #[error("[M006] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// M007: Config YAML parse error
    #[error("[M007] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
