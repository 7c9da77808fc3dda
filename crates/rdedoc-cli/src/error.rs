//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use rdedoc_schemas::{BuildError, LoaderError, PublishError};
use std::io;
use std::path::PathBuf;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (stdout, completions, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Source directory missing or not a directory
    #[error("Source directory not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// Error while loading or resolving schemas
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// Error while persisting or publishing documentation
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML deserialization error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Logging setup error
    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<BuildError> for Error {
    fn from(error: BuildError) -> Self {
        match error {
            BuildError::SourceNotFound { path } => Self::SourceNotFound { path },
            BuildError::Loader(e) => Self::Loader(e),
            BuildError::Publish(e) => Self::Publish(e),
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a logging setup error
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging(message.into())
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::SourceNotFound { .. } => 2,
            Self::Loader(e) => match e {
                LoaderError::MissingIdentifier { .. } => 3,
                LoaderError::DuplicateIdentifier { .. } => 4,
                LoaderError::UnresolvedReference { .. }
                | LoaderError::InvalidReferenceTarget { .. }
                | LoaderError::CircularReference { .. } => 5,
                LoaderError::ResolutionDepthExceeded { .. } => 10,
                _ => 7,
            },
            Self::Publish(e) => match e {
                PublishError::MissingTitle { .. } | PublishError::NothingPersisted { .. } => 6,
                _ => 1,
            },
            Self::Config(_) => 8,
            Self::Logging(_) => 9,
            Self::Json(_) => 12,
            Self::Yaml(_) => 13,
            Self::Toml(_) => 14,
        }
    }
}

/// Format an error for display to the user
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        use colored::Colorize;
        format!("{} {}", "Error:".red().bold(), error)
    } else {
        format!("Error: {}", error)
    }
}
