//! Error types for persisting resolved schemas and producing documentation
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for documentation operations
pub type PublishResult<T> = Result<T, PublishError>;

/// Errors raised after the cache has been resolved
#[derive(Error, Debug)]
pub enum PublishError {
    /// File I/O errors
    #[error("Failed to access '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON (de)serialization errors
    #[error("Failed to process JSON document '{path}': {source}")]
    JsonError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// YAML serialization errors
    #[error("Failed to write YAML document '{path}': {source}")]
    YamlError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A resolved schema that is neither titled nor a vocabulary
    #[error("Cannot persist schema because it does not contain a title element: {id}")]
    MissingTitle { id: String },

    /// No titled schema was found in the cache
    #[error("No titled schema found to persist in '{dir}'")]
    NothingPersisted { dir: PathBuf },
}

impl PublishError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a JSON error with path context
    pub fn json_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonError {
            path,
            source: error,
        }
    }

    /// Create a YAML error with path context
    pub fn yaml_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlError {
            path,
            source: error,
        }
    }

    /// Create a missing title error
    pub fn missing_title(id: impl Into<String>) -> Self {
        Self::MissingTitle { id: id.into() }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::IoError { path, .. } => Some(path),
            Self::JsonError { path, .. } => Some(path),
            Self::YamlError { path, .. } => Some(path),
            Self::NothingPersisted { dir } => Some(dir),
            Self::MissingTitle { .. } => None,
        }
    }
}

/// Errors that stop a documentation build
#[derive(Error, Debug)]
pub enum BuildError {
    /// The source root is missing or not a directory
    #[error("Source directory '{path}' does not exist or is not a directory")]
    SourceNotFound { path: PathBuf },

    /// Loading or resolving the schema cache failed
    #[error(transparent)]
    Loader(#[from] crate::loader::LoaderError),

    /// Persisting or post-processing failed
    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl BuildError {
    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::SourceNotFound { path } => Some(path),
            Self::Loader(e) => e.path(),
            Self::Publish(e) => e.path(),
        }
    }
}
