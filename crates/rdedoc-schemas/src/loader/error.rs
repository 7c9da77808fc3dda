//! Error types for schema loading and reference resolution
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Errors raised while building and dereferencing the schema cache
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File I/O errors
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML parsing errors
    #[error("Failed to parse YAML file '{path}': {source}")]
    YamlParseError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing errors
    #[error("Failed to parse JSON file '{path}': {source}")]
    JsonParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Unsupported file format
    #[error("Unsupported file format for '{path}'. Expected .yaml, .yml, or .json")]
    UnsupportedFormat { path: PathBuf },

    /// A schema file without a usable `$id`
    #[error("Schema file '{path}' does not contain an $id field")]
    MissingIdentifier { path: PathBuf },

    /// Two schema files declaring the same `$id`
    #[error("Schema file '{path}' uses an $id value ({id}) that is already in use by '{existing}'")]
    DuplicateIdentifier {
        id: String,
        path: PathBuf,
        existing: PathBuf,
    },

    /// A `$ref` whose target is not in the cache
    #[error("Cannot find '{reference}' in the schema cache (referenced from '{referrer}'): {reason}")]
    UnresolvedReference {
        reference: String,
        referrer: String,
        reason: String,
    },

    /// A `$ref` whose target resolves to something other than a mapping
    #[error("Reference '{reference}' does not point to an object schema (found {found})")]
    InvalidReferenceTarget { reference: String, found: String },

    /// Circular reference detection
    #[error("Circular reference detected: {chain}")]
    CircularReference { chain: String },

    /// Reference expansion nested deeper than the configured limit
    #[error("Reference expansion exceeded the maximum depth of {depth}: {chain}")]
    ResolutionDepthExceeded { depth: usize, chain: String },
}

impl LoaderError {
    /// Create an I/O error with path context
    pub fn io_error(path: PathBuf, error: std::io::Error) -> Self {
        Self::IoError {
            path,
            source: error,
        }
    }

    /// Create a YAML parsing error with path context
    pub fn yaml_parse_error(path: PathBuf, error: serde_yaml::Error) -> Self {
        Self::YamlParseError {
            path,
            source: error,
        }
    }

    /// Create a JSON parsing error with path context
    pub fn json_parse_error(path: PathBuf, error: serde_json::Error) -> Self {
        Self::JsonParseError {
            path,
            source: error,
        }
    }

    /// Create an unsupported format error
    pub fn unsupported_format(path: PathBuf) -> Self {
        Self::UnsupportedFormat { path }
    }

    /// Create a missing identifier error
    pub fn missing_identifier(path: PathBuf) -> Self {
        Self::MissingIdentifier { path }
    }

    /// Create a duplicate identifier error
    pub fn duplicate_identifier(id: impl Into<String>, path: PathBuf, existing: PathBuf) -> Self {
        Self::DuplicateIdentifier {
            id: id.into(),
            path,
            existing,
        }
    }

    /// Create an unresolved reference error
    pub fn unresolved_reference(
        reference: impl Into<String>,
        referrer: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnresolvedReference {
            reference: reference.into(),
            referrer: referrer.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid reference target error
    pub fn invalid_reference_target(reference: impl Into<String>, found: impl Into<String>) -> Self {
        Self::InvalidReferenceTarget {
            reference: reference.into(),
            found: found.into(),
        }
    }

    /// Create a circular reference error from the chain of identifiers being expanded
    pub fn circular_reference(chain: &[String]) -> Self {
        Self::CircularReference {
            chain: chain.join(" -> "),
        }
    }

    /// Create a depth limit error from the chain of identifiers being expanded
    pub fn resolution_depth_exceeded(depth: usize, chain: &[String]) -> Self {
        Self::ResolutionDepthExceeded {
            depth,
            chain: chain.join(" -> "),
        }
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::IoError { path, .. } => Some(path),
            Self::YamlParseError { path, .. } => Some(path),
            Self::JsonParseError { path, .. } => Some(path),
            Self::UnsupportedFormat { path } => Some(path),
            Self::MissingIdentifier { path } => Some(path),
            Self::DuplicateIdentifier { path, .. } => Some(path),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let path = PathBuf::from("schema/study.json");

        let io_err = LoaderError::io_error(
            path.clone(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
        );
        assert!(matches!(io_err, LoaderError::IoError { .. }));
        assert_eq!(io_err.path(), Some(&path));

        let circular_err = LoaderError::circular_reference(&[
            "a".to_string(),
            "b".to_string(),
            "a".to_string(),
        ]);
        assert_eq!(
            circular_err.to_string(),
            "Circular reference detected: a -> b -> a"
        );
        assert!(circular_err.path().is_none());

        let depth_err = LoaderError::resolution_depth_exceeded(2, &["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(
            depth_err.to_string(),
            "Reference expansion exceeded the maximum depth of 2: a -> b -> c"
        );
    }

    #[test]
    fn test_duplicate_identifier_message() {
        let err = LoaderError::duplicate_identifier(
            "https://example.org/study",
            PathBuf::from("b.json"),
            PathBuf::from("a.json"),
        );
        let message = err.to_string();
        assert!(message.contains("b.json"));
        assert!(message.contains("https://example.org/study"));
        assert!(message.contains("a.json"));
    }

    #[test]
    fn test_unresolved_reference_message() {
        let err = LoaderError::unresolved_reference("X", "root", "not in cache");
        assert!(err.to_string().starts_with("Cannot find 'X' in the schema cache"));
    }
}
