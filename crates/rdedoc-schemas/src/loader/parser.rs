//! Schema parsing functionality for YAML and JSON formats
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::path::Path;

/// Markdown hard line break: two trailing spaces before the newline
pub const MARKDOWN_LINE_BREAK: &str = "  \n";

/// Supported file formats for schema parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            match extension.to_lowercase().as_str() {
                "yaml" | "yml" => Ok(Format::Yaml),
                "json" => Ok(Format::Json),
                _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
            }
        } else {
            Err(LoaderError::unsupported_format(path.to_path_buf()))
        }
    }

    /// Get the primary file extension for this format
    pub fn primary_extension(&self) -> &'static str {
        match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }
}

/// Parser for schema and vocabulary files
#[derive(Debug, Clone)]
pub struct SchemaParser {
    note_fields: Vec<String>,
}

impl SchemaParser {
    /// Create a parser that normalizes the default free-text note fields
    pub fn new() -> Self {
        Self::with_note_fields(vec!["usageNotes".to_string(), "curatorNotes".to_string()])
    }

    /// Create a parser with an explicit list of YAML note fields
    pub fn with_note_fields(note_fields: Vec<String>) -> Self {
        Self { note_fields }
    }

    /// Fields whose newlines are rewritten in YAML documents
    pub fn note_fields(&self) -> &[String] {
        &self.note_fields
    }

    /// Parse a schema file, detecting format from extension
    pub fn parse_file(&self, path: &Path) -> LoaderResult<(Value, Format)> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        let value = self.parse_content(&content, format, path)?;
        Ok((value, format))
    }

    /// Parse schema content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => {
                let mut value = self.parse_yaml(content, path)?;
                self.normalize_notes(&mut value);
                Ok(value)
            }
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        // Convert to JSON Value for consistent handling
        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Rewrite newlines in top-level note fields as markdown hard breaks
    pub fn normalize_notes(&self, value: &mut Value) {
        let Some(obj) = value.as_object_mut() else {
            return;
        };

        for field in &self.note_fields {
            if let Some(Value::String(text)) = obj.get_mut(field) {
                if !text.is_empty() {
                    *text = markdown_line_breaks(text);
                }
            }
        }
    }
}

impl Default for SchemaParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace every plain newline with a markdown hard line break
pub fn markdown_line_breaks(text: &str) -> String {
    text.replace('\n', MARKDOWN_LINE_BREAK)
}
