//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON/TOML)
//! - Command-line arguments

use crate::error::{Error, Result};
use rdedoc_schemas::documentation::markdown::DEFAULT_DESCRIPTION_MARKER;
use rdedoc_schemas::documentation::tools::{DEFAULT_GENERATOR_PROGRAM, DEFAULT_SITE_BUILDER_PROGRAM};
use rdedoc_schemas::documentation::{DocsLayout, LabelStyle, SiteConfig, DEFAULT_SCHEMA_STEM};
use rdedoc_schemas::{GeneratorConfig, LoaderConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory and file names of the documentation tree
    pub layout: DocsLayout,

    /// Schema loading settings
    pub loader: LoaderSection,

    /// Persisted schema and markdown settings
    pub output: OutputSection,

    /// Label spelling overrides for table rows and headings
    pub labels: LabelStyle,

    /// Static site configuration
    pub site: SiteSection,

    /// External programs
    pub tools: ToolsSection,
}

/// Schema loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderSection {
    /// Directory holding JSON schemas, relative to the source root
    pub json_dir: PathBuf,

    /// Directory holding YAML vocabularies, relative to the source root
    pub yaml_dir: PathBuf,

    /// YAML fields whose newlines become markdown line breaks
    pub note_fields: Vec<String>,

    /// Maximum `$ref` nesting before resolution fails
    pub max_resolution_depth: usize,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// File stem of the persisted schema and generated markdown
    pub schema_stem: String,

    /// Line that receives the publication date
    pub description_marker: String,

    /// Show progress indicators
    pub progress: bool,
}

/// Site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Write the site configuration file before building
    pub write_config: bool,

    /// Contents of the site configuration file
    #[serde(flatten)]
    pub document: SiteConfig,
}

/// External program configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsSection {
    /// Markdown generator program
    pub generator: String,

    /// Static site builder program
    pub site_builder: String,
}

impl Default for LoaderSection {
    fn default() -> Self {
        let loader = LoaderConfig::default();
        Self {
            json_dir: loader.json_dir,
            yaml_dir: loader.yaml_dir,
            note_fields: loader.note_fields,
            max_resolution_depth: loader.max_resolution_depth,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            schema_stem: DEFAULT_SCHEMA_STEM.to_string(),
            description_marker: DEFAULT_DESCRIPTION_MARKER.to_string(),
            progress: true,
        }
    }
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            write_config: true,
            document: SiteConfig::default(),
        }
    }
}

impl Default for ToolsSection {
    fn default() -> Self {
        Self {
            generator: DEFAULT_GENERATOR_PROGRAM.to_string(),
            site_builder: DEFAULT_SITE_BUILDER_PROGRAM.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file, choosing the format by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;

        let config = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        debug!(file = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(file = %path.display(), error = %e, "Failed to load configuration");
                    }
                }
            }
        }

        // Return default config if no config file found
        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Get default configuration file paths to check
    fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".rdedoc.yaml"),
            PathBuf::from(".rdedoc.json"),
            PathBuf::from(".rdedoc.toml"),
            PathBuf::from("rdedoc.yaml"),
        ];

        // User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("rdedoc").join("config.yaml"));
        }

        paths
    }

    /// Loader settings for the schema library
    pub fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            json_dir: self.loader.json_dir.clone(),
            yaml_dir: self.loader.yaml_dir.clone(),
            note_fields: self.loader.note_fields.clone(),
            max_resolution_depth: self.loader.max_resolution_depth,
            ..LoaderConfig::default()
        }
    }

    /// Build settings for the documentation pipeline
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            loader: self.loader_config(),
            layout: self.layout.clone(),
            schema_stem: self.output.schema_stem.clone(),
            description_marker: self.output.description_marker.clone(),
            labels: self.labels.clone(),
            publication_date: None,
            site: self.site.document.clone(),
            write_site_config: self.site.write_config,
            generator_program: self.tools.generator.clone(),
            site_builder_program: self.tools.site_builder.clone(),
            skip_site: false,
            keep_work_dir: false,
        }
    }
}
