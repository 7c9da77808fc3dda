//! Directory scanning and cache construction
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use crate::loader::{
    cache::{CacheEntry, SchemaCache},
    error::{LoaderError, LoaderResult},
    parser::{Format, SchemaParser},
    resolver::{ReferenceResolver, DEFAULT_MAX_DEPTH},
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Attribute carrying a fragment's identifier
pub const ID_KEY: &str = "$id";

/// Attribute marking a fragment as a JSON Schema document
pub const SCHEMA_KEY: &str = "$schema";

/// Configuration for schema loader behavior
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory holding JSON schema files, relative to the source root
    pub json_dir: PathBuf,
    /// Directory holding YAML vocabulary files, relative to the source root
    pub yaml_dir: PathBuf,
    /// Extensions scanned in `json_dir`
    pub json_extensions: Vec<String>,
    /// Extensions scanned in `yaml_dir`
    pub yaml_extensions: Vec<String>,
    /// YAML fields whose newlines become markdown line breaks
    pub note_fields: Vec<String>,
    /// Maximum reference resolution depth
    pub max_resolution_depth: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            json_dir: PathBuf::from("schema"),
            yaml_dir: PathBuf::from("schema").join("yaml"),
            json_extensions: vec![Format::Json.primary_extension().to_string()],
            yaml_extensions: vec![Format::Yaml.primary_extension().to_string()],
            note_fields: vec!["usageNotes".to_string(), "curatorNotes".to_string()],
            max_resolution_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Builds the schema cache from a source tree and dereferences it
#[derive(Debug)]
pub struct SchemaLoader {
    config: LoaderConfig,
    parser: SchemaParser,
    resolver: ReferenceResolver,
}

impl SchemaLoader {
    /// Create a new schema loader with default configuration
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a new schema loader with custom configuration
    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            parser: SchemaParser::with_note_fields(config.note_fields.clone()),
            resolver: ReferenceResolver::with_max_depth(config.max_resolution_depth),
            config,
        }
    }

    /// Get current configuration
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Load every schema fragment under `root` and resolve all references
    pub fn load_resolved(&self, root: &Path) -> LoaderResult<SchemaCache> {
        let mut cache = self.load_cache(root)?;
        self.dereference(&mut cache)?;
        Ok(cache)
    }

    /// Scan `root` and index every schema fragment by `$id`
    pub fn load_cache(&self, root: &Path) -> LoaderResult<SchemaCache> {
        let mut cache = SchemaCache::new();

        for path in self.candidate_files(root)? {
            self.load_file(&path, &mut cache)?;
        }

        info!(
            root = %root.display(),
            schemas = cache.len(),
            "Schema cache loaded"
        );
        Ok(cache)
    }

    /// Resolve every `$ref` in the cache, replacing fragments in place
    pub fn dereference(&self, cache: &mut SchemaCache) -> LoaderResult<usize> {
        let expanded = self.resolver.dereference(cache)?;
        info!(schemas = cache.len(), references = expanded, "Schema cache dereferenced");
        Ok(expanded)
    }

    /// Parse one file and add it to the cache if it is a schema document.
    ///
    /// Returns `true` when the file was admitted.
    pub fn load_file(&self, path: &Path, cache: &mut SchemaCache) -> LoaderResult<bool> {
        let (content, format) = self.parser.parse_file(path)?;
        self.admit(content, format, path, cache)
    }

    /// Add parsed content to the cache if it carries the `$schema` marker
    pub fn admit(
        &self,
        content: Value,
        format: Format,
        path: &Path,
        cache: &mut SchemaCache,
    ) -> LoaderResult<bool> {
        let is_schema = content
            .as_object()
            .map(|obj| obj.contains_key(SCHEMA_KEY))
            .unwrap_or(false);

        if !is_schema {
            debug!(file = %path.display(), "Skipping file without $schema attribute");
            return Ok(false);
        }

        let id = content
            .get(ID_KEY)
            .and_then(Value::as_str)
            .ok_or_else(|| LoaderError::missing_identifier(path.to_path_buf()))?
            .to_string();

        debug!(file = %path.display(), id = %id, "Loading file into schema cache");
        cache.insert(CacheEntry::new(id, content, path.to_path_buf(), format))?;
        Ok(true)
    }

    /// Candidate files: JSON files first, then YAML files, each sorted by path
    pub fn candidate_files(&self, root: &Path) -> LoaderResult<Vec<PathBuf>> {
        let mut files = list_files(&root.join(&self.config.json_dir), &self.config.json_extensions)?;
        files.extend(list_files(
            &root.join(&self.config.yaml_dir),
            &self.config.yaml_extensions,
        )?);
        Ok(files)
    }
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Files directly inside `dir` whose extension matches one of `extensions`
fn list_files(dir: &Path, extensions: &[String]) -> LoaderResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "Schema directory not found, skipping");
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| LoaderError::io_error(dir.to_path_buf(), e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LoaderError::io_error(dir.to_path_buf(), e))?;
        let path = entry.path();

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
            .unwrap_or(false);

        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
