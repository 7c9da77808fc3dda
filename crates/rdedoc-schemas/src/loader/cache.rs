//! Identifier-keyed cache of schema fragments
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use crate::loader::parser::Format;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Cache entry containing a schema fragment and where it came from
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The declared `$id`
    pub id: String,
    /// Fragment content; resolved in place by the dereference pass
    pub content: Value,
    /// Original file path
    pub file_path: PathBuf,
    /// Format the file was parsed as
    pub format: Format,
}

impl CacheEntry {
    /// Create a new cache entry
    pub fn new(id: impl Into<String>, content: Value, file_path: PathBuf, format: Format) -> Self {
        Self {
            id: id.into(),
            content,
            file_path,
            format,
        }
    }

    /// The `title` attribute, if the fragment declares a non-null one
    pub fn title(&self) -> Option<&Value> {
        self.content.get("title").filter(|title| !title.is_null())
    }

    /// Vocabulary fragments are recognised by `yaml` appearing in their identifier
    pub fn is_vocabulary(&self) -> bool {
        self.id.contains("yaml")
    }
}

/// Schema fragments keyed by `$id`, iterated in load order.
///
/// The cache is filled by [`SchemaLoader`](crate::loader::SchemaLoader) and is
/// read-only while a single fragment is being resolved. The dereference pass
/// is the only writer after loading: it swaps each fragment for its resolved
/// document through [`SchemaCache::replace`].
#[derive(Debug, Default)]
pub struct SchemaCache {
    entries: Vec<CacheEntry>,
    index: HashMap<String, usize>,
}

impl SchemaCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fragment, rejecting identifiers that are already cached
    pub fn insert(&mut self, entry: CacheEntry) -> LoaderResult<()> {
        if let Some(&existing) = self.index.get(&entry.id) {
            return Err(LoaderError::duplicate_identifier(
                entry.id,
                entry.file_path,
                self.entries[existing].file_path.clone(),
            ));
        }

        self.index.insert(entry.id.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Look up the fragment content for an identifier
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.entry(id).map(|entry| &entry.content)
    }

    /// Look up the full entry for an identifier
    pub fn entry(&self, id: &str) -> Option<&CacheEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Replace the content stored under an identifier, returning the previous content
    pub fn replace(&mut self, id: &str, content: Value) -> Option<Value> {
        let &i = self.index.get(id)?;
        Some(std::mem::replace(&mut self.entries[i].content, content))
    }

    /// Check if the cache contains an identifier
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Identifiers in load order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    /// Entries in load order
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.iter()
    }

    /// Path of the file an identifier was loaded from
    pub fn source_of(&self, id: &str) -> Option<&Path> {
        self.entry(id).map(|entry| entry.file_path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summary counts for logging and reporting
    pub fn stats(&self) -> CacheStats {
        let titled = self.entries.iter().filter(|e| e.title().is_some()).count();
        let vocabularies = self.entries.iter().filter(|e| e.is_vocabulary()).count();
        let yaml_sources = self
            .entries
            .iter()
            .filter(|e| e.format == Format::Yaml)
            .count();

        CacheStats {
            total_entries: self.entries.len(),
            titled,
            vocabularies,
            yaml_sources,
        }
    }
}

/// Cache statistics for logging and reporting
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub titled: usize,
    pub vocabularies: usize,
    pub yaml_sources: usize,
}
