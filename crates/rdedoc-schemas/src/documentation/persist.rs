//! Writing resolved schemas to disk
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use crate::documentation::error::{PublishError, PublishResult};
use crate::loader::cache::SchemaCache;
use crate::loader::schema_loader::{ID_KEY, SCHEMA_KEY};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::form_urlencoded;

/// Default file stem for persisted schemas
pub const DEFAULT_SCHEMA_STEM: &str = "icpsr_study_schema";

/// Version used when an identifier carries no `version` query parameter
pub const DEFAULT_SCHEMA_VERSION: &str = "1";

/// Write every titled schema in the cache to `dir`.
///
/// Each titled document lands in `<dir>/<stem>_<version>.json`. Untitled
/// documents are allowed only for vocabularies. Returns the path of the last
/// document written.
pub fn persist_cache(cache: &SchemaCache, dir: &Path, stem: &str) -> PublishResult<PathBuf> {
    let mut last_written = None;

    for entry in cache.iter() {
        match entry.title() {
            Some(title) => {
                let version = schema_version(&entry.id);
                let file_path = dir.join(format!("{stem}_{version}.json"));
                debug!(%title, file = %file_path.display(), "Writing schema");
                write_json(&file_path, &entry.content)?;
                last_written = Some(file_path);
            }
            None if entry.is_vocabulary() => {}
            None => return Err(PublishError::missing_title(entry.id.clone())),
        }
    }

    last_written.ok_or_else(|| PublishError::NothingPersisted {
        dir: dir.to_path_buf(),
    })
}

/// The `version` query parameter of a schema identifier.
///
/// Relative identifiers are accepted and blank values are ignored.
pub fn schema_version(id: &str) -> String {
    id.split_once('?')
        .map(|(_, rest)| rest.split_once('#').map_or(rest, |(query, _)| query))
        .and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, value)| key == "version" && !value.is_empty())
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_else(|| DEFAULT_SCHEMA_VERSION.to_string())
}

/// Drop `$id` and `$schema` from each top-level property of a resolved document.
///
/// Inlined fragments carry their own identifiers, which the documentation
/// generator would otherwise render as property attributes.
pub fn strip_nested_identifiers(document: &mut Value) -> usize {
    let Some(properties) = document.get_mut("properties").and_then(Value::as_object_mut) else {
        return 0;
    };

    let mut removed = 0;
    for property in properties.values_mut() {
        if let Some(obj) = property.as_object_mut() {
            for key in [ID_KEY, SCHEMA_KEY] {
                if obj.shift_remove(key).is_some() {
                    removed += 1;
                }
            }
        }
    }
    removed
}

/// Read a persisted document, strip nested identifiers and write it back
pub fn rewrite_without_nested_identifiers(path: &Path) -> PublishResult<usize> {
    let mut document = read_json(path)?;
    let removed = strip_nested_identifiers(&mut document);
    write_json(path, &document)?;
    debug!(file = %path.display(), removed, "Removed nested $id and $schema values");
    Ok(removed)
}

/// Read a JSON document
pub fn read_json(path: &Path) -> PublishResult<Value> {
    let content =
        std::fs::read_to_string(path).map_err(|e| PublishError::io_error(path.to_path_buf(), e))?;
    serde_json::from_str(&content).map_err(|e| PublishError::json_error(path.to_path_buf(), e))
}

/// Write a JSON document with four-space indentation, creating parent directories
pub fn write_json(path: &Path, value: &Value) -> PublishResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| PublishError::io_error(parent.to_path_buf(), e))?;
    }

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| PublishError::json_error(path.to_path_buf(), e))?;

    std::fs::write(path, buffer).map_err(|e| PublishError::io_error(path.to_path_buf(), e))
}
