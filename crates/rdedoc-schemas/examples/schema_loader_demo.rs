//! Schema Loader Demonstration
//!
//! Builds a tiny metadata standard in a temporary directory, loads and
//! dereferences it, and prints the resolved study schema.
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use rdedoc_schemas::documentation::persist::{persist_cache, DEFAULT_SCHEMA_STEM};
use rdedoc_schemas::SchemaLoader;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Schema Loader Demonstration");
    println!("===========================\n");

    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    create_example_files(root)?;

    let loader = SchemaLoader::new();
    let mut cache = loader.load_cache(root)?;
    println!("Loaded {} fragments:", cache.len());
    for entry in cache.iter() {
        println!("  {} ({})", entry.id, entry.file_path.display());
    }

    let expanded = loader.dereference(&mut cache)?;
    println!("\nExpanded {expanded} references");

    if let Some(study) = cache.get("https://example.org/study?version=1") {
        println!("\nResolved study schema:\n{}", serde_json::to_string_pretty(study)?);
    }

    let persisted = persist_cache(&cache, &root.join("temp"), DEFAULT_SCHEMA_STEM)?;
    println!("\nPersisted to {}", persisted.display());

    Ok(())
}

fn create_example_files(root: &Path) -> std::io::Result<()> {
    fs::create_dir_all(root.join("schema/yaml"))?;

    fs::write(
        root.join("schema/study.json"),
        r#"{
    "$schema": "https://json-schema.org/draft/2020-12/schema",
    "$id": "https://example.org/study?version=1",
    "title": "Study",
    "type": "object",
    "properties": {
        "study_id": {"$ref": "https://example.org/yaml/study_id"}
    }
}"#,
    )?;

    fs::write(
        root.join("schema/yaml/study_id.yaml"),
        "$schema: https://json-schema.org/draft/2020-12/schema\n\
         $id: https://example.org/yaml/study_id\n\
         type: integer\n\
         usageNotes: \"Assigned at deposit.\\nNever reused.\"\n",
    )?;

    Ok(())
}
