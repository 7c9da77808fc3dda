//! Integration tests for the load, resolve and persist path
//!
//! A small metadata standard is laid out on disk the way real sources are:
//! JSON schemas under `schema/` and YAML vocabularies under `schema/yaml/`.

use rdedoc_schemas::documentation::persist::{
    persist_cache, read_json, rewrite_without_nested_identifiers, DEFAULT_SCHEMA_STEM,
};
use rdedoc_schemas::{LoaderError, PublishError, SchemaLoader};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const DRAFT: &str = "https://json-schema.org/draft/2020-12/schema";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn metadata_standard() -> TempDir {
    let dir = tempdir().unwrap();
    let root = dir.path();

    write(
        root,
        "schema/study.json",
        &json!({
            "$schema": DRAFT,
            "$id": "https://rde.example.org/study?version=2",
            "title": "Metadata Schema for Curated Studies",
            "type": "object",
            "properties": {
                "study_title": {"$ref": "https://rde.example.org/title"},
                "study_doi": {"$ref": "https://rde.example.org/yaml/doi", "description": "Study DOI"},
                "kind_of_data": {"type": "array", "items": {"$ref": "https://rde.example.org/yaml/kind_of_data"}}
            },
            "additionalProperties": false
        })
        .to_string(),
    );
    write(
        root,
        "schema/title.json",
        &json!({
            "$schema": DRAFT,
            "$id": "https://rde.example.org/title",
            "title": "Title",
            "type": "string"
        })
        .to_string(),
    );
    write(
        root,
        "schema/yaml/doi.yaml",
        "$schema: https://json-schema.org/draft/2020-12/schema\n\
         $id: https://rde.example.org/yaml/doi\n\
         type: string\n\
         description: Registered DOI\n\
         usageNotes: \"Use the DOI\\nassigned at release\"\n",
    );
    write(
        root,
        "schema/yaml/kind_of_data.yaml",
        "$schema: https://json-schema.org/draft/2020-12/schema\n\
         $id: https://rde.example.org/yaml/kind_of_data\n\
         enum:\n  - survey data\n  - census data\n  - administrative records\n",
    );
    write(root, "schema/yaml/readme.yaml", "note: not a schema\n");

    dir
}

#[test]
fn test_load_resolve_persist() {
    let source = metadata_standard();
    let loader = SchemaLoader::new();

    let cache = loader.load_resolved(source.path()).unwrap();
    assert_eq!(cache.len(), 4);

    let stats = cache.stats();
    assert_eq!(stats.titled, 2);
    assert_eq!(stats.vocabularies, 2);

    let out = tempdir().unwrap();
    let persisted = persist_cache(&cache, out.path(), DEFAULT_SCHEMA_STEM).unwrap();
    assert_eq!(persisted, out.path().join("icpsr_study_schema_1.json"));
    assert!(out.path().join("icpsr_study_schema_2.json").is_file());

    let study_path = out.path().join("icpsr_study_schema_2.json");
    let removed = rewrite_without_nested_identifiers(&study_path).unwrap();
    assert_eq!(removed, 4);

    let study = read_json(&study_path).unwrap();
    assert_eq!(study["$id"], "https://rde.example.org/study?version=2");
    assert_eq!(
        study["properties"]["study_title"],
        json!({"title": "Title", "type": "string"})
    );
    assert_eq!(study["properties"]["study_doi"]["description"], "Study DOI");
    assert_eq!(
        study["properties"]["study_doi"]["usageNotes"],
        "Use the DOI  \nassigned at release"
    );
    assert_eq!(
        study["properties"]["kind_of_data"]["items"]["enum"],
        json!(["survey data", "census data", "administrative records"])
    );
    assert_eq!(
        study["properties"]["kind_of_data"]["items"]["$id"],
        "https://rde.example.org/yaml/kind_of_data"
    );
}

#[test]
fn test_property_order_follows_source() {
    let source = metadata_standard();
    let cache = SchemaLoader::new().load_resolved(source.path()).unwrap();

    let study = cache.get("https://rde.example.org/study?version=2").unwrap();
    let keys: Vec<&String> = study["properties"].as_object().unwrap().keys().collect();
    assert_eq!(keys, ["study_title", "study_doi", "kind_of_data"]);

    let top: Vec<&String> = study.as_object().unwrap().keys().collect();
    assert_eq!(
        top,
        ["$schema", "$id", "title", "type", "properties", "additionalProperties"]
    );
}

#[test]
fn test_unresolved_reference_fails_load() {
    let source = metadata_standard();
    write(
        source.path(),
        "schema/dangling.json",
        &json!({
            "$schema": DRAFT,
            "$id": "https://rde.example.org/dangling",
            "title": "Dangling",
            "properties": {"x": {"$ref": "https://rde.example.org/nowhere"}}
        })
        .to_string(),
    );

    let err = SchemaLoader::new().load_resolved(source.path()).unwrap_err();
    match err {
        LoaderError::UnresolvedReference { reference, .. } => {
            assert_eq!(reference, "https://rde.example.org/nowhere")
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_circular_reference_fails_load() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "schema/a.json",
        &json!({"$schema": DRAFT, "$id": "a", "title": "A", "properties": {"b": {"$ref": "b"}}}).to_string(),
    );
    write(
        dir.path(),
        "schema/b.json",
        &json!({"$schema": DRAFT, "$id": "b", "title": "B", "properties": {"a": {"$ref": "a"}}}).to_string(),
    );

    let err = SchemaLoader::new().load_resolved(dir.path()).unwrap_err();
    assert!(matches!(err, LoaderError::CircularReference { .. }));
}

#[test]
fn test_untitled_schema_fails_persist() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "schema/address.json",
        &json!({"$schema": DRAFT, "$id": "https://rde.example.org/address", "type": "object"}).to_string(),
    );

    let cache = SchemaLoader::new().load_resolved(dir.path()).unwrap();
    let out = tempdir().unwrap();
    let err = persist_cache(&cache, out.path(), DEFAULT_SCHEMA_STEM).unwrap_err();

    assert!(matches!(err, PublishError::MissingTitle { .. }));
    assert_eq!(
        err.to_string(),
        "Cannot persist schema because it does not contain a title element: https://rde.example.org/address"
    );
}
