//! RDE Documentation Schemas - schema cache, dereferencing and documentation builds
//!
//! This crate turns a tree of JSON Schema fragments (JSON files plus YAML
//! vocabularies) that reference each other through `$ref` into
//! self-contained documents, and drives the tools that publish them:
//! - **Loading**: every fragment carrying `$schema` is indexed by its `$id`
//! - **Dereferencing**: `$ref` markers are replaced by the merged contents of
//!   their targets, recursively, with cycle detection
//! - **Persistence**: titled documents are written as versioned JSON
//! - **Documentation**: markdown generation, post-processing and the static
//!   site build
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rdedoc_schemas::{DocGenerator, SystemRunner};
//! use std::path::Path;
//!
//! let runner = SystemRunner;
//! let report = DocGenerator::new(&runner).build(Path::new("metadata-standard"))?;
//! println!("Resolved schema written to {}", report.persisted.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Reference Semantics
//!
//! A mapping `{"$ref": "X", "a": 1}` resolves to the keys of `X` merged with
//! `a`. When both define the same key, the one written later in the source
//! mapping wins, and the key keeps the position where it first appeared.
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

pub mod documentation;
pub mod loader;
pub mod workspace;

// Re-export commonly used types for convenience
pub use documentation::{
    BuildError, BuildReport, BuildStage, CommandRunner, DocGenerator, GeneratorConfig, LabelStyle,
    MarkdownPostProcessor, PublishError, PublishResult, SiteConfig, SystemRunner,
};
pub use loader::{
    LoaderConfig, LoaderError, LoaderResult, ReferenceResolver, SchemaCache, SchemaLoader,
};
pub use workspace::WorkDir;
