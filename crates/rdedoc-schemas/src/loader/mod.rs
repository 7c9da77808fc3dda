//! Schema cache loading and `$ref` dereferencing
//!
//! This module provides:
//! - JSON and YAML parsing, with markdown line breaks for YAML note fields
//! - An identifier-keyed cache of schema fragments
//! - Recursive `$ref` resolution against that cache
//! - Circular reference detection
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use rdedoc_schemas::loader::SchemaLoader;
//! use std::path::Path;
//!
//! let loader = SchemaLoader::new();
//! let cache = loader.load_resolved(Path::new("metadata-standard"))?;
//! for entry in cache.iter() {
//!     println!("{}: {:?}", entry.id, entry.title());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

pub mod cache;
pub mod error;
pub mod parser;
pub mod resolver;
pub mod schema_loader;

pub use cache::{CacheEntry, CacheStats, SchemaCache};
pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
pub use resolver::{ReferenceResolver, ResolverContext};
pub use schema_loader::{LoaderConfig, SchemaLoader};
