//! Documentation production from resolved schemas
//!
//! Takes a dereferenced [`SchemaCache`](crate::loader::SchemaCache) and turns
//! it into a published documentation site: the titled schema is written to a
//! working directory, an external generator renders it to markdown, the
//! markdown is post-processed and a static site builder produces HTML.
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod generator;
pub mod markdown;
pub mod persist;
pub mod site;
pub mod tools;

pub use error::{BuildError, PublishError, PublishResult};
pub use generator::{BuildReport, BuildStage, DocGenerator, GeneratorConfig};
pub use markdown::{LabelContext, LabelStyle, MarkdownPostProcessor, MarkdownReport};
pub use persist::{persist_cache, schema_version, strip_nested_identifiers, DEFAULT_SCHEMA_STEM};
pub use site::{copy_theme, DocsLayout, ResolvedLayout, SiteConfig, ThemeConfig};
pub use tools::{CommandRunner, Invocation, SystemRunner, ToolOutcome};
