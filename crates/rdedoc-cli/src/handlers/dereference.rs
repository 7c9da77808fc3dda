//! Dereference command handler

use crate::cli::DereferenceArgs;
use crate::config::Config;
use crate::error::Result;
use crate::handlers::utils::require_source_dir;
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use rdedoc_schemas::documentation::{persist_cache, PublishError};
use rdedoc_schemas::{SchemaCache, SchemaLoader};
use serde_json::{Map, Value};

/// Handle the dereference command
pub fn handle_dereference(
    args: DereferenceArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let source_dir = require_source_dir(&args.source_dir)?;
    let loader = SchemaLoader::with_config(config.loader_config());

    let spinner = output.spinner("Loading and resolving schemas");
    let cache = {
        let _timer = Timer::with_details("dereference", &source_dir.display().to_string());
        loader.load_resolved(&source_dir)
    };
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let cache = cache?;

    match args.out_dir {
        Some(out_dir) => {
            let last = persist_cache(&cache, &out_dir, &config.output.schema_stem)?;
            output.success(&format!("✓ Resolved schemas written, last: {}", last.display()))?;
            output.section("Schema Cache")?;
            output.cache_stats(&cache.stats())
        }
        None => output.data(&titled_documents(&cache)?),
    }
}

/// Titled resolved documents keyed by identifier, in load order.
///
/// Untitled vocabularies are left out; any other untitled schema is an error.
fn titled_documents(cache: &SchemaCache) -> Result<Map<String, Value>> {
    let mut documents = Map::new();
    for entry in cache.iter() {
        if entry.title().is_some() {
            documents.insert(entry.id.clone(), entry.content.clone());
        } else if !entry.is_vocabulary() {
            return Err(PublishError::missing_title(entry.id.clone()).into());
        }
    }
    Ok(documents)
}
