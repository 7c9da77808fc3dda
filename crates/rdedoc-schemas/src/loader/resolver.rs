//! `$ref` resolution against the schema cache
//!
//! References are plain cache lookups: the value of a `$ref` key is the
//! `$id` of another cached fragment. The resolved target is merged into the
//! mapping that held the reference, so sibling keys survive next to the
//! inlined content.
//!
//! Copyright (c) 2025 RDE Documentation Team
//! Licensed under the Apache-2.0 license

use crate::loader::cache::SchemaCache;
use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Key that marks a reference
pub const REF_KEY: &str = "$ref";

/// Default limit on nested reference expansion
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Context for a single resolution
#[derive(Debug, Clone)]
pub struct ResolverContext {
    /// Identifiers currently being expanded, outermost first
    pub chain: Vec<String>,
    /// Maximum length of the expansion chain
    pub max_depth: usize,
    /// Number of references expanded so far
    pub references_resolved: usize,
}

impl ResolverContext {
    /// Create a context for resolving a value that is not itself a cache entry
    pub fn new() -> Self {
        Self {
            chain: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            references_resolved: 0,
        }
    }

    /// Create a context for resolving the cache entry `id`
    pub fn for_root(id: &str) -> Self {
        let mut context = Self::new();
        context.chain.push(id.to_string());
        context
    }

    /// Set the maximum expansion depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enter a reference, failing if it is already being expanded
    pub fn push_reference(&mut self, id: &str) -> LoaderResult<()> {
        if self.chain.iter().any(|entered| entered == id) {
            let mut chain = self.chain.clone();
            chain.push(id.to_string());
            return Err(LoaderError::circular_reference(&chain));
        }

        if self.chain.len() >= self.max_depth {
            let mut chain = self.chain.clone();
            chain.push(id.to_string());
            return Err(LoaderError::resolution_depth_exceeded(self.max_depth, &chain));
        }

        self.chain.push(id.to_string());
        Ok(())
    }

    /// Leave the innermost reference
    pub fn pop_reference(&mut self) -> Option<String> {
        self.chain.pop()
    }

    /// Identifier of the fragment currently being expanded
    pub fn referrer(&self) -> &str {
        self.chain.last().map(String::as_str).unwrap_or("<root>")
    }
}

impl Default for ResolverContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursive `$ref` resolver
#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    max_depth: usize,
}

impl ReferenceResolver {
    /// Create a resolver with the default depth limit
    pub fn new() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create a resolver with a custom depth limit
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Resolve a standalone value against the cache
    pub fn resolve_value(&self, value: &Value, cache: &SchemaCache) -> LoaderResult<Value> {
        let mut context = ResolverContext::new().with_max_depth(self.max_depth);
        self.resolve(value, cache, &mut context)
    }

    /// Resolve every reference in `value`.
    ///
    /// Mappings are rebuilt key by key in their original order. A `$ref` key
    /// contributes the keys of its resolved target; any other key contributes
    /// its resolved value. Later insertions overwrite earlier ones, and an
    /// overwritten key keeps the position it was first inserted at.
    pub fn resolve(
        &self,
        value: &Value,
        cache: &SchemaCache,
        context: &mut ResolverContext,
    ) -> LoaderResult<Value> {
        match value {
            Value::Object(obj) => {
                let mut resolved = Map::new();
                for (key, val) in obj {
                    if key == REF_KEY {
                        let target = self.resolve_reference(val, cache, context)?;
                        for (target_key, target_value) in target {
                            resolved.insert(target_key, target_value);
                        }
                    } else {
                        resolved.insert(key.clone(), self.resolve(val, cache, context)?);
                    }
                }
                Ok(Value::Object(resolved))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.resolve(item, cache, context))
                .collect::<LoaderResult<Vec<_>>>()
                .map(Value::Array),
            scalar => Ok(scalar.clone()),
        }
    }

    fn resolve_reference(
        &self,
        reference: &Value,
        cache: &SchemaCache,
        context: &mut ResolverContext,
    ) -> LoaderResult<Map<String, Value>> {
        let Some(id) = reference.as_str() else {
            return Err(LoaderError::unresolved_reference(
                reference.to_string(),
                context.referrer(),
                "$ref value must be a string identifier",
            ));
        };

        let target = cache.get(id).ok_or_else(|| {
            LoaderError::unresolved_reference(id, context.referrer(), "identifier is not in the cache")
        })?;

        trace!(reference = id, referrer = context.referrer(), "Expanding reference");
        context.push_reference(id)?;
        let resolved = self.resolve(target, cache, context);
        context.pop_reference();
        context.references_resolved += 1;

        match resolved? {
            Value::Object(map) => Ok(map),
            other => Err(LoaderError::invalid_reference_target(id, value_kind(&other))),
        }
    }

    /// Replace every cached fragment with its resolved document.
    ///
    /// Entries are processed in load order; returns the number of references
    /// expanded across the whole cache.
    pub fn dereference(&self, cache: &mut SchemaCache) -> LoaderResult<usize> {
        let ids: Vec<String> = cache.ids().map(str::to_string).collect();
        let mut total = 0;

        for id in ids {
            debug!(schema = %id, "Dereferencing $ref values in schema");
            let Some(content) = cache.get(&id) else {
                continue;
            };

            let mut context = ResolverContext::for_root(&id).with_max_depth(self.max_depth);
            let resolved = self.resolve(content, cache, &mut context)?;
            total += context.references_resolved;
            cache.replace(&id, resolved);
        }

        Ok(total)
    }
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
