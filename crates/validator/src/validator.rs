//! The public validation unit
//!
//! A [`Validator`] bundles a [`Schema`], an [`ErrorCatalog`] and a propex AST
//! cache. It is cheap to clone and can be embedded in another validator's
//! schema to validate a sub-shape on its own terms.

use crate::catalog::ErrorCatalog;
use crate::config::ValidatorConfig;
use crate::engine::Engine;
use crate::error::ValidateResult;
use crate::path::FieldPath;
use crate::result::ValidationResult;
use crate::rule::Rule;
use crate::schema::{Schema, SchemaEntry};
use propex::{Parser, PropexCache, PropexError, PropexNode};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Validates JSON data against a propex shape and a schema.
///
/// # Examples
///
/// ```
/// use propex_validator::{Rule, Validator};
/// use serde_json::json;
///
/// let validator = Validator::builder()
///     .rule("name", Rule::from_test(|v| {
///         (v != "roojoo").then(|| "Booooo. Bad kitty.".to_owned())
///     }))
///     .build();
///
/// let result = validator
///     .validate("{name,type}", &json!({"name": "roojoo", "type": "cat", "xtra": 1}))
///     .unwrap();
/// assert!(result.is_valid());
/// assert_eq!(result.valid, Some(json!({"name": "roojoo", "type": "cat"})));
///
/// let result = validator.validate("{name,type}", &json!({"type": "cat"})).unwrap();
/// assert_eq!(result.error_at("/name"), Some(&json!("This information is required")));
/// ```
#[derive(Clone)]
pub struct Validator {
    inner: Arc<Inner>,
}

struct Inner {
    schema: Schema,
    catalog: ErrorCatalog,
    cache: Option<PropexCache>,
    max_depth: usize,
}

impl Validator {
    /// Creates a validator for `schema` with default catalog and config.
    pub fn new(schema: Schema) -> Self {
        Self::builder().schema(schema).build()
    }

    /// Starts building a validator
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Validates `data` against the shape described by `propex`.
    ///
    /// Validation failures are reported in the returned result. `Err` means
    /// the propex is malformed or does not specify enough shape for `data`.
    pub fn validate(&self, propex: &str, data: &Value) -> ValidateResult<ValidationResult> {
        let node = self.parse(propex)?;
        self.validate_node(&node, data)
    }

    /// Validates `data` against an already parsed shape.
    pub fn validate_node(
        &self,
        node: &PropexNode,
        data: &Value,
    ) -> ValidateResult<ValidationResult> {
        let mut path = FieldPath::root();
        let result = self.evaluate_at(node, Some(data), &mut path)?;
        trace!(valid = result.is_valid(), "Validation finished");
        Ok(result)
    }

    /// Serializes `record` to JSON and validates it.
    pub fn validate_serialize<T>(
        &self,
        propex: &str,
        record: &T,
    ) -> ValidateResult<ValidationResult>
    where
        T: Serialize + ?Sized,
    {
        let node = self.parse(propex)?;
        let data = serde_json::to_value(record)?;
        self.validate_node(&node, &data)
    }

    /// Parses `propex`, going through the cache when enabled.
    pub fn parse(&self, propex: &str) -> Result<Arc<PropexNode>, PropexError> {
        match &self.inner.cache {
            Some(cache) => cache.get_or_parse(propex),
            None => Parser::new(propex)
                .with_max_depth(self.inner.max_depth)
                .parse()
                .map(Arc::new),
        }
    }

    /// Evaluates with this validator's schema and catalog, continuing `path`.
    pub(crate) fn evaluate_at<'n>(
        &self,
        node: &'n PropexNode,
        value: Option<&Value>,
        path: &mut FieldPath<'n>,
    ) -> ValidateResult<ValidationResult> {
        Engine::new(&self.inner.schema, &self.inner.catalog).evaluate(node, value, path)
    }

    /// Schema this validator applies
    pub fn schema(&self) -> &Schema {
        &self.inner.schema
    }

    /// Catalog used for default messages
    pub fn catalog(&self) -> &ErrorCatalog {
        &self.inner.catalog
    }

    /// Number of cached propex strings; zero when caching is disabled
    pub fn cache_len(&self) -> u64 {
        self.inner.cache.as_ref().map_or(0, PropexCache::len)
    }

    /// Drops all cached propex ASTs
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.inner.cache {
            cache.clear();
        }
    }
}

/// Identity validator: every declared field is required and copied through.
impl Default for Validator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("schema", &self.inner.schema)
            .field("catalog", &self.inner.catalog)
            .field("cache", &self.inner.cache)
            .finish()
    }
}

/// Builder for [`Validator`]
#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    schema: Schema,
    catalog: ErrorCatalog,
    config: ValidatorConfig,
}

impl ValidatorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole schema
    #[must_use = "builder methods must be chained or built"]
    pub fn schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Adds a leaf rule for `field`
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(self, field: impl Into<String>, rule: Rule) -> Self {
        self.entry(field, rule)
    }

    /// Adds a nested validator for `field`
    #[must_use = "builder methods must be chained or built"]
    pub fn nested(self, field: impl Into<String>, validator: Validator) -> Self {
        self.entry(field, validator)
    }

    /// Adds any schema entry for `field`
    #[must_use = "builder methods must be chained or built"]
    pub fn entry(mut self, field: impl Into<String>, entry: impl Into<SchemaEntry>) -> Self {
        self.schema.insert(field, entry);
        self
    }

    /// Sets the message catalog
    #[must_use = "builder methods must be chained or built"]
    pub fn catalog(mut self, catalog: ErrorCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets cache and parser configuration
    #[must_use = "builder methods must be chained or built"]
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Builds the validator
    pub fn build(self) -> Validator {
        let cache = self.config.cache.enabled.then(|| {
            PropexCache::with_capacity(self.config.cache.max_entries)
                .with_max_depth(self.config.max_depth)
        });

        Validator {
            inner: Arc::new(Inner {
                schema: self.schema,
                catalog: self.catalog,
                cache,
                max_depth: self.config.max_depth,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use serde_json::json;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_validator_is_send_sync() {
        assert_send_sync::<Validator>();
    }

    #[test]
    fn test_cache_is_used() {
        let validator = Validator::default();
        validator.validate("{a}", &json!({"a": 1})).unwrap();
        validator.validate("{a}", &json!({"a": 2})).unwrap();
        validator.validate("[]", &json!([])).unwrap();
        assert_eq!(validator.cache_len(), 2);

        validator.clear_cache();
        assert_eq!(validator.cache_len(), 0);
    }

    #[test]
    fn test_cache_disabled() {
        let validator = Validator::builder()
            .config(ValidatorConfig {
                cache: CacheConfig::disabled(),
                ..ValidatorConfig::default()
            })
            .build();
        let result = validator.validate("{a}", &json!({"a": 1})).unwrap();
        assert!(result.is_valid());
        assert_eq!(validator.cache_len(), 0);
    }

    #[test]
    fn test_max_depth_applies_without_cache() {
        let validator = Validator::builder()
            .config(ValidatorConfig {
                cache: CacheConfig::disabled(),
                max_depth: 1,
            })
            .build();
        let err = validator.validate("{a{b}}", &json!({})).unwrap_err();
        assert_eq!(err.code(), "PROPEX:TOO_DEEP");
    }

    #[test]
    fn test_syntax_error_before_data() {
        let err = Validator::default().validate("{a,}", &json!({"a": 1})).unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_validate_serialize() {
        #[derive(Serialize)]
        struct Pet<'a> {
            name: &'a str,
            kind: Option<&'a str>,
        }

        let result = Validator::default()
            .validate_serialize("{name,kind}", &Pet { name: "lace", kind: None })
            .unwrap();
        assert_eq!(result.valid, Some(json!({"name": "lace"})));
        assert_eq!(result.error_at("/kind"), Some(&json!("This information is required")));
    }

    #[test]
    fn test_debug() {
        let validator = Validator::builder().rule("name", Rule::new()).build();
        let debug = format!("{validator:?}");
        assert!(debug.contains("Validator"));
        assert!(debug.contains("name"));
    }
}
