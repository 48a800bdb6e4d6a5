//! Schema configuration: field name to rule or nested validator

use crate::rule::Rule;
use crate::validator::Validator;
use indexmap::IndexMap;
use std::fmt;

/// What a schema says about one field.
///
/// Decided when the schema is built, never inferred during validation.
#[derive(Clone)]
pub enum SchemaEntry {
    /// Test/set pair for a leaf field
    Rule(Rule),
    /// Self-contained validator for a structured field
    Nested(Validator),
}

impl From<Rule> for SchemaEntry {
    fn from(rule: Rule) -> Self {
        Self::Rule(rule)
    }
}

impl From<Validator> for SchemaEntry {
    fn from(validator: Validator) -> Self {
        Self::Nested(validator)
    }
}

impl fmt::Debug for SchemaEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(rule) => f.debug_tuple("Rule").field(rule).finish(),
            Self::Nested(validator) => f.debug_tuple("Nested").field(validator).finish(),
        }
    }
}

/// Mapping from field name to [`SchemaEntry`].
///
/// Fields without an entry get the default rule (required, passthrough).
///
/// # Examples
///
/// ```
/// use propex_validator::{Rule, Schema, Validator};
///
/// let schema = Schema::new()
///     .with("name", Rule::from_test(|v| v.as_str().is_none().then(|| "Text expected".into())))
///     .with("people", Validator::default());
///
/// assert_eq!(schema.len(), 2);
/// assert!(schema.get("type").is_none());
/// ```
#[derive(Clone, Default)]
pub struct Schema {
    entries: IndexMap<String, SchemaEntry>,
}

impl Schema {
    /// Creates an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, builder style
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, field: impl Into<String>, entry: impl Into<SchemaEntry>) -> Self {
        self.insert(field, entry);
        self
    }

    /// Adds or replaces an entry, returning the previous one
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        entry: impl Into<SchemaEntry>,
    ) -> Option<SchemaEntry> {
        self.entries.insert(field.into(), entry.into())
    }

    /// Entry configured for `field`
    pub fn get(&self, field: &str) -> Option<&SchemaEntry> {
        self.entries.get(field)
    }

    /// Field names in insertion order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of configured fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no field is configured
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, E> FromIterator<(K, E)> for Schema
where
    K: Into<String>,
    E: Into<SchemaEntry>,
{
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(field, entry)| (field.into(), entry.into()))
                .collect(),
        }
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}
