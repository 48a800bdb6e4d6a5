//! Rule resolution
//!
//! Maps a field name to the logic that validates it: an explicit rule, a
//! nested validator, or the default rule when the schema is silent.

use crate::rule::Rule;
use crate::schema::{Schema, SchemaEntry};
use crate::validator::Validator;

static DEFAULT_RULE: Rule = Rule::passthrough();

/// Outcome of resolving a field against a schema.
#[derive(Debug, Clone, Copy)]
pub enum Resolution<'a> {
    /// Explicit or default leaf rule
    Rule(&'a Rule),
    /// Validator that takes over the field's whole sub-shape
    Nested(&'a Validator),
}

impl<'a> Resolution<'a> {
    /// The leaf rule to apply; nested validators fall back to the default rule.
    pub fn rule(&self) -> &'a Rule {
        match *self {
            Self::Rule(rule) => rule,
            Self::Nested(_) => default_rule(),
        }
    }

    /// Returns true for nested validators
    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }
}

/// Shared always-pass, passthrough-assign rule.
pub fn default_rule() -> &'static Rule {
    &DEFAULT_RULE
}

/// Resolves `field_name` against `schema`. Never mutates the schema.
pub fn resolve<'a>(schema: &'a Schema, field_name: &str) -> Resolution<'a> {
    match schema.get(field_name) {
        Some(SchemaEntry::Nested(validator)) => Resolution::Nested(validator),
        Some(SchemaEntry::Rule(rule)) => Resolution::Rule(rule),
        None => Resolution::Rule(default_rule()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Schema {
        Schema::new()
            .with("name", Rule::from_test(|_| Some("nope".to_owned())))
            .with("people", Validator::default())
    }

    #[test]
    fn test_explicit_rule() {
        let schema = schema();
        let resolution = resolve(&schema, "name");
        assert!(!resolution.is_nested());
        assert_eq!(resolution.rule().check(&json!("x")).as_deref(), Some("nope"));
    }

    #[test]
    fn test_nested_validator() {
        let schema = schema();
        assert!(resolve(&schema, "people").is_nested());
        // leaf use of a nested entry falls back to the default rule
        assert_eq!(resolve(&schema, "people").rule().check(&json!(1)), None);
    }

    #[test]
    fn test_absent_gets_default() {
        let schema = schema();
        let rule = resolve(&schema, "type").rule();
        assert!(std::ptr::eq(rule, default_rule()));
        assert!(!rule.has_test());
        assert!(!rule.has_set());
    }
}
