//! Leaf-field rules
//!
//! A [`Rule`] pairs an optional `test` (pass/fail with a message) with an
//! optional `set` (how a passing value is written to the valid output).
//! Missing halves fall back to always-pass and passthrough-assign.

use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

type TestFn = dyn Fn(&Value) -> Option<String> + Send + Sync;
type SetFn = dyn Fn(&FieldContext<'_>, &mut Map<String, Value>) + Send + Sync;

/// Field being written by a rule's `set`.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    /// Name of the field as declared in the propex
    pub field_name: &'a str,
    /// Input value that passed the rule's test
    pub raw_value: &'a Value,
}

impl<'a> FieldContext<'a> {
    /// Creates a context for `field_name`
    pub fn new(field_name: &'a str, raw_value: &'a Value) -> Self {
        Self {
            field_name,
            raw_value,
        }
    }
}

/// Test and assignment logic for a leaf field.
///
/// # Examples
///
/// ```
/// use propex_validator::{FieldContext, Rule};
/// use serde_json::{Map, Value, json};
///
/// let rule = Rule::new()
///     .with_test(|value: &Value| match value.as_str() {
///         Some(s) if s.len() >= 4 => None,
///         _ => Some("Too short".to_owned()),
///     })
///     .with_set(|ctx: &FieldContext<'_>, valid: &mut Map<String, Value>| {
///         let text = ctx.raw_value.as_str().unwrap_or_default().to_uppercase();
///         valid.insert(ctx.field_name.to_owned(), Value::String(text));
///     });
///
/// assert_eq!(rule.check(&json!("Ed")), Some("Too short".to_owned()));
///
/// let mut valid = Map::new();
/// let raw = json!("Nicole");
/// rule.assign(&FieldContext::new("name", &raw), &mut valid);
/// assert_eq!(valid["name"], json!("NICOLE"));
/// ```
#[derive(Clone, Default)]
pub struct Rule {
    test: Option<Arc<TestFn>>,
    set: Option<Arc<SetFn>>,
}

impl Rule {
    /// Always-pass test with passthrough assignment.
    pub const fn passthrough() -> Self {
        Self {
            test: None,
            set: None,
        }
    }

    /// Same as [`Rule::passthrough`]; start point for the builder methods.
    pub const fn new() -> Self {
        Self::passthrough()
    }

    /// Rule with only a test.
    pub fn from_test<F>(test: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        Self::new().with_test(test)
    }

    /// Sets the test. Returning `Some(message)` fails the field.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_test<F>(mut self, test: F) -> Self
    where
        F: Fn(&Value) -> Option<String> + Send + Sync + 'static,
    {
        self.test = Some(Arc::new(test));
        self
    }

    /// Sets how a passing value is stored in the valid output.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_set<F>(mut self, set: F) -> Self
    where
        F: Fn(&FieldContext<'_>, &mut Map<String, Value>) + Send + Sync + 'static,
    {
        self.set = Some(Arc::new(set));
        self
    }

    /// Runs the test; `None` means the value passed.
    pub fn check(&self, value: &Value) -> Option<String> {
        self.test.as_ref().and_then(|test| test(value))
    }

    /// Writes a passing value into `valid`.
    pub fn assign(&self, ctx: &FieldContext<'_>, valid: &mut Map<String, Value>) {
        match &self.set {
            Some(set) => set(ctx, valid),
            None => {
                valid.insert(ctx.field_name.to_owned(), ctx.raw_value.clone());
            }
        }
    }

    /// Returns true when a custom test is configured
    pub fn has_test(&self) -> bool {
        self.test.is_some()
    }

    /// Returns true when a custom set is configured
    pub fn has_set(&self) -> bool {
        self.set.is_some()
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("test", &self.test.as_ref().map(|_| "<function>"))
            .field("set", &self.set.as_ref().map(|_| "<function>"))
            .finish()
    }
}
