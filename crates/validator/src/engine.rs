//! Recursive evaluation of a propex AST against data
//!
//! The engine walks an AST node and a JSON value together and builds the
//! `valid` / `errors` trees. Leaf fields go through the rule resolver;
//! structured fields recurse, or hand off to a nested [`Validator`] when the
//! schema names one.
//!
//! A missing key and an explicit `null` are both treated as absent.

use crate::catalog::ErrorCatalog;
use crate::error::{ValidateError, ValidateResult};
use crate::path::FieldPath;
use crate::resolve::{Resolution, default_rule, resolve};
use crate::result::ValidationResult;
use crate::rule::FieldContext;
use crate::schema::Schema;
use propex::{FieldSpec, PropexNode};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Evaluator bound to one schema and catalog
pub(crate) struct Engine<'s> {
    schema: &'s Schema,
    catalog: &'s ErrorCatalog,
}

impl<'s> Engine<'s> {
    pub(crate) fn new(schema: &'s Schema, catalog: &'s ErrorCatalog) -> Self {
        Self { schema, catalog }
    }

    /// Evaluates `node` against `value` (`None` when the data is absent).
    pub(crate) fn evaluate<'n>(
        &self,
        node: &'n PropexNode,
        value: Option<&Value>,
        path: &mut FieldPath<'n>,
    ) -> ValidateResult<ValidationResult> {
        match node {
            PropexNode::Object(fields) => self.evaluate_object(fields, value, path),
            PropexNode::Array(element) => self.evaluate_array(element.as_deref(), value, path),
        }
    }

    fn evaluate_object<'n>(
        &self,
        fields: &'n [FieldSpec],
        value: Option<&Value>,
        path: &mut FieldPath<'n>,
    ) -> ValidateResult<ValidationResult> {
        let Some(Value::Object(map)) = value else {
            trace!(path = %path, "Expected an object");
            return Ok(ValidationResult::failure(self.catalog.required()));
        };

        let mut valid = Map::new();
        let mut errors = Map::new();

        for field in fields {
            let name = field.name();
            let raw = map.get(name).filter(|raw| !raw.is_null());
            path.push_field(name);

            match (field.shape(), raw) {
                (_, None) => {
                    errors.insert(name.to_owned(), Value::String(self.catalog.required()));
                }
                (Some(shape), Some(raw)) => {
                    let result = match resolve(self.schema, name) {
                        Resolution::Nested(validator) => {
                            trace!(path = %path, "Delegating to nested validator");
                            validator.evaluate_at(shape, Some(raw), path)?
                        }
                        Resolution::Rule(rule) => {
                            if !std::ptr::eq(rule, default_rule()) {
                                debug!(path = %path, "Rule on a structured field is ignored");
                            }
                            self.evaluate(shape, Some(raw), path)?
                        }
                    };
                    result.splice_into(name, &mut valid, &mut errors);
                }
                (None, Some(raw)) => {
                    let resolution = resolve(self.schema, name);
                    if resolution.is_nested() {
                        debug!(path = %path, "Nested validator on a leaf field, applying the default rule");
                    }

                    let rule = resolution.rule();
                    match rule.check(raw) {
                        Some(message) => {
                            errors.insert(name.to_owned(), Value::String(message));
                        }
                        None => rule.assign(&FieldContext::new(name, raw), &mut valid),
                    }
                }
            }

            path.pop();
        }

        trace!(path = %path, failed = errors.len(), passed = valid.len(), "Evaluated object");
        Ok(ValidationResult::object(valid, errors))
    }

    fn evaluate_array<'n>(
        &self,
        element: Option<&'n PropexNode>,
        value: Option<&Value>,
        path: &mut FieldPath<'n>,
    ) -> ValidateResult<ValidationResult> {
        let Some(Value::Array(items)) = value else {
            trace!(path = %path, "Expected an array");
            return Ok(ValidationResult::failure(self.catalog.required()));
        };

        if items.is_empty() {
            return Ok(ValidationResult::passed(Value::Array(Vec::new())));
        }

        let Some(element) = element else {
            debug!(path = %path, len = items.len(), "Array shape not specified for non-empty data");
            return Err(ValidateError::shape_not_specified(
                path.to_string(),
                items.len(),
            ));
        };

        let mut valid = Vec::with_capacity(items.len());
        let mut errors = Vec::with_capacity(items.len());
        let mut failed = false;

        for (index, item) in items.iter().enumerate() {
            path.push_index(index);
            let result = self.evaluate(element, Some(item), path)?;
            path.pop();

            valid.push(result.valid.unwrap_or(Value::Null));
            failed |= result.errors.is_some();
            errors.push(result.errors.unwrap_or(Value::Null));
        }

        trace!(path = %path, len = items.len(), failed, "Evaluated array");
        Ok(ValidationResult {
            valid: Some(Value::Array(valid)),
            errors: failed.then_some(Value::Array(errors)),
        })
    }
}
