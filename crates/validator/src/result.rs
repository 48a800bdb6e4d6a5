//! Output of a validation call

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Parallel `valid` / `errors` trees mirroring the validated data.
///
/// - Root failure (missing data or wrong container kind): `errors` is a
///   string and `valid` is `None`.
/// - Otherwise `valid` is a container of the passing fields and elements,
///   and `errors` is a container of only the failing branches, or `None`
///   when nothing failed.
///
/// Array outputs have one slot per input element; slots without a value
/// hold `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    /// Passing branches
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<Value>,

    /// Failing branches, or a message when the whole input failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
}

impl ValidationResult {
    /// Whole-branch failure with `message`
    pub(crate) fn failure(message: String) -> Self {
        Self {
            valid: None,
            errors: Some(Value::String(message)),
        }
    }

    pub(crate) fn passed(valid: Value) -> Self {
        Self {
            valid: Some(valid),
            errors: None,
        }
    }

    pub(crate) fn object(valid: Map<String, Value>, errors: Map<String, Value>) -> Self {
        Self {
            valid: Some(Value::Object(valid)),
            errors: (!errors.is_empty()).then_some(Value::Object(errors)),
        }
    }

    /// Writes this branch under `name` in the parent's output maps.
    pub(crate) fn splice_into(
        self,
        name: &str,
        valid: &mut Map<String, Value>,
        errors: &mut Map<String, Value>,
    ) {
        if let Some(value) = self.valid {
            valid.insert(name.to_owned(), value);
        }
        if let Some(error) = self.errors {
            errors.insert(name.to_owned(), error);
        }
    }

    /// True when no branch failed
    pub fn is_valid(&self) -> bool {
        self.errors.is_none()
    }

    /// The message when the whole input failed its root check
    pub fn error_message(&self) -> Option<&str> {
        self.errors.as_ref().and_then(Value::as_str)
    }

    /// Error at a JSON pointer (`/nested/1/something`); `null` holes read as `None`
    pub fn error_at(&self, pointer: &str) -> Option<&Value> {
        self.errors
            .as_ref()?
            .pointer(pointer)
            .filter(|value| !value.is_null())
    }

    /// Valid value at a JSON pointer
    pub fn valid_at(&self, pointer: &str) -> Option<&Value> {
        self.valid.as_ref()?.pointer(pointer)
    }

    /// `Ok(valid)` when nothing failed, otherwise `Err(errors)`
    pub fn into_result(self) -> Result<Value, Value> {
        match self.errors {
            None => Ok(self.valid.unwrap_or(Value::Null)),
            Some(errors) => Err(errors),
        }
    }

    /// Deserializes the valid tree into a typed record.
    ///
    /// Only the passing fields are present, so use `Option` or
    /// `#[serde(default)]` for fields that may have failed.
    pub fn deserialize_valid<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(self.valid.as_ref().unwrap_or(&Value::Null))
    }
}
