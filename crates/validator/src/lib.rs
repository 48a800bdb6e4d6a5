//! # propex-validator
//!
//! Validates JSON data against a Propex shape and a per-field schema of rules.
//!
//! Validation produces two parallel trees. `valid` holds the data that passed,
//! restricted to the fields the propex names. `errors` mirrors the same shape
//! and holds a message wherever something failed.
//!
//! ## Quick Start
//!
//! ```
//! use propex_validator::prelude::*;
//! use serde_json::json;
//!
//! let validator = Validator::builder()
//!     .rule("name", Rule::from_test(|value| {
//!         let name = value.as_str().unwrap_or_default();
//!         (name.chars().count() < 4).then(|| format!("Dude, {name}, your name is too short!"))
//!     }))
//!     .build();
//!
//! let result = validator.validate("{name}", &json!({"name": "Ed"})).unwrap();
//! assert_eq!(result.valid, Some(json!({})));
//! assert_eq!(result.error_at("/name"), Some(&json!("Dude, Ed, your name is too short!")));
//! ```
//!
//! ## Schema entries
//!
//! - [`Rule`]: an optional `test` returning a failure message and an optional
//!   `set` that writes the accepted value. Fields without an entry are
//!   required and copied through unchanged.
//! - [`Validator`]: a nested validator that takes over a structured field,
//!   using its own schema for that subtree.
//!
//! ## Errors
//!
//! Data that fails validation is never an `Err`. [`ValidateError`] is reserved
//! for malformed propex strings and for non-empty arrays whose element shape
//! the propex leaves unspecified.

pub mod catalog;
pub mod config;
mod engine;
pub mod error;
mod path;
pub mod prelude;
pub mod resolve;
pub mod result;
pub mod rule;
pub mod schema;
pub mod validator;

pub use catalog::{DEFAULT_REQUIRED_MESSAGE, ErrorCatalog};
pub use config::{CacheConfig, ValidatorConfig};
pub use error::{ValidateError, ValidateResult};
pub use result::ValidationResult;
pub use rule::{FieldContext, Rule};
pub use schema::{Schema, SchemaEntry};
pub use validator::{Validator, ValidatorBuilder};

pub use propex::{FieldSpec, PropexError, PropexNode};
