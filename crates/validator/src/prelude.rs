//! Prelude module for convenient imports.
//!
//! ```
//! use propex_validator::prelude::*;
//!
//! let validator = Validator::builder().rule("name", Rule::new()).build();
//! assert_eq!(validator.schema().len(), 1);
//! ```

pub use crate::catalog::ErrorCatalog;
pub use crate::config::{CacheConfig, ValidatorConfig};
pub use crate::error::{ValidateError, ValidateResult};
pub use crate::result::ValidationResult;
pub use crate::rule::{FieldContext, Rule};
pub use crate::schema::{Schema, SchemaEntry};
pub use crate::validator::{Validator, ValidatorBuilder};

pub use propex::{PropexError, PropexNode};
