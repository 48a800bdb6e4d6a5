//! # propex
//!
//! Parser for Propex, a compact bracket/comma language describing the
//! expected shape of nested JSON-like data and which of its fields are
//! required.
//!
//! ## Quick Start
//!
//! ```
//! use propex::{PropexCache, parse};
//!
//! let node = parse("{name, people[{name, phone}]}").unwrap();
//! assert_eq!(node.fields().len(), 2);
//!
//! // Parsed trees are memoized by source text.
//! let cache = PropexCache::new();
//! let a = cache.get_or_parse("{name}").unwrap();
//! let b = cache.get_or_parse("{name}").unwrap();
//! assert!(std::sync::Arc::ptr_eq(&a, &b));
//! ```

pub mod ast;
pub mod cache;
pub mod error;
pub mod parser;

pub use ast::{FieldSpec, PropexNode};
pub use cache::{DEFAULT_CACHE_CAPACITY, PropexCache};
pub use error::{PropexError, PropexResult};
pub use parser::{DEFAULT_MAX_DEPTH, Parser, parse};
