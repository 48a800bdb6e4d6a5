//! Configuration types for validators

use propex::{DEFAULT_CACHE_CAPACITY, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};

/// Main configuration for a [`Validator`](crate::Validator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Propex AST cache
    pub cache: CacheConfig,
    /// Maximum bracket nesting accepted in propex strings
    pub max_depth: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ValidatorConfig {
    /// Create a new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a production configuration
    pub fn production() -> Self {
        Self {
            cache: CacheConfig::production(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a development configuration
    pub fn development() -> Self {
        Self {
            cache: CacheConfig::disabled(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether parsed propex strings are cached
    pub enabled: bool,
    /// Maximum number of cached propex strings
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl CacheConfig {
    /// Production configuration
    pub fn production() -> Self {
        Self {
            enabled: true,
            max_entries: 4096,
        }
    }

    /// Every call parses its propex
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}
