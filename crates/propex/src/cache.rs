//! Thread-safe cache of parsed Propex ASTs
//!
//! The mapping from Propex string to AST is referentially stable, so parsed
//! trees are memoized by source text and shared behind an `Arc`. The cache is
//! bounded and uses `moka` for lock-free concurrent lookups.

use crate::ast::PropexNode;
use crate::error::PropexResult;
use crate::parser::{DEFAULT_MAX_DEPTH, Parser};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Default cache capacity (256 distinct Propex strings)
pub const DEFAULT_CACHE_CAPACITY: u64 = 256;

/// Bounded, content-addressed cache from Propex source to AST.
///
/// Parse failures are never cached.
#[derive(Clone)]
pub struct PropexCache {
    entries: moka::sync::Cache<String, Arc<PropexNode>>,
    max_depth: usize,
}

impl PropexCache {
    /// Creates a cache with default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` ASTs.
    pub fn with_capacity(capacity: u64) -> Self {
        Self {
            entries: moka::sync::Cache::builder().max_capacity(capacity).build(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the nesting limit used when parsing on a miss.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the cached AST for `source`, parsing and storing it on a miss.
    ///
    /// Concurrent misses on the same key parse only once.
    pub fn get_or_parse(&self, source: &str) -> PropexResult<Arc<PropexNode>> {
        if let Some(node) = self.entries.get(source) {
            trace!(propex = source, "Propex cache hit");
            return Ok(node);
        }

        self.entries
            .try_get_with(source.to_owned(), || -> PropexResult<Arc<PropexNode>> {
                let node = Parser::new(source).with_max_depth(self.max_depth).parse()?;
                debug!(propex = source, depth = node.depth(), "Parsed propex");
                Ok(Arc::new(node))
            })
            .map_err(|err| (*err).clone())
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }

    /// Returns true when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the cache capacity.
    pub fn capacity(&self) -> u64 {
        self.entries.policy().max_capacity().unwrap_or(0)
    }

    /// Nesting limit applied to parses.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Clears the cache.
    pub fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
        debug!("Propex cache cleared");
    }
}

impl Default for PropexCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PropexCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropexCache")
            .field("capacity", &self.capacity())
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropexError;

    #[test]
    fn test_cache_miss_then_hit() {
        let cache = PropexCache::new();
        assert!(cache.is_empty());

        let first = cache.get_or_parse("{name,type}").unwrap();
        let second = cache.get_or_parse("{name,type}").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_strings_are_distinct_entries() {
        let cache = PropexCache::new();
        cache.get_or_parse("{a}").unwrap();
        cache.get_or_parse("{ a }").unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = PropexCache::new();
        let err = cache.get_or_parse("{a").unwrap_err();
        assert_eq!(err, PropexError::Unclosed { open: '{', offset: 0 });
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear() {
        let cache = PropexCache::new();
        cache.get_or_parse("[]").unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_and_depth() {
        let cache = PropexCache::with_capacity(8).with_max_depth(2);
        assert_eq!(cache.capacity(), 8);
        assert_eq!(cache.get_or_parse("[[]]").unwrap().depth(), 2);
        assert_eq!(cache.get_or_parse("[[[]]]").unwrap_err().code(), "PROPEX:TOO_DEEP");
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = PropexCache::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.get_or_parse("{people{name,phone}}").unwrap())
            })
            .collect();

        let nodes: Vec<Arc<PropexNode>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(nodes.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(cache.len(), 1);
    }
}
