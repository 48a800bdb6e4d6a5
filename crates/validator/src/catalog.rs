//! Default error messages
//!
//! [`ErrorCatalog`] is an explicit configuration object injected into each
//! [`Validator`](crate::Validator). Replace a factory to change wording
//! without touching the engine.

use std::fmt;
use std::sync::Arc;

/// Message used when a required field or container is missing.
pub const DEFAULT_REQUIRED_MESSAGE: &str = "This information is required";

type MessageFactory = dyn Fn() -> String + Send + Sync;

/// Table of overridable error-message factories.
///
/// # Examples
///
/// ```
/// use propex_validator::ErrorCatalog;
///
/// assert_eq!(ErrorCatalog::default().required(), "This information is required");
///
/// let catalog = ErrorCatalog::default().with_required_message("Pflichtfeld");
/// assert_eq!(catalog.required(), "Pflichtfeld");
/// ```
#[derive(Clone)]
pub struct ErrorCatalog {
    required: Arc<MessageFactory>,
}

impl ErrorCatalog {
    /// Creates a catalog with the default messages.
    pub fn new() -> Self {
        Self {
            required: Arc::new(|| DEFAULT_REQUIRED_MESSAGE.to_owned()),
        }
    }

    /// Replaces the `required` factory.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_required<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.required = Arc::new(factory);
        self
    }

    /// Replaces the `required` factory with a fixed message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_required_message(self, message: impl Into<String>) -> Self {
        let message: Arc<str> = Arc::from(message.into());
        self.with_required(move || message.to_string())
    }

    /// Message for a missing field or a container of the wrong kind.
    pub fn required(&self) -> String {
        (self.required)()
    }
}

impl Default for ErrorCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ErrorCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorCatalog")
            .field("required", &self.required())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_default_required() {
        assert_eq!(ErrorCatalog::default().required(), DEFAULT_REQUIRED_MESSAGE);
    }

    #[test]
    fn test_override_does_not_touch_other_instances() {
        let custom = ErrorCatalog::new().with_required_message("Needed");
        assert_eq!(custom.required(), "Needed");
        assert_eq!(ErrorCatalog::new().required(), DEFAULT_REQUIRED_MESSAGE);
    }

    #[test]
    fn test_factory_called_per_message() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let catalog = ErrorCatalog::new().with_required(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            format!("required #{n}")
        });

        assert_eq!(catalog.required(), "required #0");
        assert_eq!(catalog.required(), "required #1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clone_shares_factory() {
        let catalog = ErrorCatalog::new().with_required_message("Needed");
        let cloned = catalog.clone();
        assert_eq!(cloned.required(), "Needed");
    }
}
