//! # View Registry
//!
//! Views are self-contained UI units addressed by name. The descriptor's
//! `component` field is untrusted input, so resolution goes through a closed
//! registry enumerated at build time: an identifier either matches a
//! registered view or fails with [`ResolveError::UnresolvedView`]. No
//! filesystem or network path is ever constructed from the identifier.
//!
//! The [`ViewResolver`] trait is the async seam the lifecycle suspends on;
//! the registry's implementation resolves immediately, but bindings backed
//! by code-split modules may genuinely await.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use portico_core::{RenderedView, ViewProps};
use thiserror::Error;

/// Failures while resolving a component identifier to a view.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No registered view matches the identifier.
    #[error("no view registered for component '{component}'")]
    UnresolvedView {
        /// The identifier that failed to resolve.
        component: String,
    },

    /// The identifier is not a well-formed component key.
    #[error("component identifier '{component}' is not a valid view key")]
    InvalidIdentifier {
        /// The offending identifier.
        component: String,
    },
}

/// A loadable view implementation: renders its markup from the descriptor's
/// props. Implementations are opaque to the bootstrap core.
pub trait View: Send + Sync {
    /// The component identifier this view is registered under.
    fn name(&self) -> &str;

    /// Render the view with the given props.
    fn render(&self, props: &ViewProps) -> RenderedView;
}

impl std::fmt::Debug for dyn View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View").field("name", &self.name()).finish()
    }
}

/// Maps a component identifier to a loadable view, asynchronously.
#[async_trait]
pub trait ViewResolver: Send + Sync {
    /// Resolve `component` to a view, or fail with [`ResolveError`].
    ///
    /// Never blocks the calling thread; an unresolved view must propagate to
    /// the caller rather than being swallowed, since a mounted application
    /// without a view is an unrecoverable bootstrap state.
    async fn resolve(&self, component: &str) -> Result<Arc<dyn View>, ResolveError>;
}

/// Check that an identifier is an acceptable key into the view namespace.
///
/// Identifiers are segments of `[A-Za-z0-9_-]` joined by `/` (nested pages),
/// with no empty segments. Everything else is rejected before any lookup.
fn validate_identifier(component: &str) -> Result<(), ResolveError> {
    let well_formed = !component.is_empty()
        && component.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        });
    if well_formed {
        Ok(())
    } else {
        Err(ResolveError::InvalidIdentifier {
            component: component.to_string(),
        })
    }
}

/// The closed set of views known at build time.
///
/// Registration happens once during application assembly; resolution treats
/// the registry as immutable.
#[derive(Default)]
pub struct ViewRegistry {
    views: RwLock<HashMap<String, Arc<dyn View>>>,
}

impl ViewRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view under its own name. Re-registering a name replaces
    /// the previous view.
    pub fn register(&self, view: Arc<dyn View>) {
        let name = view.name().to_string();
        tracing::debug!(component = %name, "registered view");
        self.views.write().insert(name, view);
    }

    /// Whether a view is registered under `component`.
    #[must_use]
    pub fn contains(&self, component: &str) -> bool {
        self.views.read().contains_key(component)
    }

    /// Number of registered views.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.read().len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.read().is_empty()
    }
}

#[async_trait]
impl ViewResolver for ViewRegistry {
    async fn resolve(&self, component: &str) -> Result<Arc<dyn View>, ResolveError> {
        validate_identifier(component)?;
        let view = self.views.read().get(component).cloned();
        match view {
            Some(view) => {
                tracing::debug!(component = %component, "resolved view");
                Ok(view)
            }
            None => Err(ResolveError::UnresolvedView {
                component: component.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    struct Fixed(&'static str);

    impl View for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn render(&self, _props: &ViewProps) -> RenderedView {
            RenderedView::new(self.0, "<div/>")
        }
    }

    #[tokio::test]
    async fn test_resolve_registered_view() {
        let registry = ViewRegistry::new();
        registry.register(Arc::new(Fixed("Dashboard")));
        let view = registry.resolve("Dashboard").await.unwrap();
        assert_eq!(view.name(), "Dashboard");
    }

    #[tokio::test]
    async fn test_unresolved_view_propagates() {
        let registry = ViewRegistry::new();
        assert_matches!(
            registry.resolve("Missing").await,
            Err(ResolveError::UnresolvedView { component }) if component == "Missing"
        );
    }

    #[tokio::test]
    async fn test_nested_identifier_accepted() {
        let registry = ViewRegistry::new();
        registry.register(Arc::new(Fixed("Admin/Users")));
        assert!(registry.resolve("Admin/Users").await.is_ok());
    }

    #[tokio::test]
    async fn test_traversal_identifiers_rejected() {
        let registry = ViewRegistry::new();
        for bad in ["../secrets", "a//b", "/root", "Dash board", "a\\b", ""] {
            assert_matches!(
                registry.resolve(bad).await,
                Err(ResolveError::InvalidIdentifier { .. }),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_reregistration_replaces() {
        let registry = ViewRegistry::new();
        registry.register(Arc::new(Fixed("Home")));
        registry.register(Arc::new(Fixed("Home")));
        assert_eq!(registry.len(), 1);
    }
}
