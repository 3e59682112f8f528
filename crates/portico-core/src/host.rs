//! # HostDocument: Abstract Page Boundary
//!
//! This module defines the `HostDocument` trait, which abstracts the handful
//! of document operations the bootstrap core needs (element lookup,
//! attribute read, mounting a rendered view). This keeps `portico-app` a
//! pure application core with no dependency on a concrete DOM environment;
//! frontends supply a binding for their platform, tests supply an in-memory
//! document.
//!
//! ```text
//! portico-app (pure)        frontend binding
//! ┌─────────────────┐      ┌──────────────────┐
//! │ Orchestrator    │      │ web / tui / test │
//! │   ┌────────────┐│      │   implements     │
//! │   │HostDocument│◄──────│   HostDocument   │
//! │   └────────────┘│      │                  │
//! └─────────────────┘      └──────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::MountError;

/// Conventional id of the element the application mounts into.
pub const MOUNT_ELEMENT_ID: &str = "app";

/// Attribute on the mount element carrying the serialized page descriptor.
pub const DATA_PAGE_ATTRIBUTE: &str = "data-page";

/// Namespace the build pipeline enumerates view modules under
/// (`Pages/<component>`). Documents the packaging convention only;
/// registration and resolution use the bare component name.
pub const VIEW_NAMESPACE: &str = "Pages";

/// Opaque product of a view's render function, attached to the host document
/// on mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedView {
    /// Component identifier the markup was rendered from.
    pub component: String,
    /// Rendered markup, opaque to the bootstrap core.
    pub markup: String,
}

impl RenderedView {
    /// Create a rendered view.
    #[must_use]
    pub fn new(component: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            markup: markup.into(),
        }
    }
}

/// The sole boundary between the bootstrap core and the hosting page.
///
/// Mount is atomic: on error, no partial children of the target element may
/// remain attached. After a successful mount the target's subtree is
/// exclusively owned by the root application; no other component mutates it.
pub trait HostDocument: Send + Sync {
    /// Whether an element with the given id exists in the document.
    fn element_exists(&self, element_id: &str) -> bool;

    /// Read an attribute from an element, `None` if the element or the
    /// attribute is absent.
    fn attribute(&self, element_id: &str, name: &str) -> Option<String>;

    /// Replace the children of `element_id` with the rendered view.
    fn mount(&self, element_id: &str, view: &RenderedView) -> Result<(), MountError>;

    /// Remove all children of `element_id`. Used for rollback after a failed
    /// mount; clearing an absent element is a no-op.
    fn clear(&self, element_id: &str);

    /// Set the document title. Head metadata beyond the title is out of
    /// scope for the core.
    fn set_title(&self, title: &str);
}
