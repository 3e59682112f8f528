//! # Shared Capabilities
//!
//! Facilities registered on the root application so any descendant view can
//! reach them by name, without threading them through props: the
//! navigation-link primitive and the document-head primitive.
//!
//! The capabilities are addressable facades, not implementations. Visiting a
//! link records a navigation request for the embedding runtime to act on
//! (the transport that fulfils it is an external collaborator); head control
//! forwards to the host document.

use std::sync::Arc;

use parking_lot::Mutex;
use portico_core::HostDocument;

/// Registry name of the navigation-link capability.
pub const LINK_CAPABILITY: &str = "link";

/// Registry name of the document-head capability.
pub const HEAD_CAPABILITY: &str = "head";

/// Navigation primitive: views call [`visit`](NavigationLink::visit) and the
/// embedding runtime drains the requested URLs.
#[derive(Debug, Default)]
pub struct NavigationLink {
    requests: Mutex<Vec<String>>,
}

impl NavigationLink {
    /// Create the capability with no pending requests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a navigation to `url`.
    pub fn visit(&self, url: impl Into<String>) {
        let url = url.into();
        tracing::debug!(url = %url, "navigation requested");
        self.requests.lock().push(url);
    }

    /// Drain pending navigation requests, oldest first.
    #[must_use]
    pub fn take_requests(&self) -> Vec<String> {
        std::mem::take(&mut self.requests.lock())
    }

    /// Number of pending requests.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.requests.lock().len()
    }
}

/// Document-head primitive: lets views set page metadata through the host
/// boundary.
pub struct DocumentHead {
    host: Arc<dyn HostDocument>,
    title: Mutex<Option<String>>,
}

impl DocumentHead {
    /// Create the capability bound to a host document.
    #[must_use]
    pub fn new(host: Arc<dyn HostDocument>) -> Self {
        Self {
            host,
            title: Mutex::new(None),
        }
    }

    /// Set the document title.
    pub fn set_title(&self, title: impl Into<String>) {
        let title = title.into();
        self.host.set_title(&title);
        *self.title.lock() = Some(title);
    }

    /// The last title set through this capability, if any.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.title.lock().clone()
    }
}

/// The capabilities attached to a root application, addressable by name from
/// anywhere in its component tree.
pub struct CapabilityRegistry {
    link: Arc<NavigationLink>,
    head: Arc<DocumentHead>,
}

impl CapabilityRegistry {
    /// Register the standard capability set against a host document.
    #[must_use]
    pub fn standard(host: Arc<dyn HostDocument>) -> Self {
        tracing::debug!(
            capabilities = ?[LINK_CAPABILITY, HEAD_CAPABILITY],
            "capabilities registered"
        );
        Self {
            link: Arc::new(NavigationLink::new()),
            head: Arc::new(DocumentHead::new(host)),
        }
    }

    /// The navigation-link capability.
    #[must_use]
    pub fn link(&self) -> Arc<NavigationLink> {
        self.link.clone()
    }

    /// The document-head capability.
    #[must_use]
    pub fn head(&self) -> Arc<DocumentHead> {
        self.head.clone()
    }

    /// Names of the registered capabilities.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        vec![LINK_CAPABILITY, HEAD_CAPABILITY]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portico_core::{MountError, RenderedView};

    #[derive(Default)]
    struct TitleOnly {
        title: Mutex<Option<String>>,
    }

    impl HostDocument for TitleOnly {
        fn element_exists(&self, _element_id: &str) -> bool {
            false
        }

        fn attribute(&self, _element_id: &str, _name: &str) -> Option<String> {
            None
        }

        fn mount(&self, element_id: &str, _view: &RenderedView) -> Result<(), MountError> {
            Err(MountError::MissingTarget {
                element_id: element_id.to_string(),
            })
        }

        fn clear(&self, _element_id: &str) {}

        fn set_title(&self, title: &str) {
            *self.title.lock() = Some(title.to_string());
        }
    }

    #[test]
    fn test_link_records_visits_in_order() {
        let link = NavigationLink::new();
        link.visit("/a");
        link.visit("/b");
        assert_eq!(link.take_requests(), vec!["/a", "/b"]);
        assert_eq!(link.pending(), 0);
    }

    #[test]
    fn test_head_forwards_title_to_host() {
        let host = Arc::new(TitleOnly::default());
        let head = DocumentHead::new(host.clone());
        head.set_title("Dashboard");
        assert_eq!(host.title.lock().as_deref(), Some("Dashboard"));
        assert_eq!(head.title().as_deref(), Some("Dashboard"));
    }

    #[test]
    fn test_standard_registry_names() {
        let registry = CapabilityRegistry::standard(Arc::new(TitleOnly::default()));
        assert_eq!(registry.names(), vec!["link", "head"]);
        registry.link().visit("/x");
        assert_eq!(registry.link().pending(), 1);
    }
}
