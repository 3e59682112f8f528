//! In-memory host document.
//!
//! Backs tests with a `HashMap` of elements instead of a DOM. Supports a
//! deliberately sloppy failure mode where a rejected mount leaves a partial
//! child behind, so rollback behavior can be observed.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use portico_core::{
    HostDocument, MountError, PageDescriptor, RenderedView, DATA_PAGE_ATTRIBUTE, MOUNT_ELEMENT_ID,
};

#[derive(Default)]
struct Element {
    attributes: HashMap<String, String>,
    children: Vec<RenderedView>,
}

/// A `HostDocument` held entirely in memory.
#[derive(Default)]
pub struct MemoryDocument {
    elements: Mutex<HashMap<String, Element>>,
    title: Mutex<Option<String>>,
    fail_mounts: AtomicBool,
    fail_next: AtomicBool,
    mount_calls: AtomicUsize,
}

impl MemoryDocument {
    /// A document with no elements at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A document containing one bare element with the given id.
    #[must_use]
    pub fn with_element(element_id: &str) -> Self {
        let doc = Self::default();
        doc.insert_element(element_id);
        doc
    }

    /// A document whose `app` element carries the given raw `data-page`
    /// text, valid or not.
    #[must_use]
    pub fn with_raw_page(raw: &str) -> Self {
        let doc = Self::with_element(MOUNT_ELEMENT_ID);
        doc.set_attribute(MOUNT_ELEMENT_ID, DATA_PAGE_ATTRIBUTE, raw);
        doc
    }

    /// A document whose `app` element carries the serialized descriptor.
    #[must_use]
    pub fn with_page(descriptor: &PageDescriptor) -> Self {
        Self::with_raw_page(&descriptor.to_json().unwrap())
    }

    /// Add an empty element.
    pub fn insert_element(&self, element_id: &str) {
        self.elements
            .lock()
            .entry(element_id.to_string())
            .or_default();
    }

    /// Set an attribute on an element, creating the element if needed.
    pub fn set_attribute(&self, element_id: &str, name: &str, value: &str) {
        self.elements
            .lock()
            .entry(element_id.to_string())
            .or_default()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    /// Make subsequent mounts fail. The failing mount leaves a partial child
    /// attached, so callers can verify it gets rolled back.
    pub fn fail_mounts(&self, fail: bool) {
        self.fail_mounts.store(fail, Ordering::SeqCst);
    }

    /// Make only the next mount fail; later mounts succeed again. Lets
    /// callers observe recovery paths that re-mount after a rejection.
    pub fn fail_next_mount(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// The currently mounted view under an element, if any.
    #[must_use]
    pub fn mounted(&self, element_id: &str) -> Option<RenderedView> {
        self.elements
            .lock()
            .get(element_id)
            .and_then(|e| e.children.last().cloned())
    }

    /// Number of children under an element. Zero for absent elements.
    #[must_use]
    pub fn child_count(&self, element_id: &str) -> usize {
        self.elements
            .lock()
            .get(element_id)
            .map_or(0, |e| e.children.len())
    }

    /// How many times `mount` has been called, successful or not.
    #[must_use]
    pub fn mount_calls(&self) -> usize {
        self.mount_calls.load(Ordering::SeqCst)
    }

    /// The document title, if one was set.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.title.lock().clone()
    }
}

impl HostDocument for MemoryDocument {
    fn element_exists(&self, element_id: &str) -> bool {
        self.elements.lock().contains_key(element_id)
    }

    fn attribute(&self, element_id: &str, name: &str) -> Option<String> {
        self.elements
            .lock()
            .get(element_id)
            .and_then(|e| e.attributes.get(name).cloned())
    }

    fn mount(&self, element_id: &str, view: &RenderedView) -> Result<(), MountError> {
        self.mount_calls.fetch_add(1, Ordering::SeqCst);
        let mut elements = self.elements.lock();
        let Some(element) = elements.get_mut(element_id) else {
            return Err(MountError::MissingTarget {
                element_id: element_id.to_string(),
            });
        };
        if self.fail_next.swap(false, Ordering::SeqCst) || self.fail_mounts.load(Ordering::SeqCst) {
            // Simulate a host that died mid-mutation.
            element
                .children
                .push(RenderedView::new(view.component.clone(), "<partial/>"));
            return Err(MountError::Rejected {
                reason: "host rejected mutation".to_string(),
            });
        }
        element.children = vec![view.clone()];
        Ok(())
    }

    fn clear(&self, element_id: &str) {
        if let Some(element) = self.elements.lock().get_mut(element_id) {
            element.children.clear();
        }
    }

    fn set_title(&self, title: &str) {
        *self.title.lock() = Some(title.to_string());
    }
}
