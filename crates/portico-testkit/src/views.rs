//! Stub views and resolvers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::channel::oneshot;
use parking_lot::Mutex;
use portico_app::{ResolveError, View, ViewRegistry, ViewResolver};
use portico_core::{RenderedView, ViewProps};

/// A view that renders its name and props as a flat markup string, enough to
/// assert what was mounted and with what data.
pub struct StubView {
    name: String,
}

impl StubView {
    /// Create a stub view registered under `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl View for StubView {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&self, props: &ViewProps) -> RenderedView {
        let props_json =
            serde_json::to_string(props).unwrap_or_else(|_| "{}".to_string());
        RenderedView::new(
            self.name.clone(),
            format!("<{} props={}/>", self.name, props_json),
        )
    }
}

/// A registry pre-populated with stub views for each name.
#[must_use]
pub fn registry_with(names: &[&str]) -> Arc<ViewRegistry> {
    let registry = ViewRegistry::new();
    for name in names {
        registry.register(Arc::new(StubView::new(*name)));
    }
    Arc::new(registry)
}

/// A resolver that can park specific resolutions until released.
///
/// Used to interleave navigations deterministically: gate a component, start
/// a navigation that parks in `resolve`, start a second one that completes,
/// then release the gate and watch the first get superseded.
pub struct GatedResolver {
    inner: Arc<dyn ViewResolver>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
}

impl GatedResolver {
    /// Wrap `inner`. Resolutions pass straight through until gated.
    #[must_use]
    pub fn new(inner: Arc<dyn ViewResolver>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            gates: Mutex::new(HashMap::new()),
        })
    }

    /// Park the next resolution of `component` until the returned sender
    /// fires (or is dropped).
    #[must_use]
    pub fn gate(&self, component: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(component.to_string(), rx);
        tx
    }
}

#[async_trait]
impl ViewResolver for GatedResolver {
    async fn resolve(&self, component: &str) -> Result<Arc<dyn View>, ResolveError> {
        let pending = self.gates.lock().remove(component);
        if let Some(rx) = pending {
            // A dropped sender releases the gate too.
            let _ = rx.await;
        }
        self.inner.resolve(component).await
    }
}
