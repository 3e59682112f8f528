//! # Root Application Lifecycle
//!
//! Constructs the application root around a resolved view and mounts it into
//! the host document. The bootstrap walks a fixed state machine:
//!
//! ```text
//! Uninitialized → Resolving → Constructing → CapabilitiesRegistered → Mounted
//! ```
//!
//! with a terminal failure reachable from any step, surfaced as
//! [`BootstrapError`] carrying the stage it failed in. A failed mount leaves
//! no partial children under the mount point.
//!
//! The root is a singleton per page session. Subsequent navigations reuse it
//! and swap view+props in place; see [`RootApplication::navigate`] for the
//! stale-version and supersession outcomes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use portico_core::{
    DescriptorError, HostDocument, MountError, PageDescriptor, RenderedView, ViewProps,
};
use thiserror::Error;

use crate::capabilities::CapabilityRegistry;
use crate::progress::ProgressSignal;
use crate::registry::{ResolveError, View, ViewResolver};

/// Steps of the bootstrap state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStage {
    /// Nothing has happened yet; descriptor acquisition fails here.
    Uninitialized,
    /// Waiting on the view resolver.
    Resolving,
    /// Building the render root from the resolved view.
    Constructing,
    /// Attaching shared capabilities.
    CapabilitiesRegistered,
    /// Attaching the root to the host document.
    Mounted,
}

impl BootstrapStage {
    /// Short label for error messages and log fields.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Resolving => "resolving",
            Self::Constructing => "constructing",
            Self::CapabilitiesRegistered => "registering capabilities",
            Self::Mounted => "mounting",
        }
    }
}

/// Underlying cause of a bootstrap failure.
#[derive(Debug, Error)]
pub enum BootstrapCause {
    /// The page descriptor could not be obtained or validated.
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// The named view could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The host document rejected the mount.
    #[error(transparent)]
    Mount(#[from] MountError),
}

/// A bootstrap failure: the stage that failed plus its cause. Fatal to the
/// page load; reported once, never retried automatically.
#[derive(Debug, Error)]
#[error("bootstrap failed while {}: {cause}", stage.label())]
pub struct BootstrapError {
    /// The stage the failure occurred in.
    pub stage: BootstrapStage,
    /// What went wrong.
    #[source]
    pub cause: BootstrapCause,
}

impl BootstrapError {
    /// Create an error for a failed stage.
    #[must_use]
    pub fn at(stage: BootstrapStage, cause: impl Into<BootstrapCause>) -> Self {
        Self {
            stage,
            cause: cause.into(),
        }
    }
}

/// Result of a re-navigation on an already-mounted root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The new view is mounted.
    Completed,
    /// A newer navigation started before this one finished resolving; its
    /// result was discarded.
    Superseded,
    /// The descriptor carries a different asset version than the mounted
    /// session; the embedder should perform a full page visit to `url`.
    StaleVersion {
        /// Where the full visit should go.
        url: String,
    },
}

struct CurrentPage {
    view: Arc<dyn View>,
    rendered: RenderedView,
    props: ViewProps,
    url: String,
}

/// The single mounted application instance owning the visible subtree for
/// the lifetime of the page session.
pub struct RootApplication {
    host: Arc<dyn HostDocument>,
    resolver: Arc<dyn ViewResolver>,
    progress: Arc<ProgressSignal>,
    capabilities: CapabilityRegistry,
    mount_id: String,
    version: Option<String>,
    current: Mutex<CurrentPage>,
    generation: AtomicU64,
}

impl std::fmt::Debug for RootApplication {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootApplication")
            .field("mount_id", &self.mount_id)
            .field("version", &self.version)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Ends the progress cycle when a bootstrap or navigation path exits.
struct CycleGuard<'a>(&'a ProgressSignal);

impl Drop for CycleGuard<'_> {
    fn drop(&mut self) {
        self.0.finish();
    }
}

/// Construct, wire up, and mount a root application for `descriptor`.
///
/// Suspends while the resolver looks up the view; everything else is
/// synchronous. On mount failure the mount point is cleared before the error
/// is returned, so no partial mutation persists.
pub async fn bootstrap(
    descriptor: PageDescriptor,
    host: Arc<dyn HostDocument>,
    resolver: Arc<dyn ViewResolver>,
    progress: Arc<ProgressSignal>,
    mount_id: impl Into<String>,
) -> Result<RootApplication, BootstrapError> {
    let mount_id = mount_id.into();
    progress.start();
    let _cycle = CycleGuard(&progress);

    tracing::debug!(component = %descriptor.component, stage = "resolving", "bootstrap");
    let view = resolver
        .resolve(&descriptor.component)
        .await
        .map_err(|e| BootstrapError::at(BootstrapStage::Resolving, e))?;

    tracing::debug!(stage = "constructing", "bootstrap");
    let rendered = view.render(&descriptor.props);

    tracing::debug!(stage = "capabilities", "bootstrap");
    let capabilities = CapabilityRegistry::standard(host.clone());

    tracing::debug!(stage = "mounting", mount_id = %mount_id, "bootstrap");
    if let Err(e) = host.mount(&mount_id, &rendered) {
        host.clear(&mount_id);
        return Err(BootstrapError::at(BootstrapStage::Mounted, e));
    }

    tracing::info!(
        component = %descriptor.component,
        url = %descriptor.url,
        "application mounted"
    );

    Ok(RootApplication {
        host,
        resolver,
        progress: progress.clone(),
        capabilities,
        mount_id,
        version: descriptor.version.clone(),
        current: Mutex::new(CurrentPage {
            view,
            rendered,
            props: descriptor.props,
            url: descriptor.url,
        }),
        generation: AtomicU64::new(0),
    })
}

impl RootApplication {
    /// Navigate to a new page descriptor, reusing this root.
    ///
    /// Resolves the new view and swaps view+props in place. A descriptor
    /// whose asset version differs from the mounted session short-circuits
    /// to [`NavigationOutcome::StaleVersion`]; a navigation overtaken by a
    /// newer one while resolving discards its result and reports
    /// [`NavigationOutcome::Superseded`]. In-flight resolutions are never
    /// cancelled, only ignored. A mount rejected by the host re-mounts the
    /// previously rendered view, so the root and the host subtree stay
    /// consistent.
    pub async fn navigate(
        &self,
        descriptor: PageDescriptor,
    ) -> Result<NavigationOutcome, BootstrapError> {
        if let (Some(mounted), Some(incoming)) = (&self.version, &descriptor.version) {
            if mounted != incoming {
                tracing::info!(
                    mounted = %mounted,
                    incoming = %incoming,
                    url = %descriptor.url,
                    "asset version changed, full visit required"
                );
                return Ok(NavigationOutcome::StaleVersion {
                    url: descriptor.url,
                });
            }
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.progress.start();
        let _cycle = CycleGuard(&self.progress);

        let resolved = self.resolver.resolve(&descriptor.component).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(component = %descriptor.component, "navigation superseded");
            return Ok(NavigationOutcome::Superseded);
        }

        let view = resolved.map_err(|e| BootstrapError::at(BootstrapStage::Resolving, e))?;
        let rendered = view.render(&descriptor.props);
        if let Err(e) = self.host.mount(&self.mount_id, &rendered) {
            self.host.clear(&self.mount_id);
            self.restore_current();
            return Err(BootstrapError::at(BootstrapStage::Mounted, e));
        }

        let mut current = self.current.lock();
        current.view = view;
        current.rendered = rendered;
        current.props = descriptor.props;
        current.url = descriptor.url;
        tracing::info!(component = %descriptor.component, url = %current.url, "navigation completed");
        Ok(NavigationOutcome::Completed)
    }

    /// Re-mount the current page's rendered view so the root's state and
    /// the host subtree stay consistent after a failed swap. If the host
    /// rejects even the restore, the mount point is left cleared.
    fn restore_current(&self) {
        let previous = self.current.lock().rendered.clone();
        if let Err(err) = self.host.mount(&self.mount_id, &previous) {
            self.host.clear(&self.mount_id);
            tracing::error!(
                component = %previous.component,
                error = %err,
                "failed to restore previous view after rejected mount"
            );
        }
    }

    /// Name of the currently mounted view.
    #[must_use]
    pub fn current_component(&self) -> String {
        self.current.lock().view.name().to_string()
    }

    /// Props of the currently mounted view.
    #[must_use]
    pub fn current_props(&self) -> ViewProps {
        self.current.lock().props.clone()
    }

    /// Logical URL of the current page.
    #[must_use]
    pub fn current_url(&self) -> String {
        self.current.lock().url.clone()
    }

    /// Asset version recorded at first bootstrap, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The shared capabilities attached to this root.
    #[must_use]
    pub fn capabilities(&self) -> &CapabilityRegistry {
        &self.capabilities
    }

    /// Id of the element this root is mounted under.
    #[must_use]
    pub fn mount_id(&self) -> &str {
        &self.mount_id
    }
}
