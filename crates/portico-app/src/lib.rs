//! Portico App - Resolution-and-Hydration Bootstrap Core
//!
//! This crate connects a server-delivered page descriptor to a running
//! application: it validates the descriptor embedded in the host document,
//! resolves the named view from a closed registry, and mounts (or, on
//! navigation, swaps) a root application around that view.
//!
//! # Components
//!
//! - [`reader`]: extracts and validates the descriptor from the host
//!   document, plus a best-effort diagnostic resolution pass
//! - [`registry`]: the closed view registry and the async resolver seam
//! - [`lifecycle`]: the bootstrap state machine and [`RootApplication`]
//! - [`progress`]: the navigation progress signal, an explicit context
//!   rather than ambient global state
//! - [`orchestrator`]: sequences the above at startup
//!
//! # Control flow
//!
//! ```text
//! Orchestrator::start
//!   ├─ ProgressSignal::init
//!   ├─ reader::read ────────────────► PageDescriptor
//!   └─ lifecycle::bootstrap
//!        ├─ ViewResolver::resolve ──► Arc<dyn View>
//!        ├─ render with props
//!        ├─ register capabilities (link, head)
//!        └─ HostDocument::mount
//! ```
//!
//! The secondary diagnostic pass ([`Orchestrator::diagnostics`]) is
//! independently schedulable and never affects the primary path.

#![forbid(unsafe_code)]

pub mod capabilities;
pub mod lifecycle;
pub mod orchestrator;
pub mod progress;
pub mod reader;
pub mod registry;

pub use capabilities::{CapabilityRegistry, DocumentHead, NavigationLink};
pub use lifecycle::{
    bootstrap, BootstrapCause, BootstrapError, BootstrapStage, NavigationOutcome, RootApplication,
};
pub use orchestrator::{DiagnosticOutcome, DiagnosticReport, Orchestrator};
pub use progress::{ProgressConfig, ProgressSignal, ProgressSink, SinkError};
pub use registry::{ResolveError, View, ViewRegistry, ViewResolver};

// Re-export the core boundary types frontends need alongside the app layer.
pub use portico_core::{
    DescriptorError, HostDocument, MountError, PageDescriptor, RenderedView, ViewProps,
};
