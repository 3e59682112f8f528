//! Portico Testing Infrastructure
//!
//! Common fixtures for exercising the bootstrap core without a real
//! document environment: an in-memory [`HostDocument`], stub views and
//! registries, a recording progress sink, and descriptor builders.
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! portico-testkit = { path = "../portico-testkit" }
//! ```
//!
//! Then in your tests:
//! ```rust,no_run
//! use portico_testkit::*;
//!
//! let host = MemoryDocument::with_page(&dashboard_descriptor());
//! let registry = registry_with(&["Dashboard"]);
//! // ... drive the orchestrator against them
//! ```

#![forbid(unsafe_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod descriptors;
pub mod document;
pub mod progress;
pub mod views;

pub use descriptors::{dashboard_descriptor, descriptor, props};
pub use document::MemoryDocument;
pub use progress::{recording_sink, ProgressCounters, RecordingSink};
pub use views::{registry_with, GatedResolver, StubView};

// Re-export the boundary types fixtures are built from.
pub use portico_core::{HostDocument, PageDescriptor, RenderedView, ViewProps};
