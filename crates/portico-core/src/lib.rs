//! Portico Core - Page Descriptor Model
//!
//! This crate provides the foundational types for the Portico bootstrap
//! core: the server-produced page descriptor, the error taxonomy for
//! descriptor validation, and the `HostDocument` boundary that keeps the
//! application core free of any concrete document environment.
//!
//! # Boundary
//!
//! The host document contract is the sole input boundary: a designated
//! element (id `app` by convention) carries a `data-page` attribute with a
//! JSON-serialized [`PageDescriptor`]. Everything upstream of that attribute
//! (server rendering, transport) is an external collaborator.

#![forbid(unsafe_code)]

pub mod descriptor;
pub mod error;
pub mod host;

pub use descriptor::{PageDescriptor, ViewProps};
pub use error::{DescriptorError, MountError};
pub use host::{HostDocument, RenderedView, DATA_PAGE_ATTRIBUTE, MOUNT_ELEMENT_ID, VIEW_NAMESPACE};
