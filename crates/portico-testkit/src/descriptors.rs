//! Descriptor builders.

use portico_core::{PageDescriptor, ViewProps};

/// Build props from key/value pairs.
#[must_use]
pub fn props(pairs: &[(&str, serde_json::Value)]) -> ViewProps {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), v.clone()))
        .collect()
}

/// A descriptor with the given component and URL, no props, no version.
#[must_use]
pub fn descriptor(component: &str, url: &str) -> PageDescriptor {
    PageDescriptor::new(component, url)
}

/// The canonical test page: `Dashboard` for `alice`, version `1`.
#[must_use]
pub fn dashboard_descriptor() -> PageDescriptor {
    PageDescriptor::new("Dashboard", "/dashboard")
        .with_props(props(&[("user", serde_json::json!("alice"))]))
        .with_version("1")
}
