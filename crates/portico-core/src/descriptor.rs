//! # Page Descriptor
//!
//! The server-produced payload naming which view to render, with what data,
//! for which logical URL and cache-busting version. A descriptor is parsed
//! exactly once per navigation event and handed to the resolver; it is not
//! retained afterwards.

use serde::{Deserialize, Serialize};

use crate::error::DescriptorError;

/// Data passed to a view's render function. Always a JSON object; an absent
/// `props` field parses as the empty object.
pub type ViewProps = serde_json::Map<String, serde_json::Value>;

/// A server-produced page descriptor.
///
/// Invariant: `component` is non-empty. Descriptors violating this never
/// leave [`PageDescriptor::from_json`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Identifier of the view to render, an opaque key into the closed view
    /// namespace.
    pub component: String,
    /// Data for the view's render function.
    #[serde(default)]
    pub props: ViewProps,
    /// Logical URL this page was rendered for.
    #[serde(default)]
    pub url: String,
    /// Asset version for cache busting; `None` when the server does not
    /// version its assets.
    #[serde(default)]
    pub version: Option<String>,
}

impl PageDescriptor {
    /// Create a descriptor with empty props, mainly for tests and demos.
    #[must_use]
    pub fn new(component: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            props: ViewProps::new(),
            url: url.into(),
            version: None,
        }
    }

    /// Attach props, replacing any existing ones.
    #[must_use]
    pub fn with_props(mut self, props: ViewProps) -> Self {
        self.props = props;
        self
    }

    /// Attach an asset version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Parse a descriptor from the raw attribute text.
    ///
    /// Distinguishes malformed JSON from a structurally valid document whose
    /// `component` field is absent or empty, since the two failures are
    /// reported differently.
    pub fn from_json(raw: &str) -> Result<Self, DescriptorError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(DescriptorError::Malformed)?;

        let has_component = value
            .get("component")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|c| !c.is_empty());
        if !has_component {
            return Err(DescriptorError::MissingComponentField);
        }

        let descriptor: Self =
            serde_json::from_value(value).map_err(DescriptorError::Malformed)?;
        Ok(descriptor)
    }

    /// Serialize back to the attribute wire form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_parse_full_descriptor() {
        let raw = r#"{"component":"Dashboard","props":{"user":"alice"},"url":"/dashboard","version":"1"}"#;
        let descriptor = PageDescriptor::from_json(raw).unwrap();
        assert_eq!(descriptor.component, "Dashboard");
        assert_eq!(descriptor.props["user"], "alice");
        assert_eq!(descriptor.url, "/dashboard");
        assert_eq!(descriptor.version.as_deref(), Some("1"));
    }

    #[test]
    fn test_parse_minimal_descriptor() {
        let descriptor = PageDescriptor::from_json(r#"{"component":"Home"}"#).unwrap();
        assert_eq!(descriptor.component, "Home");
        assert!(descriptor.props.is_empty());
        assert_eq!(descriptor.url, "");
        assert_eq!(descriptor.version, None);
    }

    #[test]
    fn test_malformed_json_is_not_missing_component() {
        assert_matches!(
            PageDescriptor::from_json("{not json"),
            Err(DescriptorError::Malformed(_))
        );
    }

    #[test]
    fn test_missing_component_field() {
        assert_matches!(
            PageDescriptor::from_json(r#"{"props":{}}"#),
            Err(DescriptorError::MissingComponentField)
        );
    }

    #[test]
    fn test_empty_component_rejected() {
        assert_matches!(
            PageDescriptor::from_json(r#"{"component":""}"#),
            Err(DescriptorError::MissingComponentField)
        );
    }

    #[test]
    fn test_non_string_component_rejected() {
        assert_matches!(
            PageDescriptor::from_json(r#"{"component":42}"#),
            Err(DescriptorError::MissingComponentField)
        );
    }

    #[test]
    fn test_round_trip() {
        let mut props = ViewProps::new();
        props.insert("count".into(), serde_json::json!(3));
        let descriptor = PageDescriptor::new("Settings", "/settings")
            .with_props(props)
            .with_version("abc123");
        let raw = descriptor.to_json().unwrap();
        assert_eq!(PageDescriptor::from_json(&raw).unwrap(), descriptor);
    }
}
