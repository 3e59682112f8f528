//! # Descriptor Reader
//!
//! Extracts the serialized page descriptor from the host document and
//! validates it, logging every step. The reader also powers the secondary
//! diagnostic pass: a best-effort resolution of the named view that logs its
//! outcome and swallows failures, independent of the primary bootstrap.

use portico_core::{
    DescriptorError, HostDocument, PageDescriptor, DATA_PAGE_ATTRIBUTE, MOUNT_ELEMENT_ID,
};

use crate::registry::{ResolveError, ViewResolver};

/// Read and validate the page descriptor from the conventional mount
/// element.
pub fn read(host: &dyn HostDocument) -> Result<PageDescriptor, DescriptorError> {
    read_from(host, MOUNT_ELEMENT_ID, DATA_PAGE_ATTRIBUTE)
}

/// Read and validate the page descriptor from a specific element and
/// attribute.
///
/// Each validation step emits a structured log line, success or failure;
/// failures short-circuit, so a missing element is reported without any
/// attribute or parse attempt.
pub fn read_from(
    host: &dyn HostDocument,
    element_id: &str,
    attribute: &str,
) -> Result<PageDescriptor, DescriptorError> {
    if !host.element_exists(element_id) {
        let err = DescriptorError::MissingHost {
            element_id: element_id.to_string(),
        };
        tracing::error!(step = err.step(), element_id = %element_id, "descriptor read failed");
        return Err(err);
    }
    tracing::debug!(step = "host-lookup", element_id = %element_id, "descriptor read");

    let Some(raw) = host.attribute(element_id, attribute) else {
        let err = DescriptorError::MissingAttribute {
            attribute: attribute.to_string(),
        };
        tracing::error!(step = err.step(), attribute = %attribute, "descriptor read failed");
        return Err(err);
    };
    tracing::debug!(step = "attribute-lookup", bytes = raw.len(), "descriptor read");

    match PageDescriptor::from_json(&raw) {
        Ok(descriptor) => {
            tracing::info!(
                component = %descriptor.component,
                url = %descriptor.url,
                "descriptor parsed"
            );
            Ok(descriptor)
        }
        Err(err) => {
            tracing::error!(step = err.step(), error = %err, "descriptor read failed");
            Err(err)
        }
    }
}

/// Best-effort check that the descriptor's view actually resolves.
///
/// Purely observational: the outcome is logged and returned for diagnostic
/// reporting, and nothing here can affect the primary bootstrap. May run
/// before or after the primary path completes.
pub async fn liveness_check(
    descriptor: &PageDescriptor,
    resolver: &dyn ViewResolver,
) -> Result<(), ResolveError> {
    match resolver.resolve(&descriptor.component).await {
        Ok(view) => {
            tracing::info!(component = %view.name(), "liveness check: view resolves");
            Ok(())
        }
        Err(err) => {
            tracing::warn!(
                component = %descriptor.component,
                error = %err,
                "liveness check: view failed to resolve"
            );
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use portico_testkit::MemoryDocument;

    #[test]
    fn test_read_missing_host() {
        let host = MemoryDocument::empty();
        assert_matches!(read(&host), Err(DescriptorError::MissingHost { element_id }) if element_id == "app");
    }

    #[test]
    fn test_read_missing_attribute() {
        let host = MemoryDocument::with_element(MOUNT_ELEMENT_ID);
        assert_matches!(
            read(&host),
            Err(DescriptorError::MissingAttribute { attribute }) if attribute == "data-page"
        );
    }

    #[test]
    fn test_read_malformed_payload() {
        let host = MemoryDocument::with_raw_page("{broken");
        assert_matches!(read(&host), Err(DescriptorError::Malformed(_)));
    }

    #[test]
    fn test_read_valid_descriptor() {
        let host = MemoryDocument::with_raw_page(
            r#"{"component":"Dashboard","props":{"user":"alice"},"url":"/dashboard"}"#,
        );
        let descriptor = read(&host).unwrap();
        assert_eq!(descriptor.component, "Dashboard");
        assert_eq!(descriptor.props["user"], "alice");
    }
}
