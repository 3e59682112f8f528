//! Descriptor and host-document error types.
//!
//! Errors on the primary bootstrap path are fatal to the page load and are
//! reported exactly once; errors on the diagnostic path are logged only.

use thiserror::Error;

/// Failures while extracting and validating the embedded page descriptor.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// The designated mount element is absent from the host document.
    #[error("mount element '{element_id}' not found in host document")]
    MissingHost {
        /// Id of the element that was looked up.
        element_id: String,
    },

    /// The mount element carries no serialized descriptor.
    #[error("attribute '{attribute}' not found on mount element")]
    MissingAttribute {
        /// Name of the attribute that was looked up.
        attribute: String,
    },

    /// The raw attribute text is not valid JSON.
    #[error("descriptor is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The descriptor parsed but names no view.
    #[error("descriptor has no 'component' field")]
    MissingComponentField,
}

impl DescriptorError {
    /// Short label for structured log fields.
    #[must_use]
    pub fn step(&self) -> &'static str {
        match self {
            Self::MissingHost { .. } => "host-lookup",
            Self::MissingAttribute { .. } => "attribute-lookup",
            Self::Malformed(_) => "parse",
            Self::MissingComponentField => "component-check",
        }
    }
}

/// Failures while attaching a rendered view to the host document.
#[derive(Debug, Error)]
pub enum MountError {
    /// The mount element disappeared between read and mount.
    #[error("mount element '{element_id}' not found")]
    MissingTarget {
        /// Id of the element the mount was aimed at.
        element_id: String,
    },

    /// The host rejected the mutation.
    #[error("host document rejected mount: {reason}")]
    Rejected {
        /// Host-provided failure description.
        reason: String,
    },
}
