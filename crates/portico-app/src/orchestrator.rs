//! # Bootstrap Orchestrator
//!
//! Sequences startup: initialize the progress signal, read the descriptor,
//! run the root application lifecycle, report failures. A second,
//! independent validation pass ([`Orchestrator::diagnostics`]) re-reads and
//! re-resolves the descriptor purely for observability; the two passes are
//! separately schedulable futures with no ordering dependence, and nothing
//! in the diagnostic pass can affect the primary outcome.

use std::sync::Arc;

use portico_core::{HostDocument, DATA_PAGE_ATTRIBUTE, MOUNT_ELEMENT_ID};

use crate::lifecycle::{bootstrap, BootstrapError, BootstrapStage, RootApplication};
use crate::progress::{ProgressConfig, ProgressSignal};
use crate::reader;
use crate::registry::ViewResolver;

/// Outcome of one diagnostic step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticOutcome {
    /// The step passed.
    Passed,
    /// The step failed, with a description. Observational only.
    Failed(String),
}

impl DiagnosticOutcome {
    /// Whether the step passed.
    #[must_use]
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// Result of the secondary validation pass. Informational; never feeds the
/// primary bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticReport {
    /// Outcome of re-reading and validating the embedded descriptor.
    pub descriptor: DiagnosticOutcome,
    /// Outcome of the best-effort view resolution, when the descriptor step
    /// passed.
    pub resolution: Option<DiagnosticOutcome>,
}

impl DiagnosticReport {
    /// Whether every performed step passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.descriptor.is_passed()
            && self
                .resolution
                .as_ref()
                .map_or(true, DiagnosticOutcome::is_passed)
    }
}

/// Wires the host document, resolver, and progress signal together and runs
/// the bootstrap once at page startup.
pub struct Orchestrator {
    host: Arc<dyn HostDocument>,
    resolver: Arc<dyn ViewResolver>,
    progress: Arc<ProgressSignal>,
    progress_config: ProgressConfig,
    mount_id: String,
}

impl Orchestrator {
    /// Create an orchestrator with the default progress signal and the
    /// conventional mount element.
    #[must_use]
    pub fn new(host: Arc<dyn HostDocument>, resolver: Arc<dyn ViewResolver>) -> Self {
        Self {
            host,
            resolver,
            progress: Arc::new(ProgressSignal::default()),
            progress_config: ProgressConfig::default(),
            mount_id: MOUNT_ELEMENT_ID.to_string(),
        }
    }

    /// Replace the progress signal (e.g. to bind a visual sink).
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<ProgressSignal>) -> Self {
        self.progress = progress;
        self
    }

    /// Replace the progress configuration applied at init.
    #[must_use]
    pub fn with_progress_config(mut self, config: ProgressConfig) -> Self {
        self.progress_config = config;
        self
    }

    /// Mount under a different element id.
    #[must_use]
    pub fn with_mount_id(mut self, mount_id: impl Into<String>) -> Self {
        self.mount_id = mount_id.into();
        self
    }

    /// The progress signal this orchestrator drives.
    #[must_use]
    pub fn progress(&self) -> Arc<ProgressSignal> {
        self.progress.clone()
    }

    /// Run the primary bootstrap path.
    ///
    /// On failure the error is reported here exactly once and returned; the
    /// document is left unmounted and no retry is attempted.
    pub async fn start(&self) -> Result<RootApplication, BootstrapError> {
        self.progress.init(self.progress_config.clone());

        let result = async {
            // The element the descriptor rides in on is the mount target.
            let descriptor =
                reader::read_from(self.host.as_ref(), &self.mount_id, DATA_PAGE_ATTRIBUTE)
                    .map_err(|e| BootstrapError::at(BootstrapStage::Uninitialized, e))?;
            bootstrap(
                descriptor,
                self.host.clone(),
                self.resolver.clone(),
                self.progress.clone(),
                self.mount_id.clone(),
            )
            .await
        }
        .await;

        if let Err(err) = &result {
            tracing::error!(stage = err.stage.label(), error = %err, "bootstrap failed");
        }
        result
    }

    /// Run the secondary, observability-only validation pass.
    ///
    /// Re-reads the embedded descriptor and attempts a best-effort view
    /// resolution, logging each step. Infallible outward: failures end up in
    /// the report, never as errors. Unordered relative to [`start`](Self::start).
    pub async fn diagnostics(&self) -> DiagnosticReport {
        let read = reader::read_from(self.host.as_ref(), &self.mount_id, DATA_PAGE_ATTRIBUTE);
        let descriptor = match read {
            Ok(descriptor) => descriptor,
            Err(err) => {
                return DiagnosticReport {
                    descriptor: DiagnosticOutcome::Failed(err.to_string()),
                    resolution: None,
                }
            }
        };

        let resolution =
            match reader::liveness_check(&descriptor, self.resolver.as_ref()).await {
                Ok(()) => DiagnosticOutcome::Passed,
                Err(err) => DiagnosticOutcome::Failed(err.to_string()),
            };

        DiagnosticReport {
            descriptor: DiagnosticOutcome::Passed,
            resolution: Some(resolution),
        }
    }
}
