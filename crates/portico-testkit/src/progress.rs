//! Recording progress sink.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use portico_app::{ProgressConfig, ProgressSink, SinkError};

/// Shared counters observing a [`RecordingSink`].
#[derive(Clone, Default)]
pub struct ProgressCounters {
    shows: Arc<AtomicUsize>,
    hides: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl ProgressCounters {
    /// Number of times the indicator was shown.
    #[must_use]
    pub fn shows(&self) -> usize {
        self.shows.load(Ordering::SeqCst)
    }

    /// Number of times the indicator was hidden.
    #[must_use]
    pub fn hides(&self) -> usize {
        self.hides.load(Ordering::SeqCst)
    }

    /// Make the sink start failing, to exercise swallow-and-log behavior.
    pub fn fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

/// A [`ProgressSink`] that records show/hide calls.
pub struct RecordingSink {
    counters: ProgressCounters,
}

/// Build a recording sink plus the counters observing it.
#[must_use]
pub fn recording_sink() -> (RecordingSink, ProgressCounters) {
    let counters = ProgressCounters::default();
    (
        RecordingSink {
            counters: counters.clone(),
        },
        counters,
    )
}

impl ProgressSink for RecordingSink {
    fn show(&self, _config: &ProgressConfig) -> Result<(), SinkError> {
        if self.counters.fail.load(Ordering::SeqCst) {
            return Err(SinkError::new("recording sink set to fail"));
        }
        self.counters.shows.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn hide(&self) -> Result<(), SinkError> {
        if self.counters.fail.load(Ordering::SeqCst) {
            return Err(SinkError::new("recording sink set to fail"));
        }
        self.counters.hides.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
