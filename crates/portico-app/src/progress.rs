//! # Navigation Progress Signal
//!
//! A visual indicator of in-flight navigation/resolution work, modeled as an
//! explicit context object rather than ambient global state so the bootstrap
//! stays testable without environment coupling.
//!
//! Lifecycle: [`ProgressSignal::init`] once at startup (idempotent), then
//! `start`/`finish` around each resolution cycle. Overlapping cycles are
//! depth-counted; the indicator hides only when the last cycle finishes.
//!
//! Visibility honors the configured delay: a cycle becomes visible only
//! once it has been pending for at least `delay`, so cycles shorter than
//! the threshold never show at all. The signal owns no timer; the embedder
//! drives [`ProgressSignal::poll`] from whatever tick source it has (a
//! zero delay shows immediately and needs no polling).
//!
//! Nothing here propagates errors outward: a failing sink (e.g. the page is
//! not ready to render an indicator) is logged and swallowed, and navigation
//! proceeds unaffected.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use thiserror::Error;

/// Default indicator color, matching the conventional blue of
/// server-driven-page progress bars.
pub const DEFAULT_COLOR: &str = "#29d";

/// Default delay before a cycle becomes visible.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(250);

/// Configuration for the progress indicator. Options are enumerated;
/// arbitrary settings are not accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressConfig {
    /// Indicator color.
    pub color: String,
    /// How long a cycle must run before the indicator shows. Cycles shorter
    /// than this never become visible.
    pub delay: Duration,
    /// Whether the sink should inject its own stylesheet.
    pub include_css: bool,
    /// Whether to show a spinner alongside the bar.
    pub show_spinner: bool,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            delay: DEFAULT_DELAY,
            include_css: true,
            show_spinner: false,
        }
    }
}

impl ProgressConfig {
    /// Whether a cycle that has been running for `elapsed` should be shown.
    #[must_use]
    pub fn should_show(&self, elapsed: Duration) -> bool {
        elapsed >= self.delay
    }
}

/// Failure reported by a [`ProgressSink`]. Never escapes the signal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("progress sink failure: {reason}")]
pub struct SinkError {
    /// Sink-provided failure description.
    pub reason: String,
}

impl SinkError {
    /// Create a sink error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Rendering backend for the indicator. The visual widget itself is an
/// external collaborator; the core only drives show/hide.
pub trait ProgressSink: Send + Sync {
    /// Make the indicator visible with the given configuration.
    fn show(&self, config: &ProgressConfig) -> Result<(), SinkError>;

    /// Hide the indicator.
    fn hide(&self) -> Result<(), SinkError>;
}

/// Sink that only emits trace events. Used when no visual backend is bound.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn show(&self, config: &ProgressConfig) -> Result<(), SinkError> {
        tracing::debug!(color = %config.color, spinner = config.show_spinner, "progress shown");
        Ok(())
    }

    fn hide(&self) -> Result<(), SinkError> {
        tracing::debug!("progress hidden");
        Ok(())
    }
}

#[derive(Debug)]
struct SignalState {
    config: ProgressConfig,
    initialized: bool,
    listeners: usize,
    depth: usize,
    pending_since: Option<Instant>,
    visible: bool,
}

/// Process-wide navigation progress state, explicitly passed rather than
/// global. `start`/`finish` are invoked by the lifecycle around each
/// resolution cycle; this component never initiates navigation itself.
pub struct ProgressSignal {
    sink: Box<dyn ProgressSink>,
    state: Mutex<SignalState>,
}

impl Default for ProgressSignal {
    fn default() -> Self {
        Self::new(TracingSink)
    }
}

impl ProgressSignal {
    /// Create a signal backed by the given sink. The signal is inert until
    /// [`init`](Self::init) is called.
    pub fn new(sink: impl ProgressSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            state: Mutex::new(SignalState {
                config: ProgressConfig::default(),
                initialized: false,
                listeners: 0,
                depth: 0,
                pending_since: None,
                visible: false,
            }),
        }
    }

    /// Initialize the signal. Idempotent: a second call overwrites the
    /// configuration but registers no additional listener.
    pub fn init(&self, config: ProgressConfig) {
        let mut state = self.state.lock();
        if !state.initialized {
            state.initialized = true;
            state.listeners += 1;
        }
        state.config = config;
    }

    /// Begin a resolution cycle. The first of a set of overlapping cycles
    /// arms the delay gate; with a zero delay the indicator shows
    /// immediately. An uninitialized signal stays inert.
    pub fn start(&self) {
        let mut state = self.state.lock();
        if !state.initialized {
            return;
        }
        state.depth += 1;
        if state.depth == 1 {
            if state.config.delay.is_zero() {
                state.visible = true;
                let config = state.config.clone();
                drop(state);
                self.show(&config);
            } else {
                state.pending_since = Some(Instant::now());
            }
        }
    }

    /// Advance the delay gate: show the indicator if a cycle has been
    /// pending for at least the configured delay. Safe to call at any rate;
    /// does nothing when no cycle is pending or the indicator is already
    /// visible.
    pub fn poll(&self) {
        let mut state = self.state.lock();
        if !state.initialized || state.depth == 0 || state.visible {
            return;
        }
        let due = state
            .pending_since
            .is_some_and(|since| state.config.should_show(since.elapsed()));
        if due {
            state.visible = true;
            let config = state.config.clone();
            drop(state);
            self.show(&config);
        }
    }

    /// End a resolution cycle. When the last overlapping cycle finishes the
    /// indicator hides if it ever became visible; a cycle that stayed under
    /// the delay threshold ends without the indicator having shown.
    /// Unbalanced calls are ignored.
    pub fn finish(&self) {
        let mut state = self.state.lock();
        if !state.initialized || state.depth == 0 {
            return;
        }
        state.depth -= 1;
        if state.depth == 0 {
            state.pending_since = None;
            let was_visible = state.visible;
            state.visible = false;
            drop(state);
            if was_visible {
                if let Err(err) = self.sink.hide() {
                    tracing::warn!(error = %err, "progress indicator failed to hide");
                }
            }
        }
    }

    fn show(&self, config: &ProgressConfig) {
        if let Err(err) = self.sink.show(config) {
            tracing::warn!(error = %err, "progress indicator failed to show");
        }
    }

    /// Whether a resolution cycle is currently in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.lock().depth > 0
    }

    /// Whether the indicator is currently shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.lock().visible
    }

    /// Number of registered listeners. Stays at one no matter how many times
    /// [`init`](Self::init) runs.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.lock().listeners
    }
}
