//! Display sink for panel state.

use crate::indicator::Indicator;
use parking_lot::Mutex;
use pipedeck_client::{ClientError, RunAck, StepName};
use std::collections::{BTreeMap, BTreeSet};

/// Where the panel renders indicators and log text.
///
/// Callbacks run on Tokio worker threads, sometimes while panel state is
/// locked. Implementations must return quickly and must not call back into the
/// panel.
pub trait PanelView: Send + Sync + 'static {
    /// Update the marker of one step. Views with no slot for `step` ignore it.
    fn show_indicator(&self, step: &StepName, indicator: Indicator);

    /// The log panel now targets `step`.
    fn open_log(&self, step: &StepName);

    /// Replace the log panel content with `text`.
    fn show_log(&self, step: &StepName, text: &str);

    /// The log panel was closed.
    fn close_log(&self);

    /// The backend acknowledged a trigger.
    fn dispatch_accepted(&self, _step: &StepName, _ack: &RunAck) {}

    /// A trigger never reached the backend or was rejected by it.
    fn dispatch_failed(&self, _step: &StepName, _error: &ClientError) {}
}

/// View that keeps everything in memory.
///
/// Useful for headless embedding and for tests.
#[derive(Debug, Default)]
pub struct MemoryView {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    /// Steps that have an indicator slot; `None` means every step does.
    slots: Option<BTreeSet<StepName>>,
    indicators: BTreeMap<StepName, Indicator>,
    log_step: Option<StepName>,
    log_text: Option<String>,
    log_updates: usize,
    accepted: Vec<StepName>,
    failures: Vec<(StepName, String)>,
}

impl MemoryView {
    /// View with an indicator slot for every step.
    pub fn new() -> Self {
        Self::default()
    }

    /// View with indicator slots only for the given steps.
    pub fn with_slots<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StepName>,
    {
        let view = Self::default();
        view.state.lock().slots = Some(steps.into_iter().map(Into::into).collect());
        view
    }

    /// Current indicator of a step.
    pub fn indicator(&self, step: &StepName) -> Option<Indicator> {
        self.state.lock().indicators.get(step).copied()
    }

    /// All indicators shown so far.
    pub fn indicators(&self) -> BTreeMap<StepName, Indicator> {
        self.state.lock().indicators.clone()
    }

    /// Step the log panel targets, if open.
    pub fn log_step(&self) -> Option<StepName> {
        self.state.lock().log_step.clone()
    }

    /// Text in the log panel, if any was shown since it opened.
    pub fn log_text(&self) -> Option<String> {
        self.state.lock().log_text.clone()
    }

    /// Number of times the log content was replaced.
    pub fn log_updates(&self) -> usize {
        self.state.lock().log_updates
    }

    /// Steps whose triggers were acknowledged, in order.
    pub fn accepted(&self) -> Vec<StepName> {
        self.state.lock().accepted.clone()
    }

    /// Failed dispatches with their error text, in order.
    pub fn failures(&self) -> Vec<(StepName, String)> {
        self.state.lock().failures.clone()
    }
}

impl PanelView for MemoryView {
    fn show_indicator(&self, step: &StepName, indicator: Indicator) {
        let mut state = self.state.lock();
        if let Some(slots) = &state.slots
            && !slots.contains(step)
        {
            return;
        }
        state.indicators.insert(step.clone(), indicator);
    }

    fn open_log(&self, step: &StepName) {
        let mut state = self.state.lock();
        state.log_step = Some(step.clone());
        state.log_text = None;
    }

    fn show_log(&self, _step: &StepName, text: &str) {
        let mut state = self.state.lock();
        state.log_text = Some(text.to_string());
        state.log_updates += 1;
    }

    fn close_log(&self) {
        let mut state = self.state.lock();
        state.log_step = None;
        state.log_text = None;
    }

    fn dispatch_accepted(&self, step: &StepName, _ack: &RunAck) {
        self.state.lock().accepted.push(step.clone());
    }

    fn dispatch_failed(&self, step: &StepName, error: &ClientError) {
        self.state
            .lock()
            .failures
            .push((step.clone(), error.to_string()));
    }
}
