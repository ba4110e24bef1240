//! Log tailer.
//!
//! Holds at most one subscription. A subscription is a task that fetches the
//! full log of its step immediately and then once per period, replacing the
//! displayed text each time. Every start or stop bumps a generation counter;
//! a fetch result is applied only if its subscription's generation is still
//! the active one when the fetch completes.

use crate::backend::Backend;
use crate::config::{DEFAULT_LOG_INTERVAL, nonzero_period};
use crate::view::PanelView;
use parking_lot::Mutex;
use pipedeck_client::StepName;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Default)]
struct TailState {
    /// Bumped on every start and stop.
    generation: u64,
    active: Option<Subscription>,
}

#[derive(Debug)]
struct Subscription {
    step: StepName,
    generation: u64,
    task: AbortHandle,
    last_text: Option<String>,
}

/// Single-subscriber log tailer.
pub struct LogTailer {
    backend: Arc<dyn Backend>,
    view: Arc<dyn PanelView>,
    period: Duration,
    state: Arc<Mutex<TailState>>,
}

impl LogTailer {
    /// Create an idle tailer that fetches every `period` once started.
    ///
    /// A zero `period` is replaced by [`DEFAULT_LOG_INTERVAL`].
    pub fn new(backend: Arc<dyn Backend>, view: Arc<dyn PanelView>, period: Duration) -> Self {
        Self {
            backend,
            view,
            period: nonzero_period(period, DEFAULT_LOG_INTERVAL, "log interval"),
            state: Arc::new(Mutex::new(TailState::default())),
        }
    }

    /// Tail `step`, cancelling any current subscription first.
    ///
    /// Fetches once immediately, then every period. Restarting the step that
    /// is already active also starts a fresh subscription.
    ///
    /// Must be called within a Tokio runtime.
    pub fn start_tail(&self, step: StepName) {
        let mut state = self.state.lock();
        if let Some(previous) = state.active.take() {
            previous.task.abort();
            tracing::debug!(
                step = %previous.step,
                generation = previous.generation,
                "Log subscription cancelled"
            );
        }

        state.generation += 1;
        let generation = state.generation;

        self.view.open_log(&step);

        // The task blocks on this lock before its first apply, so it cannot
        // observe the state before `active` is set below.
        let task = tokio::spawn(run(
            Arc::clone(&self.backend),
            Arc::clone(&self.view),
            Arc::clone(&self.state),
            step.clone(),
            generation,
            self.period,
        ));

        tracing::info!(step = %step, generation, "Log subscription started");

        state.active = Some(Subscription {
            step,
            generation,
            task: task.abort_handle(),
            last_text: None,
        });
    }

    /// Cancel the current subscription and close the log panel.
    ///
    /// Fetches still in flight are discarded when they complete. No-op when
    /// nothing is tailed.
    pub fn stop_tail(&self) {
        let mut state = self.state.lock();
        state.generation += 1;

        if let Some(previous) = state.active.take() {
            previous.task.abort();
            self.view.close_log();
            tracing::info!(step = %previous.step, "Log subscription stopped");
        }
    }

    /// Step currently tailed.
    pub fn active_step(&self) -> Option<StepName> {
        self.state.lock().active.as_ref().map(|s| s.step.clone())
    }

    /// Whether a subscription is live.
    pub fn is_active(&self) -> bool {
        self.state.lock().active.is_some()
    }

    /// Last text fetched by the current subscription.
    pub fn last_text(&self) -> Option<String> {
        self.state
            .lock()
            .active
            .as_ref()
            .and_then(|s| s.last_text.clone())
    }

    /// Current generation counter.
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }
}

impl Drop for LogTailer {
    fn drop(&mut self) {
        if let Some(active) = self.state.lock().active.take() {
            active.task.abort();
        }
    }
}

async fn run(
    backend: Arc<dyn Backend>,
    view: Arc<dyn PanelView>,
    state: Arc<Mutex<TailState>>,
    step: StepName,
    generation: u64,
    period: Duration,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let result = backend.logs(&step).await;

        let mut guard = state.lock();
        let Some(subscription) = guard
            .active
            .as_mut()
            .filter(|s| s.generation == generation)
        else {
            tracing::trace!(step = %step, generation, "Discarding log reply for ended subscription");
            return;
        };

        match result {
            Ok(text) => {
                view.show_log(&step, &text);
                subscription.last_text = Some(text);
            }
            Err(err) => {
                // Keep the last text on screen and keep polling.
                tracing::debug!(step = %step, error = %err, "Log fetch failed");
            }
        }
    }
}
