//! Status poller.
//!
//! One repeating task polls `GET /status` for every step. Each tick's request
//! runs on its own child task so a slow reply never delays later ticks; as a
//! consequence replies can complete out of order. Every tick takes a sequence
//! number from the [`StatusBoard`], and a reply is only applied if its number
//! is higher than the last applied one.

use crate::backend::Backend;
use crate::config::{DEFAULT_STATUS_INTERVAL, nonzero_period};
use crate::indicator::Indicator;
use crate::view::PanelView;
use parking_lot::Mutex;
use pipedeck_client::{StatusSnapshot, StepName, StepStatus};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

/// Last applied status per step, guarded by a sequence number.
#[derive(Debug, Default)]
pub struct StatusBoard {
    /// Sequence number handed to the most recent poll.
    issued: AtomicU64,
    state: Mutex<BoardState>,
}

#[derive(Debug, Default)]
struct BoardState {
    /// Sequence number of the reply currently displayed; 0 before the first.
    applied: u64,
    statuses: BTreeMap<StepName, StepStatus>,
}

impl StatusBoard {
    /// Create an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the sequence number for a new poll. Starts at 1.
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply the reply to poll `seq` and push indicators to `view`.
    ///
    /// Returns `false` and changes nothing if a reply with an equal or higher
    /// sequence number was already applied. Steps absent from `snapshot` keep
    /// their previous status.
    pub fn apply(&self, seq: u64, snapshot: &StatusSnapshot, view: &dyn PanelView) -> bool {
        let mut state = self.state.lock();
        if seq <= state.applied {
            tracing::debug!(seq, applied = state.applied, "Discarding stale status reply");
            return false;
        }
        state.applied = seq;

        for (step, status) in snapshot.iter() {
            let previous = state.statuses.insert(step.clone(), status);
            if previous != Some(status) {
                tracing::info!(step = %step, status = %status, "Step status changed");
            }
            view.show_indicator(step, Indicator::from(status));
        }
        true
    }

    /// Last applied status of a step.
    pub fn status(&self, step: &StepName) -> Option<StepStatus> {
        self.state.lock().statuses.get(step).copied()
    }

    /// Last applied status of a step together with the sequence number of the
    /// reply it came from, read atomically.
    pub fn status_at(&self, step: &StepName) -> (u64, Option<StepStatus>) {
        let state = self.state.lock();
        (state.applied, state.statuses.get(step).copied())
    }

    /// Every step seen so far with its last applied status.
    pub fn snapshot(&self) -> StatusSnapshot {
        self.state
            .lock()
            .statuses
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }

    /// Sequence number of the displayed reply.
    pub fn applied_seq(&self) -> u64 {
        self.state.lock().applied
    }

    /// Sequence number of the most recently issued poll.
    pub fn issued_seq(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

/// Run one poll with sequence number `seq` and apply the reply.
pub(crate) async fn poll_once(
    backend: &dyn Backend,
    board: &StatusBoard,
    view: &dyn PanelView,
    seq: u64,
) {
    match backend.status().await {
        Ok(snapshot) => {
            if board.apply(seq, &snapshot, view) {
                tracing::trace!(seq, steps = snapshot.len(), "Applied status reply");
            }
        }
        Err(err) => {
            // Indicators keep their last value; the next tick retries.
            tracing::debug!(seq, error = %err, "Status poll failed");
        }
    }
}

/// Repeating status poll. Runs until dropped.
pub struct StatusPoller {
    board: Arc<StatusBoard>,
    task: JoinHandle<()>,
}

impl StatusPoller {
    /// Start polling every `period`. The first poll is sent immediately.
    /// A zero `period` is replaced by [`DEFAULT_STATUS_INTERVAL`].
    ///
    /// Must be called within a Tokio runtime.
    pub fn start(backend: Arc<dyn Backend>, view: Arc<dyn PanelView>, period: Duration) -> Self {
        let period = nonzero_period(period, DEFAULT_STATUS_INTERVAL, "status interval");
        let board = Arc::new(StatusBoard::new());
        let task = tokio::spawn(run(backend, view, Arc::clone(&board), period));

        tracing::info!(period_ms = period.as_millis() as u64, "Status poller started");

        Self { board, task }
    }

    /// The board this poller writes to.
    pub fn board(&self) -> &Arc<StatusBoard> {
        &self.board
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        // Aborting the loop drops its JoinSet, which aborts in-flight polls.
        self.task.abort();
    }
}

async fn run(
    backend: Arc<dyn Backend>,
    view: Arc<dyn PanelView>,
    board: Arc<StatusBoard>,
    period: Duration,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut in_flight = JoinSet::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let seq = board.issue();
                let backend = Arc::clone(&backend);
                let view = Arc::clone(&view);
                let board = Arc::clone(&board);
                in_flight.spawn(async move {
                    poll_once(backend.as_ref(), &board, view.as_ref(), seq).await;
                });
            }
            Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                if let Err(err) = joined
                    && err.is_panic()
                {
                    tracing::error!(error = %err, "Status poll task panicked");
                }
            }
        }
    }
}
