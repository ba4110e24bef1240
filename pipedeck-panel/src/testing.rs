//! Scriptable in-memory backend.
//!
//! `MockBackend` answers the three panel calls from state set up by the test,
//! records every call, and can delay individual replies on the Tokio clock so
//! out-of-order completion can be staged deterministically under paused time.
//!
//! # Example
//!
//! ```ignore
//! let backend = Arc::new(MockBackend::new());
//! backend.push_status(StatusReply::ok([("angular", "RUNNING")]).delayed(Duration::from_secs(3)));
//! backend.push_status(StatusReply::ok([("angular", "SUCCESS")]));
//! backend.set_log("angular", "Build #118 queued\n");
//! ```

use crate::backend::{Backend, BackendFuture};
use parking_lot::Mutex;
use pipedeck_client::{
    ClientError, RunAck, StatusSnapshot, StepName, StepPayload, StepStatus,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;
use tokio::time::Instant;

/// One scripted reply to `GET /status`.
#[derive(Debug, Clone)]
pub struct StatusReply {
    /// Snapshot to return, or the HTTP status of a failure.
    outcome: Result<StatusSnapshot, u16>,
    /// How long the reply takes.
    delay: Duration,
}

impl StatusReply {
    /// Successful reply built from `(step, wire status)` pairs.
    pub fn ok<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, &'static str)>,
        S: Into<StepName>,
    {
        Self {
            outcome: Ok(entries
                .into_iter()
                .map(|(step, raw)| (step.into(), StepStatus::parse(raw)))
                .collect()),
            delay: Duration::ZERO,
        }
    }

    /// Failed reply with the given HTTP status.
    pub fn fail(status: u16) -> Self {
        Self {
            outcome: Err(status),
            delay: Duration::ZERO,
        }
    }

    /// Delay the reply.
    #[must_use]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    triggers: Vec<(StepName, StepPayload)>,
    trigger_failure: Option<u16>,
    status_script: VecDeque<StatusReply>,
    status_fallback: StatusSnapshot,
    status_calls: usize,
    logs: HashMap<StepName, String>,
    log_delays: HashMap<StepName, Duration>,
    failing_logs: HashSet<StepName>,
    log_calls: Vec<(StepName, Instant)>,
}

/// In-memory [`Backend`] for tests.
#[derive(Debug, Default)]
pub struct MockBackend {
    state: Mutex<MockState>,
}

impl MockBackend {
    /// Backend that accepts every trigger, reports no statuses and empty logs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent trigger fail with `status`.
    pub fn fail_triggers(&self, status: u16) {
        self.state.lock().trigger_failure = Some(status);
    }

    /// Queue a reply for the next unanswered status poll.
    pub fn push_status(&self, reply: StatusReply) {
        self.state.lock().status_script.push_back(reply);
    }

    /// Snapshot returned once the script is exhausted.
    pub fn set_status_fallback(&self, snapshot: StatusSnapshot) {
        self.state.lock().status_fallback = snapshot;
    }

    /// Set the full log text of a step.
    pub fn set_log(&self, step: impl Into<StepName>, text: impl Into<String>) {
        self.state.lock().logs.insert(step.into(), text.into());
    }

    /// Delay every log reply for a step.
    pub fn set_log_delay(&self, step: impl Into<StepName>, delay: Duration) {
        self.state.lock().log_delays.insert(step.into(), delay);
    }

    /// Make log fetches for a step fail (or succeed again).
    pub fn set_log_failing(&self, step: impl Into<StepName>, failing: bool) {
        let step = step.into();
        let mut state = self.state.lock();
        if failing {
            state.failing_logs.insert(step);
        } else {
            state.failing_logs.remove(&step);
        }
    }

    /// Triggers received, in order.
    pub fn triggers(&self) -> Vec<(StepName, StepPayload)> {
        self.state.lock().triggers.clone()
    }

    /// Number of status polls received.
    pub fn status_calls(&self) -> usize {
        self.state.lock().status_calls
    }

    /// Log fetches received, in order.
    pub fn log_calls(&self) -> Vec<StepName> {
        self.state.lock().log_calls.iter().map(|(s, _)| s.clone()).collect()
    }

    /// Log fetches received for one step, with their arrival times.
    pub fn log_call_times(&self, step: &StepName) -> Vec<Instant> {
        self.state
            .lock()
            .log_calls
            .iter()
            .filter(|(s, _)| s == step)
            .map(|(_, at)| *at)
            .collect()
    }
}

fn mock_error(status: u16) -> ClientError {
    ClientError::Api {
        status,
        message: "mock failure".to_string(),
    }
}

impl Backend for MockBackend {
    fn trigger<'a>(
        &'a self,
        step: &'a StepName,
        payload: &'a StepPayload,
    ) -> BackendFuture<'a, RunAck> {
        Box::pin(async move {
            let mut state = self.state.lock();
            state.triggers.push((step.clone(), payload.clone()));
            match state.trigger_failure {
                Some(status) => Err(mock_error(status)),
                None => Ok(RunAck {
                    status: 200,
                    message: Some(format!("{step} started")),
                }),
            }
        })
    }

    fn status(&self) -> BackendFuture<'_, StatusSnapshot> {
        Box::pin(async move {
            let reply = {
                let mut state = self.state.lock();
                state.status_calls += 1;
                state.status_script.pop_front().unwrap_or_else(|| StatusReply {
                    outcome: Ok(state.status_fallback.clone()),
                    delay: Duration::ZERO,
                })
            };

            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            reply.outcome.map_err(mock_error)
        })
    }

    fn logs<'a>(&'a self, step: &'a StepName) -> BackendFuture<'a, String> {
        Box::pin(async move {
            let (delay, failing) = {
                let mut state = self.state.lock();
                state.log_calls.push((step.clone(), Instant::now()));
                (
                    state.log_delays.get(step).copied().unwrap_or_default(),
                    state.failing_logs.contains(step),
                )
            };

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if failing {
                return Err(mock_error(502));
            }
            // Read after the delay so the reply reflects the log at completion.
            Ok(self
                .state
                .lock()
                .logs
                .get(step)
                .cloned()
                .unwrap_or_default())
        })
    }
}
