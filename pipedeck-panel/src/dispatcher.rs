//! Step dispatcher.

use crate::backend::Backend;
use crate::view::PanelView;
use pipedeck_client::{Result, RunAck, StepName, StepPayload};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Sends trigger requests. Holds no state between calls.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn Backend>,
    view: Arc<dyn PanelView>,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub fn new(backend: Arc<dyn Backend>, view: Arc<dyn PanelView>) -> Self {
        Self { backend, view }
    }

    /// Fire one trigger request for `step` without waiting for it.
    ///
    /// The request runs on its own task. The returned handle resolves to the
    /// acknowledgement or the transport error; dropping it detaches the task
    /// and the request still completes. Failures are logged and reported to
    /// [`PanelView::dispatch_failed`]. No retries.
    ///
    /// Must be called within a Tokio runtime.
    pub fn dispatch(&self, step: StepName, payload: StepPayload) -> JoinHandle<Result<RunAck>> {
        let backend = Arc::clone(&self.backend);
        let view = Arc::clone(&self.view);

        tracing::info!(step = %step, fields = payload.len(), "Dispatching step");

        tokio::spawn(async move {
            let result = backend.trigger(&step, &payload).await;
            match &result {
                Ok(ack) => {
                    tracing::debug!(
                        step = %step,
                        status = ack.status,
                        reply = ack.message.as_deref().unwrap_or(""),
                        "Step accepted"
                    );
                    view.dispatch_accepted(&step, ack);
                }
                Err(err) => {
                    tracing::warn!(step = %step, error = %err, "Step dispatch failed");
                    view.dispatch_failed(&step, err);
                }
            }
            result
        })
    }
}
