//! Seam between the panel and the pipeline backend.

use pipedeck_client::{Client, Result, RunAck, StatusSnapshot, StepName, StepPayload};
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`Backend`] operations.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// The three backend calls the panel depends on.
///
/// [`Client`] is the production implementation;
/// [`MockBackend`](crate::testing::MockBackend) is a scriptable in-memory one.
pub trait Backend: Send + Sync + 'static {
    /// `POST /run/{step}` with `payload` as body.
    fn trigger<'a>(&'a self, step: &'a StepName, payload: &'a StepPayload)
    -> BackendFuture<'a, RunAck>;

    /// `GET /status`.
    fn status(&self) -> BackendFuture<'_, StatusSnapshot>;

    /// `GET /logs/{step}`, returning the full text.
    fn logs<'a>(&'a self, step: &'a StepName) -> BackendFuture<'a, String>;
}

impl Backend for Client {
    fn trigger<'a>(
        &'a self,
        step: &'a StepName,
        payload: &'a StepPayload,
    ) -> BackendFuture<'a, RunAck> {
        Box::pin(self.trigger_step(step, payload))
    }

    fn status(&self) -> BackendFuture<'_, StatusSnapshot> {
        Box::pin(self.get_status())
    }

    fn logs<'a>(&'a self, step: &'a StepName) -> BackendFuture<'a, String> {
        Box::pin(self.get_logs(step))
    }
}
