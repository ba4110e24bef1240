//! The control panel: dispatcher, poller and tailer wired together.

use crate::backend::Backend;
use crate::config::PanelConfig;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::poller::{StatusBoard, StatusPoller};
use crate::schema::SchemaRegistry;
use crate::tailer::LogTailer;
use crate::view::PanelView;
use pipedeck_client::{Client, RunAck, StatusSnapshot, StepName, StepPayload, StepStatus};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A running control panel.
///
/// The status poller starts on construction and runs until the panel is
/// dropped. Dropping the panel also cancels the log subscription.
///
/// # Example
///
/// ```no_run
/// use pipedeck_panel::{ControlPanel, MemoryView, PanelConfig};
/// use pipedeck_client::StepPayload;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let view = Arc::new(MemoryView::new());
/// let panel = ControlPanel::connect(&PanelConfig::from_env(), view.clone())?;
///
/// let ack = panel.trigger("zip", StepPayload::new())?;
/// println!("accepted: {:?}", ack.await?);
/// # Ok(())
/// # }
/// ```
pub struct ControlPanel {
    dispatcher: Dispatcher,
    poller: StatusPoller,
    tailer: LogTailer,
    schemas: SchemaRegistry,
}

impl ControlPanel {
    /// Start a panel over an arbitrary backend, validating with the built-in
    /// step schemas.
    ///
    /// Must be called within a Tokio runtime.
    pub fn start(backend: Arc<dyn Backend>, view: Arc<dyn PanelView>, config: &PanelConfig) -> Self {
        let dispatcher = Dispatcher::new(Arc::clone(&backend), Arc::clone(&view));
        let tailer = LogTailer::new(
            Arc::clone(&backend),
            Arc::clone(&view),
            config.log_interval(),
        );
        let poller = StatusPoller::start(backend, view, config.status_interval());

        Self {
            dispatcher,
            poller,
            tailer,
            schemas: SchemaRegistry::builtin(),
        }
    }

    /// Build an HTTP client from `config` and start a panel over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn connect(config: &PanelConfig, view: Arc<dyn PanelView>) -> Result<Self> {
        let client = Client::new(config.base_url())?.with_timeout(config.request_timeout())?;
        Ok(Self::start(Arc::new(client), view, config))
    }

    /// Replace the schema registry used by [`ControlPanel::trigger`].
    #[must_use]
    pub fn with_schemas(mut self, schemas: SchemaRegistry) -> Self {
        self.schemas = schemas;
        self
    }

    /// Validate, dispatch, and tail a step.
    ///
    /// On success exactly one trigger request is in flight and the log tail
    /// has been (re)started for `step`. The returned handle resolves to the
    /// backend's acknowledgement; it may be dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::Validation`](crate::PanelError::Validation) if
    /// required fields are missing. Nothing is sent and the tail is untouched.
    pub fn trigger(
        &self,
        step: impl Into<StepName>,
        payload: StepPayload,
    ) -> Result<JoinHandle<pipedeck_client::Result<RunAck>>> {
        let step = step.into();
        self.schemas.validate(&step, &payload)?;

        let handle = self.dispatcher.dispatch(step.clone(), payload);
        self.tailer.start_tail(step);
        Ok(handle)
    }

    /// Open the log panel on `step`, replacing any current subscription.
    pub fn open_log(&self, step: impl Into<StepName>) {
        self.tailer.start_tail(step.into());
    }

    /// Close the log panel.
    pub fn close_log(&self) {
        self.tailer.stop_tail();
    }

    /// Step whose log is open.
    pub fn active_log(&self) -> Option<StepName> {
        self.tailer.active_step()
    }

    /// Last log text fetched for the open step.
    pub fn log_text(&self) -> Option<String> {
        self.tailer.last_text()
    }

    /// Last applied status of a step.
    pub fn status_of(&self, step: &StepName) -> Option<StepStatus> {
        self.poller.board().status(step)
    }

    /// Last applied status of every step seen.
    pub fn statuses(&self) -> StatusSnapshot {
        self.poller.board().snapshot()
    }

    /// The poller's status board.
    pub fn board(&self) -> &Arc<StatusBoard> {
        self.poller.board()
    }

    /// Schemas used for validation.
    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }
}
