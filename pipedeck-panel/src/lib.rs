//! Client-side orchestration for the pipedeck release control panel.
//!
//! Three components cooperate over a [`Backend`]:
//!
//! - [`Dispatcher`] fires one trigger request per dispatch and reports the
//!   outcome on a join handle without blocking the caller.
//! - [`StatusPoller`] polls every step's status on a fixed period and applies
//!   replies to a [`StatusBoard`] in send order, discarding stale ones.
//! - [`LogTailer`] keeps at most one live log subscription, replacing the
//!   displayed text on every fetch and ignoring replies that arrive after the
//!   subscription ended.
//!
//! [`ControlPanel`] wires them together: every trigger validates the payload
//! against the step's [`StepSchema`], dispatches it, and (re)starts the tail
//! for that step. State is rendered through a [`PanelView`].
//!
//! # Example
//!
//! ```no_run
//! use pipedeck_panel::{ControlPanel, MemoryView, PanelConfig};
//! use pipedeck_client::StepPayload;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let view = Arc::new(MemoryView::new());
//! let panel = ControlPanel::connect(&PanelConfig::default(), view.clone())?;
//!
//! let payload = StepPayload::new()
//!     .with("RemoteReleaseVersion", "R26.0.0.1.2")
//!     .with("RemoteAppName", "ORM")
//!     .with("username", "scanner")
//!     .with("password", "secret");
//! panel.trigger("security", payload)?;
//!
//! tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//! println!("{}", view.log_text().unwrap_or_default());
//! # Ok(())
//! # }
//! ```

mod backend;
mod config;
mod dispatcher;
mod error;
mod indicator;
pub mod observability;
mod panel;
mod poller;
mod schema;
mod tailer;
pub mod testing;
mod view;

pub use backend::{Backend, BackendFuture};
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_LOG_INTERVAL, DEFAULT_REQUEST_TIMEOUT, DEFAULT_STATUS_INTERVAL,
    PanelConfig, PanelConfigBuilder,
};
pub use dispatcher::Dispatcher;
pub use error::{PanelError, Result};
pub use indicator::Indicator;
pub use panel::ControlPanel;
pub use poller::{StatusBoard, StatusPoller};
pub use schema::{SchemaRegistry, StepSchema};
pub use tailer::LogTailer;
pub use view::{MemoryView, PanelView};
