//! Error types for the control panel.

use pipedeck_client::{ClientError, StepName};
use thiserror::Error;

/// Errors raised synchronously by panel operations.
///
/// Transport failures of dispatches and polls never surface here; they go to
/// the dispatch result channel or are absorbed by the next tick.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Required payload fields are missing or blank. Nothing was sent.
    #[error("step '{step}' is missing required fields: {}", .missing.join(", "))]
    Validation {
        /// Step that was being triggered.
        step: StepName,
        /// Names of missing fields, in schema order.
        missing: Vec<String>,
    },

    /// Backend client could not be constructed.
    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Result type for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;
