//! Typed Rust client for the release pipeline backend.
//!
//! The backend runs pipeline steps (commit summary, release report, security
//! scan, Angular build, incrementals, packaging, email, security-test service)
//! and exposes a small JSON-over-HTTP surface:
//!
//! | Operation | Endpoint |
//! |---|---|
//! | [`Client::trigger_step`] | `POST /run/{step}` |
//! | [`Client::get_status`] | `GET /status` |
//! | [`Client::get_logs`] | `GET /logs/{step}` |
//! | [`Client::list_json_files`] | `GET /json-files` |
//! | [`Client::download_file`] | `GET /download/{file}` |
//!
//! # Example
//!
//! ```no_run
//! use pipedeck_client::{Client, StepName, StepPayload};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new("http://localhost:8000")?;
//!
//! let step = StepName::new("zip");
//! client.trigger_step(&step, &StepPayload::new()).await?;
//!
//! let status = client.get_status().await?;
//! println!("zip is {:?}", status.get(&step));
//!
//! println!("{}", client.get_logs(&step).await?);
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, ClientError>`:
//!
//! ```no_run
//! # use pipedeck_client::{Client, ClientError, StepName};
//! # async fn example() -> Result<(), ClientError> {
//! # let client = Client::new("http://localhost:8000")?;
//! match client.get_logs(&StepName::new("commit")).await {
//!     Ok(text) => println!("{text}"),
//!     Err(ClientError::Api { status: 404, .. }) => println!("no such step"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod files;
mod logs;
mod status;
mod triggers;
mod types;

pub use client::{Client, DEFAULT_TIMEOUT};
pub use error::{ClientError, Result};
pub use types::{RunAck, StatusSnapshot, StepName, StepPayload, StepStatus};
