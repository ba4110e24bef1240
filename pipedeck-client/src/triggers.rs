//! Step trigger operations.

use crate::client::{Client, segment};
use crate::error::Result;
use crate::types::{RunAck, StepName, StepPayload};
use serde::Deserialize;

/// Body of a trigger acknowledgement. Only `message` is read.
#[derive(Debug, Default, Deserialize)]
struct RunStepResponse {
    #[serde(default)]
    message: Option<String>,
}

impl Client {
    /// Ask the backend to start a step.
    ///
    /// Issues exactly one `POST /run/{step}` with `payload` as the JSON body.
    /// The backend runs the step asynchronously; a successful return means the
    /// request was accepted, not that the step finished.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-success status. A 2xx
    /// response whose body is not JSON is still treated as accepted.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use pipedeck_client::{Client, StepName, StepPayload};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("http://localhost:8000")?;
    /// let payload = StepPayload::new()
    ///     .with("repoPath", "/src/app")
    ///     .with("jiraRef", "REL-42");
    ///
    /// let ack = client.trigger_step(&StepName::new("commit"), &payload).await?;
    /// println!("{}", ack.message.unwrap_or_default());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn trigger_step(&self, step: &StepName, payload: &StepPayload) -> Result<RunAck> {
        let path = format!("run/{}", segment(step.as_str()));
        let response = self.post(&path, payload).await?;
        let response = self.ensure_success(response).await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        let parsed: RunStepResponse = serde_json::from_slice(&body).unwrap_or_default();

        Ok(RunAck {
            status,
            message: parsed.message,
        })
    }
}
