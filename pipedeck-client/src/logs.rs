//! Log fetch operations.

use crate::client::{Client, segment};
use crate::error::Result;
use crate::types::StepName;
use serde::Deserialize;

/// Response from fetching a step log.
#[derive(Debug, Deserialize)]
struct LogsResponse {
    logs: String,
}

impl Client {
    /// Fetch the full accumulated log of a step.
    ///
    /// The backend returns everything written so far on every call, not a
    /// delta. A step that has never run yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body has no `logs` string.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use pipedeck_client::{Client, StepName};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// # let client = Client::new("http://localhost:8000")?;
    /// let text = client.get_logs(&StepName::new("angular")).await?;
    /// println!("{text}");
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_logs(&self, step: &StepName) -> Result<String> {
        let path = format!("logs/{}", segment(step.as_str()));
        let response = self.get(&path).await?;
        let logs_response: LogsResponse = self.handle_response(response).await?;

        Ok(logs_response.logs)
    }
}
