//! Status polling operations.

use crate::client::Client;
use crate::error::Result;
use crate::types::StatusSnapshot;

impl Client {
    /// Fetch the status of every step known to the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a JSON object.
    /// Individual unrecognised status values are not errors; they read as
    /// [`StepStatus::Unknown`](crate::StepStatus::Unknown).
    pub async fn get_status(&self) -> Result<StatusSnapshot> {
        let response = self.get("status").await?;
        self.handle_response(response).await
    }
}
