//! Report input listing and artifact download.

use crate::client::{Client, segment};
use crate::error::{ClientError, Result};

impl Client {
    /// List the JSON files available as input to the `report` step.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a string array.
    pub async fn list_json_files(&self) -> Result<Vec<String>> {
        let response = self.get("json-files").await?;
        self.handle_response(response).await
    }

    /// Download a generated artifact by file name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the file does not exist, or the
    /// body is empty.
    pub async fn download_file(&self, filename: &str) -> Result<Vec<u8>> {
        if filename.is_empty() {
            return Err(ClientError::InvalidUrl(
                "download file name must not be empty".to_string(),
            ));
        }

        let path = format!("download/{}", segment(filename));
        let response = self.get(&path).await?;
        let response = self.ensure_success(response).await?;
        let bytes = response.bytes().await?;

        if bytes.is_empty() {
            return Err(ClientError::InvalidResponse(format!(
                "download of '{}' returned an empty body",
                filename
            )));
        }

        Ok(bytes.to_vec())
    }
}
