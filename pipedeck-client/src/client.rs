//! Core pipedeck client implementation.

use crate::error::{ClientError, Result};
use reqwest::{Client as HttpClient, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A client for the release pipeline backend.
///
/// Cloning is cheap; clones share the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use pipedeck_client::Client;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::new("http://localhost:8000")?
///     .with_timeout(Duration::from_secs(10))?;
///
/// let status = client.get_status().await?;
/// for (step, state) in status.iter() {
///     println!("{step}: {state}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    /// Base URL of the backend, without trailing slash.
    base_url: String,
    /// HTTP client.
    http: HttpClient,
}

impl Client {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the backend (e.g., "http://localhost:8000")
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        let http = HttpClient::builder().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Set a custom timeout for all requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be rebuilt.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http = HttpClient::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path.
    fn url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.base_url, path)
    }

    /// Execute a GET request.
    pub(crate) async fn get(&self, path: &str) -> Result<Response> {
        let url = self.url(path);
        tracing::trace!(%url, "GET");

        self.http.get(&url).send().await.map_err(ClientError::Http)
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Response> {
        let url = self.url(path);
        tracing::trace!(%url, "POST");

        self.http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(ClientError::Http)
    }

    /// Handle a response and deserialize JSON.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let response = self.ensure_success(response).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(ClientError::Deserialize)
    }

    /// Turn a non-success response into [`ClientError::Api`].
    pub(crate) async fn ensure_success(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(ClientError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Percent-encode a single path segment.
pub(crate) fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Pull a human-readable message out of an error body.
///
/// FastAPI reports errors under `detail`; other servers use `error` or `message`.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    ["detail", "error", "message"]
        .iter()
        .find_map(|key| json[key].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new() {
        let client = Client::new("http://localhost:8000").unwrap();
        assert_eq!(client.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_client_invalid_url() {
        let result = Client::new("not-a-url");
        assert!(result.is_err());
    }

    #[test]
    fn test_url_building() {
        let client = Client::new("http://localhost:8000").unwrap();
        assert_eq!(client.url("status"), "http://localhost:8000/status");
        assert_eq!(client.url("/status"), "http://localhost:8000/status");
    }

    #[test]
    fn test_url_building_with_trailing_slash() {
        let client = Client::new("http://localhost:8000/").unwrap();
        assert_eq!(client.url("logs/commit"), "http://localhost:8000/logs/commit");
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("commit"), "commit");
        assert_eq!(segment("staas/v2"), "staas%2Fv2");
        assert_eq!(segment("a b"), "a%20b");
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"detail":"Not Found"}"#), "Not Found");
        assert_eq!(error_message(r#"{"error":"boom"}"#), "boom");
        assert_eq!(error_message(r#"{"message":"nope"}"#), "nope");
        assert_eq!(error_message("plain text"), "plain text");
        assert_eq!(error_message(r#"{"other":1}"#), r#"{"other":1}"#);
    }
}
