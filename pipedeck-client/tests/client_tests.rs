//! Integration tests for pipedeck-client.
//!
//! These tests verify the client API surface without requiring a running server.

use pipedeck_client::{Client, ClientError, StepName, StepPayload};

#[test]
fn test_client_construction() {
    let client = Client::new("http://localhost:8000");
    assert!(client.is_ok());

    let client = Client::new("https://deck.example.com");
    assert!(client.is_ok());
}

#[test]
fn test_client_invalid_url() {
    let result = Client::new("localhost:8000");

    match result {
        Err(ClientError::InvalidUrl(msg)) => {
            assert!(msg.contains("http://"));
        }
        _ => panic!("Expected InvalidUrl error"),
    }
}

#[test]
fn test_client_with_timeout() {
    use std::time::Duration;

    let client = Client::new("http://localhost:8000")
        .unwrap()
        .with_timeout(Duration::from_secs(5));

    assert!(client.is_ok());
}

#[test]
fn test_base_url_normalization() {
    let client = Client::new("http://localhost:8000/").unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000");
}

#[test]
fn test_error_display() {
    let error = ClientError::InvalidUrl("test error".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Invalid URL"));
    assert!(display.contains("test error"));
}

#[test]
fn test_api_error_display() {
    let error = ClientError::Api {
        status: 404,
        message: "Not found".to_string(),
    };

    let display = format!("{}", error);
    assert!(display.contains("404"));
    assert!(display.contains("Not found"));
    assert_eq!(error.status(), Some(404));
}

#[test]
fn test_payload_from_pairs() {
    let payload: StepPayload = [("RemoteAppName", "orm"), ("RemoteReleaseVersion", "26.1")]
        .into_iter()
        .collect();

    assert_eq!(payload.len(), 2);
    assert_eq!(payload.get("RemoteAppName"), Some("orm"));
}

#[test]
fn test_known_steps() {
    let known: Vec<StepName> = StepName::known().collect();
    assert!(known.contains(&StepName::new("angular")));
    assert!(known.contains(&StepName::new("staas")));
    assert!(StepName::new("commit").is_known());
    assert!(!StepName::new("deploy").is_known());
}
