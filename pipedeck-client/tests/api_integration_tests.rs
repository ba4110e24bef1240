//! Integration tests for pipedeck-client API operations.
//!
//! These tests use wiremock to simulate the pipeline backend and verify that
//! the client builds the right requests and reads the responses correctly.

use pipedeck_client::{Client, ClientError, StepName, StepPayload, StepStatus};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_trigger_step_posts_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/run/commit"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "repoPath": "/src/app",
            "baseRelease": "26.0.0",
            "targetRelease": "26.1.0",
            "jiraRef": "REL-42",
            "appName": "orm"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "commit started"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let payload = StepPayload::new()
        .with("repoPath", "/src/app")
        .with("baseRelease", "26.0.0")
        .with("targetRelease", "26.1.0")
        .with("jiraRef", "REL-42")
        .with("appName", "orm");

    let ack = client
        .trigger_step(&StepName::new("commit"), &payload)
        .await
        .unwrap();

    assert_eq!(ack.status, 200);
    assert_eq!(ack.message.as_deref(), Some("commit started"));
}

#[tokio::test]
async fn test_trigger_step_tolerates_non_json_ack() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/run/zip"))
        .respond_with(ResponseTemplate::new(202).set_body_string("queued"))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let ack = client
        .trigger_step(&StepName::new("zip"), &StepPayload::new())
        .await
        .unwrap();

    assert_eq!(ack.status, 202);
    assert!(ack.message.is_none());
}

#[tokio::test]
async fn test_trigger_step_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/run/email"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "Internal Server Error"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let result = client
        .trigger_step(&StepName::new("email"), &StepPayload::new())
        .await;

    match result {
        Err(ClientError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("Expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "angular": "RUNNING",
            "commit": "SUCCESS",
            "security": "FAILED",
            "zip": "IDLE"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let status = client.get_status().await.unwrap();

    assert_eq!(status.len(), 4);
    assert_eq!(status.get(&"angular".into()), Some(StepStatus::Running));
    assert_eq!(status.get(&"commit".into()), Some(StepStatus::Success));
    assert_eq!(status.get(&"security".into()), Some(StepStatus::Failed));
    assert_eq!(status.get(&"zip".into()), Some(StepStatus::Unknown));
}

#[tokio::test]
async fn test_get_status_rejects_non_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["commit"])))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let result = client.get_status().await;

    assert!(matches!(result, Err(ClientError::Deserialize(_))));
}

#[tokio::test]
async fn test_get_logs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logs/angular"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": "Triggering Jenkins job...\nBuild #118 queued\n"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let text = client.get_logs(&StepName::new("angular")).await.unwrap();

    assert_eq!(text, "Triggering Jenkins job...\nBuild #118 queued\n");
}

#[tokio::test]
async fn test_get_logs_empty_for_unrun_step() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logs/report"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "logs": "" })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let text = client.get_logs(&StepName::new("report")).await.unwrap();

    assert!(text.is_empty());
}

#[tokio::test]
async fn test_get_logs_missing_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logs/report"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "lines": [] })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let result = client.get_logs(&StepName::new("report")).await;

    assert!(matches!(result, Err(ClientError::Deserialize(_))));
}

#[tokio::test]
async fn test_list_json_files() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json-files"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!(["commits_26.1.0.json", "commits_26.0.2.json"])),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let files = client.list_json_files().await.unwrap();

    assert_eq!(files, vec!["commits_26.1.0.json", "commits_26.0.2.json"]);
}

#[tokio::test]
async fn test_download_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/download/release.docx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04docx".to_vec()))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let bytes = client.download_file("release.docx").await.unwrap();

    assert_eq!(&bytes[..4], b"PK\x03\x04");
}

#[tokio::test]
async fn test_download_missing_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/download/nope.docx"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "detail": "Not Found"
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(mock_server.uri()).unwrap();
    let result = client.download_file("nope.docx").await;

    match result {
        Err(err @ ClientError::Api { .. }) => assert_eq!(err.status(), Some(404)),
        other => panic!("Expected 404, got {:?}", other),
    }
}

#[tokio::test]
async fn test_download_rejects_empty_name() {
    let client = Client::new("http://localhost:8000").unwrap();
    let result = client.download_file("").await;

    assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
}

#[tokio::test]
async fn test_connection_refused_is_http_error() {
    // Nothing listens on port 9 on test machines.
    let client = Client::new("http://127.0.0.1:9").unwrap();
    let result = client.get_status().await;

    match result {
        Err(err @ ClientError::Http(_)) => assert_eq!(err.status(), None),
        other => panic!("Expected transport error, got {:?}", other),
    }
}
