//! End-to-end panel tests over HTTP against a wiremock backend.

use pipedeck_client::{StepPayload, StepStatus};
use pipedeck_panel::{ControlPanel, Indicator, MemoryView, PanelConfig};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> PanelConfig {
    PanelConfig::builder()
        .base_url(server.uri())
        .status_interval(Duration::from_millis(100))
        .log_interval(Duration::from_millis(100))
        .request_timeout(Duration::from_secs(2))
        .build()
}

#[tokio::test]
async fn test_trigger_tails_and_polls_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/run/security"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Security scan started"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "security": "RUNNING",
            "commit": "SUCCESS",
            "zip": "FAILED"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/logs/security"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "logs": "Connecting to server...\nConnected successfully.\n"
        })))
        .mount(&mock_server)
        .await;

    let view = Arc::new(MemoryView::new());
    let panel = ControlPanel::connect(&config(&mock_server), view.clone()).unwrap();

    let payload = StepPayload::new()
        .with("RemoteReleaseVersion", "R26.0.0.1.2")
        .with("RemoteAppName", "ORM")
        .with("username", "scanner")
        .with("password", "secret");
    let ack = panel.trigger("security", payload).unwrap().await.unwrap().unwrap();
    assert_eq!(ack.message.as_deref(), Some("Security scan started"));

    tokio::time::sleep(Duration::from_millis(350)).await;

    assert_eq!(panel.status_of(&"security".into()), Some(StepStatus::Running));
    assert_eq!(view.indicator(&"commit".into()), Some(Indicator::Ok));
    assert_eq!(view.indicator(&"zip".into()), Some(Indicator::Error));
    assert_eq!(panel.active_log(), Some("security".into()));
    assert_eq!(
        view.log_text().as_deref(),
        Some("Connecting to server...\nConnected successfully.\n")
    );
    assert_eq!(view.accepted().len(), 1);
}

#[tokio::test]
async fn test_backend_errors_keep_panel_running() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/run/email"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "SMTP relay unavailable"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/logs/email"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let view = Arc::new(MemoryView::new());
    let panel = ControlPanel::connect(&config(&mock_server), view.clone()).unwrap();

    let result = panel
        .trigger("email", StepPayload::new())
        .unwrap()
        .await
        .unwrap();
    assert!(result.is_err());

    tokio::time::sleep(Duration::from_millis(250)).await;

    let failures = view.failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].1.contains("SMTP relay unavailable"));
    assert!(panel.statuses().is_empty());
    assert_eq!(panel.active_log(), Some("email".into()));
    assert_eq!(view.log_text(), None);
}

#[tokio::test]
async fn test_connect_rejects_invalid_url() {
    let view = Arc::new(MemoryView::new());
    let config = PanelConfig::builder().base_url("ftp://backend").build();

    assert!(ControlPanel::connect(&config, view).is_err());
}
