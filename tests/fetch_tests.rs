//! Integration tests for a single activation against real sockets
//!
//! mockito serves the happy and status-error paths; the raw listeners in
//! `common` stand in for hung, stalled and unreachable backends.

use std::time::Duration;

mod common;

use common::{closed_port, silent_server, stalled_error_server};
use mockito::{Server, ServerGuard};
use pulseboard::network::client::create_client;
use pulseboard::{run_activation, AggregateState, FetchRequest};
use serde_json::json;

const HEALTH_BODY: &str = r#"{"status":"ok","message":"healthy"}"#;
const MESSAGE_BODY: &str = r#"{"message":"hello"}"#;

fn requests(health_base: &str, message_base: &str) -> [FetchRequest; 2] {
    [
        FetchRequest::new("health", format!("{}/api/health", health_base)),
        FetchRequest::new("message", format!("{}/api/message", message_base)),
    ]
}

async fn mock_json(
    server: &mut ServerGuard,
    path: &str,
    status: usize,
    body: &str,
) -> mockito::Mock {
    server
        .mock("GET", path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_both_succeed_is_ready() {
    let mut server = Server::new_async().await;
    let health = mock_json(&mut server, "/api/health", 200, HEALTH_BODY).await;
    let message = mock_json(&mut server, "/api/message", 200, MESSAGE_BODY).await;

    let client = create_client(Duration::from_secs(5));
    let state = run_activation(&client, &requests(&server.url(), &server.url()), None).await;

    assert_eq!(state.payload("health"), Some(&json!({"status": "ok", "message": "healthy"})));
    assert_eq!(state.payload("message"), Some(&json!({"message": "hello"})));
    health.assert_async().await;
    message.assert_async().await;
}

#[tokio::test]
async fn test_health_503_is_error_naming_health() {
    let mut server = Server::new_async().await;
    let _health = mock_json(&mut server, "/api/health", 503, r#"{"detail":"down"}"#).await;
    let _message = mock_json(&mut server, "/api/message", 200, MESSAGE_BODY).await;

    let client = create_client(Duration::from_secs(5));
    let state = run_activation(&client, &requests(&server.url(), &server.url()), None).await;

    let reason = state.error().expect("expected error state");
    assert!(reason.starts_with("health:"), "{}", reason);
    assert!(reason.contains("503"), "{}", reason);
}

#[tokio::test]
async fn test_message_connection_refused_names_message() {
    let mut server = Server::new_async().await;
    let _health = mock_json(&mut server, "/api/health", 200, HEALTH_BODY).await;
    let refused = closed_port().await;

    let client = create_client(Duration::from_secs(5));
    let state = run_activation(&client, &requests(&server.url(), &refused), None).await;

    let reason = state.error().expect("expected error state");
    assert!(reason.starts_with("message: connection failed"), "{}", reason);
}

#[tokio::test]
async fn test_message_request_timeout_names_message() {
    let mut server = Server::new_async().await;
    let _health = mock_json(&mut server, "/api/health", 200, HEALTH_BODY).await;
    let silent = silent_server().await;

    let client = create_client(Duration::from_millis(200));
    let state = run_activation(&client, &requests(&server.url(), &silent), None).await;

    assert_eq!(state.error(), Some("message: request timed out"));
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mut server = Server::new_async().await;
    let _health = mock_json(&mut server, "/api/health", 200, HEALTH_BODY).await;
    let _message = mock_json(&mut server, "/api/message", 200, "<html>oops</html>").await;

    let client = create_client(Duration::from_secs(5));
    let state = run_activation(&client, &requests(&server.url(), &server.url()), None).await;

    let reason = state.error().expect("expected error state");
    assert!(reason.starts_with("message: malformed response body"), "{}", reason);
}

#[tokio::test]
async fn test_both_fail_attributed_to_health() {
    let mut server = Server::new_async().await;
    let _health = mock_json(&mut server, "/api/health", 500, "{}").await;
    let refused = closed_port().await;

    let client = create_client(Duration::from_secs(5));
    let state = run_activation(&client, &requests(&server.url(), &refused), None).await;

    let reason = state.error().expect("expected error state");
    assert!(reason.starts_with("health: backend responded with HTTP 500"), "{}", reason);
}

#[tokio::test]
async fn test_waits_for_both_before_settling() {
    // health fails fast, message hangs until its timeout: still one Error, after both
    let refused = closed_port().await;
    let silent = silent_server().await;

    let client = create_client(Duration::from_millis(300));
    let started = std::time::Instant::now();
    let state = run_activation(&client, &requests(&refused, &silent), None).await;

    assert!(started.elapsed() >= Duration::from_millis(300));
    assert!(state.error().unwrap().starts_with("health: connection failed"));
}

#[tokio::test]
async fn test_activation_deadline() {
    let silent = silent_server().await;

    let client = create_client(Duration::from_secs(30));
    let state = run_activation(
        &client,
        &requests(&silent, &silent),
        Some(Duration::from_millis(200)),
    )
    .await;

    match state {
        AggregateState::Error(reason) => assert_eq!(
            reason,
            "timeout: health and message did not settle within 200ms"
        ),
        other => panic!("expected timeout, got {:?}", other),
    }
}

#[tokio::test]
async fn test_activation_deadline_names_only_pending_request() {
    let mut server = Server::new_async().await;
    let _health = mock_json(&mut server, "/api/health", 200, HEALTH_BODY).await;
    let silent = silent_server().await;

    let client = create_client(Duration::from_secs(30));
    let state = run_activation(
        &client,
        &requests(&server.url(), &silent),
        Some(Duration::from_millis(300)),
    )
    .await;

    let reason = state.error().expect("expected error state");
    assert_eq!(reason, "timeout: message did not settle within 300ms");
    assert!(!reason.contains("health"), "{}", reason);
}

#[tokio::test]
async fn test_error_status_settles_without_reading_body() {
    // 503 headers arrive, the advertised body never does
    let stalled = stalled_error_server().await;
    let mut server = Server::new_async().await;
    let _message = mock_json(&mut server, "/api/message", 200, MESSAGE_BODY).await;

    let client = create_client(Duration::from_secs(10));
    let started = std::time::Instant::now();
    let state = tokio::time::timeout(
        Duration::from_secs(3),
        run_activation(&client, &requests(&stalled, &server.url()), None),
    )
    .await
    .expect("error status should settle before the client timeout");

    assert!(started.elapsed() < Duration::from_secs(3));
    let reason = state.error().expect("expected error state");
    assert!(reason.starts_with("health: backend responded with HTTP 503"), "{}", reason);
}
