//! HTTP client wrapper - executes one GET and classifies the result

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::Value;

use crate::models::{FetchFailure, FetchOutcome, FetchRequest};

/// Execute a GET and turn whatever happens into an outcome
pub async fn fetch(client: &reqwest::Client, request: &FetchRequest) -> FetchOutcome {
    tracing::debug!(id = request.id(), url = request.url(), "Dispatching GET");

    let resp = match client.get(request.url()).send().await {
        Ok(resp) => resp,
        Err(e) => return FetchOutcome::Failure(transport_failure(&e)),
    };

    let status = resp.status();
    if !status.is_success() {
        // Settle on the status line alone; the body is never read
        drop(resp);
        return FetchOutcome::Failure(status_failure(status));
    }

    match resp.text().await {
        Ok(body) => parse_body(&body),
        Err(e) => FetchOutcome::Failure(FetchFailure::Transport(format!(
            "error reading body: {}",
            e
        ))),
    }
}

/// Decode a 2xx body as JSON
pub fn parse_body(body: &str) -> FetchOutcome {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => FetchOutcome::Success(value),
        Err(e) => FetchOutcome::Failure(FetchFailure::Parse(e.to_string())),
    }
}

pub fn status_failure(status: StatusCode) -> FetchFailure {
    FetchFailure::Status {
        code: status.as_u16(),
        reason: status.canonical_reason().map(String::from),
    }
}

fn transport_failure(e: &reqwest::Error) -> FetchFailure {
    let msg = if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!("connection failed: {}", e)
    } else {
        format!("request failed: {}", e)
    };
    FetchFailure::Transport(msg)
}

/// Create an HTTP client with the given per-request timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}
