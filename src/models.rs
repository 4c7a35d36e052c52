use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// One GET to issue during an activation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    id: String,
    url: String,
}

impl FetchRequest {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        FetchRequest {
            id: id.into(),
            url: url.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Why a single request failed
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FetchFailure {
    /// No response: refused, unreachable, timed out, DNS or TLS
    #[error("{0}")]
    Transport(String),
    /// A response arrived outside the 2xx range
    #[error("backend responded with HTTP {code}{}", status_suffix(.reason))]
    Status { code: u16, reason: Option<String> },
    /// Body could not be decoded as JSON
    #[error("malformed response body: {0}")]
    Parse(String),
}

fn status_suffix(reason: &Option<String>) -> String {
    reason.as_deref().map(|r| format!(" {}", r)).unwrap_or_default()
}

impl FetchFailure {
    pub fn kind(&self) -> &'static str {
        match self {
            FetchFailure::Transport(_) => "transport",
            FetchFailure::Status { .. } => "status",
            FetchFailure::Parse(_) => "parse",
        }
    }
}

/// Settled result of one request
#[derive(Clone, Debug, PartialEq)]
pub enum FetchOutcome {
    Success(Value),
    Failure(FetchFailure),
}

/// A successful payload tagged with the request it came from
#[derive(Clone, Debug, PartialEq)]
pub struct Payload {
    pub id: String,
    pub body: Value,
}

/// What the presentation layer observes
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AggregateState {
    #[default]
    Loading,
    Error(String),
    Ready([Payload; 2]),
}

impl AggregateState {
    pub fn is_loading(&self) -> bool {
        matches!(self, AggregateState::Loading)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    /// Payload for a request id, when ready
    pub fn payload(&self, id: &str) -> Option<&Value> {
        match self {
            AggregateState::Ready(payloads) => {
                payloads.iter().find(|p| p.id == id).map(|p| &p.body)
            }
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            AggregateState::Error(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AggregateState::Loading => "loading",
            AggregateState::Error(_) => "error",
            AggregateState::Ready(_) => "ready",
        }
    }
}

/// `GET /api/health` body
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthPayload {
    pub status: String,
    pub message: String,
}

/// `GET /api/message` body
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub message: String,
}

impl HealthPayload {
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

impl MessagePayload {
    pub fn from_value(value: &Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}
