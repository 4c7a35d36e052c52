//! Render state - data structure sent from App layer to UI for rendering

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::models::AggregateState;

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub state: AggregateState,

    // Deployment info
    pub api_url: String,
    pub health_url: String,
    pub message_url: String,
    pub request_timeout_secs: u64,
    pub activation_timeout_secs: Option<u64>,

    // Activation bookkeeping
    pub activation: u64,
    pub settled_at: Option<DateTime<Utc>>,
    pub time_ms: u64,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        let config = Config::default();
        RenderState {
            state: AggregateState::Loading,
            api_url: config.base_url().to_string(),
            health_url: config.health_url(),
            message_url: config.message_url(),
            request_timeout_secs: config.request_timeout_secs,
            activation_timeout_secs: config.activation_timeout_secs,
            activation: 0,
            settled_at: None,
            time_ms: 0,
            show_help: false,
        }
    }
}
