//! App state - pure data structure with no I/O logic

use chrono::{DateTime, Utc};

use crate::app::machine::{ActivationHandle, DualFetchStateMachine};
use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState};
use crate::models::{AggregateState, FetchRequest};

/// Main application state - pure data, no I/O
pub struct AppState {
    pub config: Config,
    requests: [FetchRequest; 2],

    // Dual fetch
    pub machine: DualFetchStateMachine,
    pub handle: Option<ActivationHandle>,
    pub settled_at: Option<DateTime<Utc>>,
    pub time_ms: u64,

    // Popups
    pub show_help: bool,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let requests = config.fetch_requests();
        AppState {
            config,
            requests,
            machine: DualFetchStateMachine::new(),
            handle: None,
            settled_at: None,
            time_ms: 0,
            show_help: false,
        }
    }

    /// Begin a new activation. Returns the commands for the network layer:
    /// a deactivation of the previous activation if still in flight, then the
    /// activation itself.
    pub fn start_activation(&mut self) -> Vec<NetworkCommand> {
        let mut commands = Vec::with_capacity(2);
        if let Some(cmd) = self.stop_activation() {
            commands.push(cmd);
        }

        match self.machine.activate(&self.requests) {
            Ok(handle) => {
                self.handle = Some(handle);
                self.settled_at = None;
                self.time_ms = 0;
                commands.push(NetworkCommand::Activate {
                    activation: handle.id(),
                    requests: self.requests.clone(),
                });
            }
            Err(e) => {
                tracing::error!(error = %e, "Refusing to activate");
            }
        }
        commands
    }

    /// Deactivate the current activation if it has not settled yet
    pub fn stop_activation(&mut self) -> Option<NetworkCommand> {
        let handle = self.handle.take()?;
        if self.machine.state().is_settled() {
            return None;
        }
        self.machine.deactivate(handle);
        Some(NetworkCommand::Deactivate(handle.id()))
    }

    /// Apply a network response; returns true if the visible state changed
    pub fn handle_response(&mut self, response: NetworkResponse) -> bool {
        match response {
            NetworkResponse::Settled { activation, state, time_ms } => {
                if !self.machine.settle(activation, state) {
                    return false;
                }
                self.settled_at = Some(Utc::now());
                self.time_ms = time_ms;
                true
            }
        }
    }

    pub fn state(&self) -> &AggregateState {
        self.machine.state()
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            state: self.machine.state().clone(),
            api_url: self.config.base_url().to_string(),
            health_url: self.requests[0].url().to_string(),
            message_url: self.requests[1].url().to_string(),
            request_timeout_secs: self.config.request_timeout_secs,
            activation_timeout_secs: self.config.activation_timeout_secs,
            activation: self.machine.activations(),
            settled_at: self.settled_at,
            time_ms: self.time_ms,
            show_help: self.show_help,
        }
    }
}
