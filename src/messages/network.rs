//! Network messages - communication between App and Network layers

use crate::models::{AggregateState, FetchRequest};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Run both requests of an activation
    Activate {
        activation: u64,
        requests: [FetchRequest; 2],
    },
    /// Abort an in-flight activation; nothing is reported for it
    Deactivate(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// Every request of the activation settled (or the deadline passed)
    Settled {
        activation: u64,
        state: AggregateState,
        time_ms: u64,
    },
}
