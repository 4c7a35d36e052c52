//! Network layer - HTTP GET execution and activation joins
//!
//! The Network actor receives activation commands and sends back one
//! settled aggregate state per activation.

pub mod actor;
pub mod client;
pub mod join;

pub use actor::NetworkActor;
pub use join::{run_activation, JoinBarrier};
