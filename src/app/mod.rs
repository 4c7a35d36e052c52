//! App layer - central state management
//!
//! The App actor receives UI events and network responses,
//! drives the dual-fetch state machine, and emits network commands
//! and render state.

pub mod machine;
pub mod state;
pub mod actor;

pub use machine::{ActivationHandle, DualFetchStateMachine};
pub use state::AppState;
pub use actor::AppActor;
