//! # Pulseboard
//!
//! A terminal status board for a backend exposing `GET /api/health` and
//! `GET /api/message`.
//!
//! On start both endpoints are fetched concurrently and joined into one
//! aggregate state (`Loading`, `Error` or `Ready`) which the UI renders as
//! status cards. `r` retries with a fresh activation; results from an
//! activation that was replaced or torn down are discarded.
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (dual-fetch state machine)
//! - Network Layer (Tokio runtime)

pub mod config;
pub mod constants;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{AggregateState, FetchFailure, FetchOutcome, FetchRequest, Payload};
pub use config::Config;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{ActivationHandle, AppActor, AppState, DualFetchStateMachine};
pub use network::{run_activation, JoinBarrier, NetworkActor};
