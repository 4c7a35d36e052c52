//! Dual-fetch state machine
//!
//! Owns the aggregate state for the current activation. Every write goes
//! through [`DualFetchStateMachine::settle`], which only accepts results
//! for the live activation while it is still loading, so a late response
//! from a replaced or torn-down activation is dropped.

use thiserror::Error;

use crate::models::{AggregateState, FetchFailure, FetchOutcome, FetchRequest, Payload};

/// Returned by `activate`; used to deactivate that activation later
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivationHandle {
    id: u64,
}

impl ActivationHandle {
    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActivationError {
    #[error("request identifier must not be empty")]
    EmptyId,
    #[error("request '{0}' has an empty URL")]
    EmptyUrl(String),
    #[error("request identifiers must be distinct, got '{0}' twice")]
    DuplicateId(String),
}

pub struct DualFetchStateMachine {
    next_id: u64,
    live: Option<u64>,
    state: AggregateState,
}

impl Default for DualFetchStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl DualFetchStateMachine {
    pub fn new() -> Self {
        DualFetchStateMachine {
            next_id: 1,
            live: None,
            state: AggregateState::Loading,
        }
    }

    /// Start a new activation, replacing any previous one
    pub fn activate(
        &mut self,
        requests: &[FetchRequest; 2],
    ) -> Result<ActivationHandle, ActivationError> {
        validate(requests)?;

        let id = self.next_id;
        self.next_id += 1;
        if let Some(previous) = self.live.replace(id) {
            tracing::debug!(previous, activation = id, "Superseding activation");
        }
        self.state = AggregateState::Loading;
        Ok(ActivationHandle { id })
    }

    /// Stop accepting results for `handle`. Returns false if it was not live.
    pub fn deactivate(&mut self, handle: ActivationHandle) -> bool {
        if self.live == Some(handle.id) {
            self.live = None;
            true
        } else {
            false
        }
    }

    /// Apply a settled state for `activation`. Returns true if it was applied.
    pub fn settle(&mut self, activation: u64, state: AggregateState) -> bool {
        if self.live != Some(activation) {
            tracing::debug!(activation, live = ?self.live, "Discarding stale settlement");
            return false;
        }
        if state.is_loading() || self.state.is_settled() {
            return false;
        }
        self.state = state;
        true
    }

    pub fn state(&self) -> &AggregateState {
        &self.state
    }

    /// Id of the activation whose results are still accepted
    pub fn live_activation(&self) -> Option<u64> {
        self.live
    }

    /// Number of activations started so far
    pub fn activations(&self) -> u64 {
        self.next_id - 1
    }
}

fn validate(requests: &[FetchRequest; 2]) -> Result<(), ActivationError> {
    for request in requests {
        if request.id().is_empty() {
            return Err(ActivationError::EmptyId);
        }
        if request.url().trim().is_empty() {
            return Err(ActivationError::EmptyUrl(request.id().to_string()));
        }
    }
    if requests[0].id() == requests[1].id() {
        return Err(ActivationError::DuplicateId(requests[0].id().to_string()));
    }
    Ok(())
}

/// Fold both outcomes into one state.
///
/// Any failure wins; when both fail the first in request order is reported.
pub fn aggregate(settled: [(String, FetchOutcome); 2]) -> AggregateState {
    let [(first_id, first), (second_id, second)] = settled;
    match (first, second) {
        (FetchOutcome::Success(a), FetchOutcome::Success(b)) => AggregateState::Ready([
            Payload { id: first_id, body: a },
            Payload { id: second_id, body: b },
        ]),
        (FetchOutcome::Failure(failure), _) => {
            AggregateState::Error(failure_reason(&first_id, &failure))
        }
        (_, FetchOutcome::Failure(failure)) => {
            AggregateState::Error(failure_reason(&second_id, &failure))
        }
    }
}

/// Human-readable reason naming the request and the cause
pub fn failure_reason(id: &str, failure: &FetchFailure) -> String {
    format!("{}: {}", id, failure)
}
