//! Join barrier - wait for every request of an activation to settle

use std::time::Duration;

use futures_util::stream::{FuturesUnordered, StreamExt};
use thiserror::Error;

use crate::app::machine::aggregate;
use crate::models::{AggregateState, FetchOutcome, FetchRequest};
use crate::network::client::fetch;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlotError {
    #[error("slot {0} is out of range")]
    OutOfRange(usize),
    #[error("slot {0} was already filled")]
    AlreadyFilled(usize),
}

/// N pending slots, each filled exactly once.
///
/// `fill` reports `true` only for the fill that completes the barrier.
#[derive(Debug)]
pub struct JoinBarrier<T> {
    slots: Vec<Option<T>>,
    remaining: usize,
    order: Vec<usize>,
}

impl<T> JoinBarrier<T> {
    pub fn new(slots: usize) -> Self {
        JoinBarrier {
            slots: (0..slots).map(|_| None).collect(),
            remaining: slots,
            order: Vec::with_capacity(slots),
        }
    }

    pub fn fill(&mut self, slot: usize, value: T) -> Result<bool, SlotError> {
        let entry = self.slots.get_mut(slot).ok_or(SlotError::OutOfRange(slot))?;
        if entry.is_some() {
            return Err(SlotError::AlreadyFilled(slot));
        }
        *entry = Some(value);
        self.order.push(slot);
        self.remaining -= 1;
        Ok(self.remaining == 0)
    }

    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Slots in the order they were filled
    pub fn settle_order(&self) -> &[usize] {
        &self.order
    }

    /// Slots still waiting for a value, in slot order
    pub fn unfilled(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Values in slot order, once every slot is filled
    pub fn into_values(self) -> Option<Vec<T>> {
        if !self.is_complete() {
            return None;
        }
        self.slots.into_iter().collect()
    }
}

/// Run one activation: both GETs concurrently, then a single aggregate state.
///
/// With a deadline, an activation that has not fully settled in time
/// becomes `Error("timeout: ...")` naming only the requests still pending.
pub async fn run_activation(
    client: &reqwest::Client,
    requests: &[FetchRequest; 2],
    deadline: Option<Duration>,
) -> AggregateState {
    let mut barrier = JoinBarrier::new(requests.len());
    let mut pending: FuturesUnordered<_> = requests
        .iter()
        .enumerate()
        .map(|(slot, request)| async move { (slot, fetch(client, request).await) })
        .collect();

    let expiry = async {
        match deadline {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(expiry);

    loop {
        tokio::select! {
            next = pending.next() => {
                let Some((slot, outcome)) = next else { break };
                let id = requests[slot].id();
                match &outcome {
                    FetchOutcome::Success(_) => tracing::debug!(id, "Request settled"),
                    FetchOutcome::Failure(failure) => tracing::info!(
                        id,
                        kind = failure.kind(),
                        reason = %failure,
                        "Request failed"
                    ),
                }
                if let Err(e) = barrier.fill(slot, outcome) {
                    tracing::warn!(id, error = %e, "Ignoring duplicate settlement");
                }
            }
            _ = &mut expiry => {
                let limit = deadline.unwrap_or_default();
                return AggregateState::Error(timeout_reason(requests, &barrier, limit));
            }
        }
    }
    tracing::debug!(order = ?barrier.settle_order(), "All requests settled");

    let outcomes: Option<[FetchOutcome; 2]> =
        barrier.into_values().and_then(|values| values.try_into().ok());
    match outcomes {
        Some([first, second]) => aggregate([
            (requests[0].id().to_string(), first),
            (requests[1].id().to_string(), second),
        ]),
        None => AggregateState::Error(String::from(
            "internal: activation ended with unsettled requests",
        )),
    }
}

fn timeout_reason<T>(
    requests: &[FetchRequest; 2],
    barrier: &JoinBarrier<T>,
    limit: Duration,
) -> String {
    let unsettled: Vec<&str> = barrier
        .unfilled()
        .into_iter()
        .filter_map(|slot| requests.get(slot).map(|r| r.id()))
        .collect();
    format!(
        "timeout: {} did not settle within {}ms",
        unsettled.join(" and "),
        limit.as_millis()
    )
}
