//! Network actor - runs activations in the Tokio async runtime

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::create_client;
use crate::network::join::run_activation;

/// Network actor that processes activation commands
pub struct NetworkActor {
    client: reqwest::Client,
    deadline: Option<Duration>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active: JoinSet<u64>,
    cancel_handles: HashMap<u64, oneshot::Sender<()>>,
}

impl NetworkActor {
    pub fn new(
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
        request_timeout: Duration,
        deadline: Option<Duration>,
    ) -> Self {
        NetworkActor {
            client: create_client(request_timeout),
            deadline,
            response_tx,
            active: JoinSet::new(),
            cancel_handles: HashMap::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Activate { activation, requests }) => {
                            let (cancel_tx, mut cancel_rx) = oneshot::channel();
                            self.cancel_handles.insert(activation, cancel_tx);

                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let deadline = self.deadline;

                            self.active.spawn(async move {
                                tracing::info!(activation, "Starting activation");
                                let start = Instant::now();
                                tokio::select! {
                                    biased;

                                    _ = &mut cancel_rx => {
                                        tracing::info!(activation, "Cancelled before settling");
                                    }
                                    state = run_activation(&client, &requests, deadline) => {
                                        let time_ms = start.elapsed().as_millis() as u64;
                                        tracing::info!(
                                            activation,
                                            state = state.label(),
                                            time_ms,
                                            "Activation settled"
                                        );
                                        let _ = response_tx.send(NetworkResponse::Settled {
                                            activation,
                                            state,
                                            time_ms,
                                        });
                                    }
                                }
                                activation
                            });
                        }

                        Some(NetworkCommand::Deactivate(activation)) => {
                            if let Some(cancel_tx) = self.cancel_handles.remove(&activation) {
                                tracing::info!(activation, "Deactivating");
                                let _ = cancel_tx.send(());
                            }
                        }

                        Some(NetworkCommand::Shutdown) | None => {
                            for (_, cancel_tx) in self.cancel_handles.drain() {
                                let _ = cancel_tx.send(());
                            }
                            self.active.shutdown().await;
                            break;
                        }
                    }
                }

                Some(result) = self.active.join_next() => {
                    if let Ok(activation) = result {
                        self.cancel_handles.remove(&activation);
                    }
                }
            }
        }
    }
}
