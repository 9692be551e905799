//! Network actor - runs fetches in the Tokio async runtime

use std::collections::HashMap;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::FetchError;
use crate::messages::network::{Fetch, Payload};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{Character, Product};
use crate::network::client::{create_client, ApiClient};

/// Clients for both remote APIs
#[derive(Clone, Debug)]
pub struct Apis {
    pub characters: ApiClient,
    pub store: ApiClient,
}

impl Apis {
    pub fn from_config(config: &Config) -> Self {
        let http = create_client(config.request_timeout());
        let apis = Apis {
            characters: ApiClient::new(http.clone(), config.character_api_url.clone()),
            store: ApiClient::new(http, config.store_api_url.clone()),
        };
        tracing::info!(
            characters = apis.characters.base_url(),
            store = apis.store.base_url(),
            "API clients ready"
        );
        apis
    }

    /// Run one fetch to completion
    pub async fn execute(&self, fetch: Fetch) -> Result<Payload, FetchError> {
        match fetch {
            Fetch::ListCharacters => self
                .characters
                .list_collection::<Character>(None)
                .await
                .map(Payload::Characters),
            Fetch::Character(id) => self
                .characters
                .get_by_id::<Character>(id)
                .await
                .map(Payload::Character),
            Fetch::ListProducts { limit } => self
                .store
                .list_collection::<Product>(limit)
                .await
                .map(Payload::Products),
            Fetch::Product(id) => self
                .store
                .get_by_id::<Product>(id)
                .await
                .map(Payload::Product),
        }
    }
}

/// Network actor that processes fetch commands
pub struct NetworkActor {
    apis: Apis,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
    cancel_handles: HashMap<u64, oneshot::Sender<()>>,
}

impl NetworkActor {
    pub fn new(apis: Apis, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            apis,
            response_tx,
            active_requests: JoinSet::new(),
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
                        Some(NetworkCommand::Execute { id, fetch }) => self.spawn_fetch(id, fetch),

                        Some(NetworkCommand::Cancel(id)) => {
                            if let Some(cancel_tx) = self.cancel_handles.remove(&id) {
                                tracing::info!(id, "Cancelling fetch");
                                let _ = cancel_tx.send(());
                                let _ = self.response_tx.send(NetworkResponse::Cancelled { id });
                            }
                        }

                        Some(NetworkCommand::Shutdown) => {
                            for (_, cancel_tx) in self.cancel_handles.drain() {
                                let _ = cancel_tx.send(());
                            }
                            break;
                        }

                        None => break,
                    }
                }

                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        tracing::warn!(error = %e, "Fetch task ended abnormally");
                    }
                    self.cancel_handles.retain(|_, tx| !tx.is_closed());
                }
            }
        }

        self.active_requests.shutdown().await;
    }

    fn spawn_fetch(&mut self, id: u64, fetch: Fetch) {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        self.cancel_handles.insert(id, cancel_tx);

        let response_tx = self.response_tx.clone();
        let apis = self.apis.clone();

        self.active_requests.spawn(async move {
            tracing::info!(id, fetch = ?fetch, "Executing fetch");
            let start = Instant::now();

            let result = tokio::select! {
                biased;

                _ = &mut cancel_rx => return,
                result = apis.execute(fetch) => result,
            };

            let time_ms = start.elapsed().as_millis() as u64;
            let response = match result {
                Ok(payload) => {
                    tracing::info!(id, time_ms, "Fetch completed");
                    NetworkResponse::Success { id, payload, time_ms }
                }
                Err(error) => {
                    tracing::warn!(id, time_ms, error = %error, "Fetch failed");
                    NetworkResponse::Failure { id, error, time_ms }
                }
            };
            let _ = response_tx.send(response);
        });
    }
}
