// [libs/txn/src/manager.rs]
use crate::client_state::ClientState;
use crate::errors::TxnError;
use cube_core_model::Value;
use cube_engine::Router;
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex as AsyncMutex;
use tracing::instrument;

const NIL: &[u8] = b"NIL";

/// Per-client transaction state, keyed by client name. A client with no
/// entry is outside a transaction; `GET`/`SET` pass straight through to
/// the [`Router`]. An entry is created at `BEGIN` and removed at
/// `COMMIT`/`ROLLBACK` or by [`TransactionManager::sweep_stale`].
pub struct TransactionManager {
    router: Arc<Router>,
    clients: StdMutex<HashMap<String, Arc<AsyncMutex<ClientState>>>>,
}

impl TransactionManager {
    pub fn new(router: Arc<Router>) -> Self {
        Self { router, clients: StdMutex::new(HashMap::new()) }
    }

    fn entry_for(&self, client: &str) -> Option<Arc<AsyncMutex<ClientState>>> {
        self.clients.lock().expect("client map poisoned").get(client).cloned()
    }

    #[instrument(skip(self, key), fields(client))]
    pub async fn get(&self, client: &str, key: &[u8]) -> Result<Vec<u8>, TxnError> {
        let Some(state) = self.entry_for(client) else {
            return Ok(self.router.get(key).await?);
        };
        let mut state = state.lock().await;
        if let Some(value) = state.writes.get(key) {
            return Ok(value.canonical_string());
        }
        if let Some(snapshot) = state.reads.get(key) {
            return Ok(snapshot.clone());
        }
        let snapshot = self.router.get(key).await.unwrap_or_else(|_| NIL.to_vec());
        state.reads.insert(key.to_vec(), snapshot.clone());
        Ok(snapshot)
    }

    #[instrument(skip(self, key, value), fields(client))]
    pub async fn set(&self, client: &str, key: &[u8], value: Value) -> Result<(Vec<u8>, Vec<u8>), TxnError> {
        let Some(state) = self.entry_for(client) else {
            return Ok(self.router.set(key, value).await?);
        };
        let mut state = state.lock().await;
        let new_value_string = value.canonical_string();

        let old_value_string = if let Some(existing) = state.writes.get(key) {
            existing.canonical_string()
        } else if let Some(snapshot) = state.reads.get(key) {
            snapshot.clone()
        } else {
            let snapshot = self.router.get(key).await.unwrap_or_else(|_| NIL.to_vec());
            state.reads.insert(key.to_vec(), snapshot.clone());
            snapshot
        };

        state.writes.insert(key.to_vec(), value);
        Ok((old_value_string, new_value_string))
    }

    #[instrument(skip(self), fields(client))]
    pub fn begin(&self, client: &str) -> Result<(), TxnError> {
        let mut clients = self.clients.lock().expect("client map poisoned");
        if clients.contains_key(client) {
            return Err(TxnError::AlreadyInTransaction);
        }
        clients.insert(client.to_string(), Arc::new(AsyncMutex::new(ClientState::new())));
        Ok(())
    }

    /// Checks every read against the router's current value; any
    /// mismatch is a conflict. On success, applies every buffered write
    /// and discards the transaction. On conflict, the transaction is
    /// still discarded (first-committer-wins: a loser does not get to
    /// retry its own state).
    #[instrument(skip(self), fields(client))]
    pub async fn commit(&self, client: &str) -> Result<(), TxnError> {
        let state = {
            let mut clients = self.clients.lock().expect("client map poisoned");
            clients.remove(client)
        };
        let state = state.ok_or(TxnError::NoTransactionInProgress)?;
        let state = state.lock().await;

        let mut conflicts = Vec::new();
        for (key, expected) in state.reads.iter() {
            let current = self.router.get(key).await.unwrap_or_else(|_| NIL.to_vec());
            if &current != expected {
                conflicts.push(key.clone());
            }
        }

        if !conflicts.is_empty() {
            conflicts.sort();
            let keys = conflicts.iter().map(|k| String::from_utf8_lossy(k).into_owned()).collect::<Vec<_>>().join(", ");
            return Err(TxnError::AtomicityFailure { keys });
        }

        for (key, value) in state.writes.iter() {
            self.router.set(key, value.clone()).await?;
        }
        Ok(())
    }

    #[instrument(skip(self), fields(client))]
    pub fn rollback(&self, client: &str) -> Result<(), TxnError> {
        let mut clients = self.clients.lock().expect("client map poisoned");
        if clients.remove(client).is_none() {
            return Err(TxnError::NoTransactionInProgress);
        }
        Ok(())
    }

    /// Drops every client entry whose transaction has been open longer
    /// than `max_idle`. A client whose state is mid-commit is skipped this
    /// round rather than blocked on; the next sweep will catch it.
    pub(crate) fn sweep_stale(&self, max_idle: std::time::Duration) -> usize {
        let mut clients = self.clients.lock().expect("client map poisoned");
        let before = clients.len();
        clients.retain(|_, state| match state.try_lock() {
            Ok(state) => state.began_at.elapsed() <= max_idle,
            Err(_) => true,
        });
        before - clients.len()
    }
}
