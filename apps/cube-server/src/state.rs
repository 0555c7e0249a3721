// [apps/cube-server/src/state.rs]
use cube_txn::TransactionManager;
use std::sync::Arc;

/// Shared application state handed to every axum handler.
#[derive(Clone)]
pub struct AppState {
    pub transactions: Arc<TransactionManager>,
}
