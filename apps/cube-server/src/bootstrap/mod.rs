// [apps/cube-server/src/bootstrap/mod.rs]
//! Boot sequence: spawn every shard (replaying its WAL and warming its
//! filter), build the router and transaction manager, and start the
//! stale-transaction sweep — all before the HTTP listener opens.

use crate::state::AppState;
use cube_engine::Router as ShardRouter;
use cube_txn::{spawn_stale_sweep, TransactionManager};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

pub struct Bootstrap;

impl Bootstrap {
    #[instrument(skip(data_dir), fields(data_dir = %data_dir.display()))]
    pub fn ignite(data_dir: &Path) -> Result<AppState, cube_engine::EngineError> {
        info!("booting shard engines and replaying write-ahead logs");
        let router = Arc::new(ShardRouter::boot(data_dir)?);

        let transactions = Arc::new(TransactionManager::new(router));
        spawn_stale_sweep(transactions.clone());

        info!("boot complete");
        Ok(AppState { transactions })
    }
}
