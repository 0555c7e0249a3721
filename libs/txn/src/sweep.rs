// [libs/txn/src/sweep.rs]
use crate::manager::TransactionManager;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::info;

const SWEEP_PERIOD: Duration = Duration::from_secs(60);
const MAX_IDLE: Duration = Duration::from_secs(60 * 60);

/// Spawns the once-per-minute stale-transaction sweep. A transaction idle
/// past `MAX_IDLE` is dropped as if its client had rolled it back.
pub fn spawn_stale_sweep(manager: Arc<TransactionManager>) {
    tokio::spawn(async move {
        let mut ticker = interval(SWEEP_PERIOD);
        loop {
            ticker.tick().await;
            let reaped = manager.sweep_stale(MAX_IDLE);
            if reaped > 0 {
                info!(reaped, "swept stale transactions");
            }
        }
    });
}
