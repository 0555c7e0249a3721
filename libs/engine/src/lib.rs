// [libs/engine/src/lib.rs]
//! Per-shard engine (filter + WAL + data file, one owning task per shard)
//! and the stateless router that dispatches a key to its shard.

mod errors;
mod router;
mod shard_actor;

pub use errors::EngineError;
pub use router::Router;
pub use shard_actor::ShardHandle;
