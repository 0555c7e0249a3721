// [libs/storage/wal/src/lib.rs]
//! Per-shard write-ahead log: append-and-fsync, replay, and truncation.

mod errors;
mod wal;

pub use errors::WalError;
pub use wal::Wal;
