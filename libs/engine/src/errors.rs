// [libs/engine/src/errors.rs]
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("codec failure: {0}")]
    Codec(#[from] cube_core_codec::CodecError),

    #[error("write-ahead log failure: {0}")]
    Wal(#[from] cube_storage_wal::WalError),

    #[error("persistence failure: {0}")]
    Persistence(#[from] cube_storage_persistence::PersistenceError),

    #[error("shard actor for shard {0} is no longer running")]
    ShardUnavailable(String),
}
