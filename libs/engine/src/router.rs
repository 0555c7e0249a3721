// [libs/engine/src/router.rs]
use crate::errors::EngineError;
use crate::shard_actor::{spawn_shard_actor, ShardHandle};
use cube_core_codec::{shard_of, ShardId, SHARD_COUNT};
use cube_core_model::Value;
use std::path::Path;

/// Stateless dispatch from key to the shard that owns it. Holds one
/// handle per shard, indexed by [`ShardId`].
pub struct Router {
    shards: Vec<ShardHandle>,
}

impl Router {
    /// Boots every shard (in order) and builds the routing table. Each
    /// shard's boot replays its WAL and warms its filter before this
    /// returns.
    pub fn boot(data_dir: &Path) -> Result<Self, EngineError> {
        let mut shards = Vec::with_capacity(SHARD_COUNT as usize);
        for index in 0..SHARD_COUNT {
            shards.push(spawn_shard_actor(data_dir, ShardId::new(index))?);
        }
        Ok(Self { shards })
    }

    pub async fn get(&self, key: &[u8]) -> Result<Vec<u8>, EngineError> {
        self.handle_for(key).get(key.to_vec()).await
    }

    pub async fn set(&self, key: &[u8], value: Value) -> Result<(Vec<u8>, Vec<u8>), EngineError> {
        self.handle_for(key).set(key.to_vec(), value).await
    }

    fn handle_for(&self, key: &[u8]) -> &ShardHandle {
        let key_hex = hex::encode_upper(key);
        &self.shards[shard_of(&key_hex).index()]
    }
}
