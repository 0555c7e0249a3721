// [libs/engine/src/shard_actor.rs]
use crate::errors::EngineError;
use cube_core_bloom::CountingBloomFilter;
use cube_core_codec::{decode, encode_get, encode_set, extract_key_prefix, ShardId};
use cube_core_model::Value;
use cube_storage_persistence::DataFile;
use cube_storage_wal::Wal;
use std::path::Path;
use tokio::sync::{mpsc, oneshot};
use tracing::{instrument, warn};

const NIL: &[u8] = b"NIL";

enum ShardMessage {
    Get { key: Vec<u8>, reply: oneshot::Sender<Result<Vec<u8>, EngineError>> },
    Set { key: Vec<u8>, value: Value, reply: oneshot::Sender<Result<(Vec<u8>, Vec<u8>), EngineError>> },
}

/// A handle to a running shard actor's mailbox. Cloning a handle is cheap
/// (it clones the sender); the owning task behind it serializes every
/// message FIFO.
#[derive(Clone)]
pub struct ShardHandle {
    sender: mpsc::Sender<ShardMessage>,
}

impl ShardHandle {
    pub async fn get(&self, key: Vec<u8>) -> Result<Vec<u8>, EngineError> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(ShardMessage::Get { key, reply })
            .await
            .map_err(|_| EngineError::ShardUnavailable("mailbox closed".into()))?;
        rx.await.map_err(|_| EngineError::ShardUnavailable("actor dropped reply".into()))?
    }

    pub async fn set(&self, key: Vec<u8>, value: Value) -> Result<(Vec<u8>, Vec<u8>), EngineError> {
        let (reply, rx) = oneshot::channel();
        self.sender
            .send(ShardMessage::Set { key, value, reply })
            .await
            .map_err(|_| EngineError::ShardUnavailable("mailbox closed".into()))?;
        rx.await.map_err(|_| EngineError::ShardUnavailable("actor dropped reply".into()))?
    }
}

struct ShardActor {
    shard_id: ShardId,
    filter: CountingBloomFilter,
    data_file: DataFile,
    wal: Wal,
}

impl ShardActor {
    /// Boots a shard: fresh filter, WAL replay into the data file, then a
    /// warm-up scan of the data file to repopulate the filter.
    #[instrument(skip(data_dir), fields(shard = %shard_id))]
    fn boot(data_dir: &Path, shard_id: ShardId) -> Result<Self, EngineError> {
        let data_file = DataFile::new(data_dir.join(format!("shard_{shard_id}_data.txt")));
        let wal = Wal::new(data_dir.join(format!("wal_shard_{shard_id}.log")));
        let filter = CountingBloomFilter::default();

        for record in wal.replay()? {
            let prefix = extract_key_prefix(&record)?;
            data_file.update_or_append(&record, prefix)?;
        }
        wal.clear()?;

        for line in data_file.stream_lines()? {
            match line {
                Ok(line) => match extract_key_prefix(&line) {
                    Ok(prefix) => filter.add(prefix.as_bytes()),
                    Err(e) => warn!(shard = %shard_id, error = %e, "skipping corrupted line during warm-up"),
                },
                Err(e) => warn!(shard = %shard_id, error = %e, "I/O error streaming data file during warm-up"),
            }
        }

        Ok(Self { shard_id, filter, data_file, wal })
    }

    fn get(&self, key: &[u8]) -> Result<Vec<u8>, EngineError> {
        let (prefix, _) = encode_get(key)?;
        if !self.filter.contains(prefix.as_bytes()) {
            return Ok(NIL.to_vec());
        }
        match self.data_file.read_line_by_prefix(&prefix)? {
            None => Ok(NIL.to_vec()),
            Some(line) => match decode(&line) {
                Ok(bytes) => Ok(bytes),
                Err(e) => {
                    warn!(shard = %self.shard_id, error = %e, "corrupted line, returning NIL");
                    Ok(NIL.to_vec())
                }
            },
        }
    }

    fn set(&mut self, key: &[u8], value: &Value) -> Result<(Vec<u8>, Vec<u8>), EngineError> {
        let (record, _) = encode_set(key, value)?;
        let prefix = extract_key_prefix(&record)?.to_string();
        let new_value_string = value.canonical_string();

        let old_value_string = self.get(key)?;

        self.wal.log(&record)?;
        self.data_file.update_or_append(&record, &prefix)?;
        self.filter.add(prefix.as_bytes());

        Ok((old_value_string, new_value_string))
    }
}

/// Spawns the owning task for `shard_id`, booting it (WAL replay + filter
/// warm-up) before the task starts serving its mailbox.
pub fn spawn_shard_actor(data_dir: &Path, shard_id: ShardId) -> Result<ShardHandle, EngineError> {
    let mut actor = ShardActor::boot(data_dir, shard_id)?;
    let (sender, mut receiver) = mpsc::channel::<ShardMessage>(256);

    tokio::spawn(async move {
        while let Some(message) = receiver.recv().await {
            match message {
                ShardMessage::Get { key, reply } => {
                    let _ = reply.send(actor.get(&key));
                }
                ShardMessage::Set { key, value, reply } => {
                    let _ = reply.send(actor.set(&key, &value));
                }
            }
        }
    });

    Ok(ShardHandle { sender })
}
