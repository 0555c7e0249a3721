// [libs/storage/wal/src/wal.rs]
use crate::errors::WalError;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::instrument;

/// One shard's append-only write-ahead log.
///
/// `log` only returns once the record has been fsynced; a record that
/// survives to [`Wal::replay`] after a crash is guaranteed durable even if
/// the corresponding data-file mutation never happened.
pub struct Wal {
    path: PathBuf,
    writer: Mutex<Option<File>>,
}

impl Wal {
    pub fn new(path: PathBuf) -> Self {
        Self { path, writer: Mutex::new(None) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `record` and fsyncs before returning. `record` need not
    /// already end in `\n`; one is added if missing.
    #[instrument(skip(self, record), fields(path = %self.path.display()))]
    pub fn log(&self, record: &str) -> Result<(), WalError> {
        let mut guard = self.writer.lock().expect("wal writer mutex poisoned");
        if guard.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
                .map_err(|e| WalError::io(&self.path, e))?;
            *guard = Some(file);
        }
        let file = guard.as_mut().expect("writer handle populated above");
        file.write_all(record.as_bytes()).map_err(|e| WalError::io(&self.path, e))?;
        if !record.ends_with('\n') {
            file.write_all(b"\n").map_err(|e| WalError::io(&self.path, e))?;
        }
        file.sync_all().map_err(|e| WalError::io(&self.path, e))?;
        Ok(())
    }

    /// Returns every nonempty line, trimmed, in append order. Empty if the
    /// log is absent.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn replay(&self) -> Result<Vec<String>, WalError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&self.path).map_err(|e| WalError::io(&self.path, e))?;
        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| WalError::io(&self.path, e))?;
            if !line.is_empty() {
                records.push(line);
            }
        }
        Ok(records)
    }

    /// Deletes the log file, if present. A fresh handle is opened on the
    /// next `log` call.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn clear(&self) -> Result<(), WalError> {
        let mut guard = self.writer.lock().expect("wal writer mutex poisoned");
        *guard = None;
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| WalError::io(&self.path, e))?;
        }
        Ok(())
    }
}
