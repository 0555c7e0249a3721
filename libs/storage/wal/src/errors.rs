// [libs/storage/wal/src/errors.rs]
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum WalError {
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WalError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        WalError::Io { path: path.to_path_buf(), source }
    }
}
