// [libs/storage/persistence/src/errors.rs]
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        PersistenceError::Io { path: path.to_path_buf(), source }
    }
}
