// [libs/storage/persistence/src/data_file.rs]
use crate::errors::PersistenceError;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Lines, Write};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// A single shard's line-oriented LTTLV data file.
///
/// Serialization is the shard engine's job (one owner per shard); this
/// type performs no internal locking.
pub struct DataFile {
    path: PathBuf,
}

impl DataFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Replaces the first line starting with `key_prefix` with `record`
    /// (trimmed), or appends `record` if no such line exists. Crash-safe:
    /// the new content is written to a sibling temp file and atomically
    /// renamed over the original.
    #[instrument(skip(self, record, key_prefix), fields(path = %self.path.display()))]
    pub fn update_or_append(&self, record: &str, key_prefix: &str) -> Result<(), PersistenceError> {
        let trimmed = record.trim_end_matches('\n');

        let existing_lines: Vec<String> = if self.exists() {
            let file = File::open(&self.path).map_err(|e| PersistenceError::io(&self.path, e))?;
            BufReader::new(file)
                .lines()
                .collect::<std::io::Result<Vec<String>>>()
                .map_err(|e| PersistenceError::io(&self.path, e))?
        } else {
            Vec::new()
        };

        let mut replaced = false;
        let mut new_lines = Vec::with_capacity(existing_lines.len() + 1);
        for line in existing_lines {
            if !replaced && line.starts_with(key_prefix) {
                new_lines.push(trimmed.to_string());
                replaced = true;
            } else {
                new_lines.push(line);
            }
        }
        if !replaced {
            new_lines.push(trimmed.to_string());
        }

        let temp_path = self.sibling_temp_path();
        {
            let temp_file = File::create(&temp_path).map_err(|e| PersistenceError::io(&temp_path, e))?;
            let mut writer = BufWriter::new(temp_file);
            for line in &new_lines {
                writer.write_all(line.as_bytes()).map_err(|e| PersistenceError::io(&temp_path, e))?;
                writer.write_all(b"\n").map_err(|e| PersistenceError::io(&temp_path, e))?;
            }
            writer.flush().map_err(|e| PersistenceError::io(&temp_path, e))?;
            writer.get_ref().sync_all().map_err(|e| PersistenceError::io(&temp_path, e))?;
        }
        fs::rename(&temp_path, &self.path).map_err(|e| PersistenceError::io(&self.path, e))?;
        Ok(())
    }

    /// Returns the last line starting with `prefix`, trimmed of its
    /// trailing newline, or `None` if no line matches or the file is
    /// absent.
    #[instrument(skip(self, prefix), fields(path = %self.path.display()))]
    pub fn read_line_by_prefix(&self, prefix: &str) -> Result<Option<String>, PersistenceError> {
        if !self.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path).map_err(|e| PersistenceError::io(&self.path, e))?;
        let mut last_match = None;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| PersistenceError::io(&self.path, e))?;
            if line.starts_with(prefix) {
                last_match = Some(line);
            }
        }
        Ok(last_match)
    }

    /// A lazy iterator over the file's lines, for filter warm-up. Empty
    /// if the file is absent.
    pub fn stream_lines(&self) -> Result<StreamLines, PersistenceError> {
        if !self.exists() {
            return Ok(StreamLines(None));
        }
        let file = File::open(&self.path).map_err(|e| PersistenceError::io(&self.path, e))?;
        Ok(StreamLines(Some(BufReader::new(file).lines())))
    }

    fn sibling_temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        let file_name = temp.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        temp.set_file_name(format!("{file_name}.tmp"));
        temp
    }
}

/// Lazy line iterator returned by [`DataFile::stream_lines`].
pub struct StreamLines(Option<Lines<BufReader<File>>>);

impl Iterator for StreamLines {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.as_mut()?.next()
    }
}
