//! High score persistence.
//!
//! Only one integer survives between sessions. Stores never surface errors to
//! the game: a failed read counts as 0 and a failed write is logged and dropped.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const APP_DIR: &str = "classic-snake";
const FILE_NAME: &str = "high_score.json";

pub trait ScoreStore {
    fn get(&self) -> u32;
    fn set(&mut self, value: u32);
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed score file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    #[serde(rename = "snakeHighScore", default)]
    high_score: u32,
}

/// Keeps the score as a small JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileScoreStore { path: path.into() }
    }

    /// `<data dir>/classic-snake/high_score.json`, or the working directory
    /// when the platform has no data dir.
    pub fn default_path() -> PathBuf {
        match dirs::data_dir() {
            Some(dir) => dir.join(APP_DIR).join(FILE_NAME),
            None => PathBuf::from(FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<u32, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => return Err(StoreError::Io { path: self.path.clone(), source }),
        };

        let file: ScoreFile = serde_json::from_str(&text)
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;
        Ok(file.high_score)
    }

    pub fn write(&self, value: u32) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let text = serde_json::to_string(&ScoreFile { high_score: value })
            .map_err(|source| StoreError::Parse { path: self.path.clone(), source })?;

        // Write beside the target then rename, so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)
    }
}

impl ScoreStore for FileScoreStore {
    fn get(&self) -> u32 {
        match self.read() {
            Ok(value) => value,
            Err(e) => {
                warn!("could not read high score, starting from 0: {}", e);
                0
            }
        }
    }

    fn set(&mut self, value: u32) {
        match self.write(value) {
            Ok(()) => debug!(value, path = %self.path.display(), "high score saved"),
            Err(e) => warn!("could not save high score: {}", e),
        }
    }
}

/// Session-only store, used with `--no-save`.
#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    value: u32,
    writes: usize,
}

impl MemoryScoreStore {
    pub fn new(value: u32) -> Self {
        MemoryScoreStore { value, writes: 0 }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self) -> u32 {
        self.value
    }

    fn set(&mut self, value: u32) {
        self.value = value;
        self.writes += 1;
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn get(&self) -> u32 {
        (**self).get()
    }

    fn set(&mut self, value: u32) {
        (**self).set(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileScoreStore::new(dir.path().join("none.json"));
        assert_eq!(store.read().unwrap(), 0);
        assert_eq!(store.get(), 0);
    }

    #[test]
    fn test_set_then_get_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("score.json");

        let mut store = FileScoreStore::new(&path);
        store.set(120);

        let reopened = FileScoreStore::new(&path);
        assert_eq!(reopened.get(), 120);

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("snakeHighScore"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.json");
        fs::write(&path, "not json").unwrap();

        let store = FileScoreStore::new(&path);
        assert!(matches!(store.read(), Err(StoreError::Parse { .. })));
        assert_eq!(store.get(), 0);
    }

    #[test]
    fn test_failed_write_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail
        let path = dir.path().join("taken");
        fs::create_dir(&path).unwrap();

        let mut store = FileScoreStore::new(&path);
        assert!(store.write(50).is_err());
        store.set(50);
        assert_eq!(store.get(), 0);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryScoreStore::new(30);
        assert_eq!(store.get(), 30);
        store.set(40);
        assert_eq!(store.get(), 40);
        assert_eq!(store.writes(), 1);
    }
}
