//! High score persistence
//!
//! The host loads once at startup and saves after each frame's ticks, never
//! from inside a tick. Failures are logged by the caller and otherwise ignored.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage failure
#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Backend not reachable (no window, storage disabled, injected failure)
    Unavailable(String),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "io error: {}", e),
            PersistError::Parse(e) => write!(f, "invalid record: {}", e),
            PersistError::Unavailable(why) => write!(f, "storage unavailable: {}", why),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Io(e) => Some(e),
            PersistError::Parse(e) => Some(e),
            PersistError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Parse(e)
    }
}

/// On-disk / in-storage shape of the saved high score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

/// Backend that keeps the best score between sessions
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&mut self) -> Result<Option<u64>, PersistError>;

    fn save(&mut self, high_score: u64) -> Result<(), PersistError>;
}

/// In-process store; can be told to fail for exercising error paths
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<u64>,
    pub fail_load: bool,
    pub fail_save: bool,
    /// Successful writes, in order
    pub writes: Vec<u64>,
}

impl MemoryStore {
    pub fn with_value(value: u64) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<Option<u64>, PersistError> {
        if self.fail_load {
            return Err(PersistError::Unavailable("load disabled".into()));
        }
        Ok(self.value)
    }

    fn save(&mut self, high_score: u64) -> Result<(), PersistError> {
        if self.fail_save {
            return Err(PersistError::Unavailable("save disabled".into()));
        }
        self.value = Some(high_score);
        self.writes.push(high_score);
        Ok(())
    }
}
