//! Browser `localStorage` store

use web_sys::Storage;

use super::{HighScoreRecord, HighScoreStore, PersistError};

const STORAGE_KEY: &str = "drift_blaster_high_score";

#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage, PersistError> {
        web_sys::window()
            .ok_or_else(|| PersistError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| PersistError::Unavailable("localStorage disabled".into()))
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&mut self) -> Result<Option<u64>, PersistError> {
        let storage = Self::storage()?;
        let Some(json) = storage
            .get_item(STORAGE_KEY)
            .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))?
        else {
            return Ok(None);
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        Ok(Some(record.high_score))
    }

    fn save(&mut self, high_score: u64) -> Result<(), PersistError> {
        let json = serde_json::to_string(&HighScoreRecord { high_score })?;
        Self::storage()?
            .set_item(STORAGE_KEY, &json)
            .map_err(|e| PersistError::Unavailable(format!("{:?}", e)))?;
        log::info!("High score saved ({})", high_score);
        Ok(())
    }
}
