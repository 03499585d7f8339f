//! JSON file store for native builds

use std::fs;
use std::path::{Path, PathBuf};

use super::{HighScoreRecord, HighScoreStore, PersistError};

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<u64>, PersistError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: HighScoreRecord = serde_json::from_str(&json)?;
        Ok(Some(record.high_score))
    }

    fn save(&mut self, high_score: u64) -> Result<(), PersistError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(&HighScoreRecord { high_score })?;
        fs::write(&self.path, json)?;
        log::debug!("High score {} written to {}", high_score, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("drift_blaster_{}_{}", name, std::process::id()))
            .join("high_score.json")
    }

    #[test]
    fn test_missing_file_is_empty() {
        let mut store = JsonFileStore::new(scratch("missing"));
        assert_eq!(store.load().expect("load"), None);
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch("roundtrip");
        let mut store = JsonFileStore::new(&path);
        store.save(4321).expect("save");
        assert_eq!(store.load().expect("load"), Some(4321));
        let _ = fs::remove_dir_all(path.parent().expect("has parent"));
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let path = scratch("corrupt");
        fs::create_dir_all(path.parent().expect("has parent")).expect("mkdir");
        fs::write(&path, "{ high_score: ").expect("write");
        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(PersistError::Parse(_))));
        let _ = fs::remove_dir_all(path.parent().expect("has parent"));
    }
}
