//! Best-score persistence
//!
//! A single integer keyed by a fixed identifier, overwritten in place.
//! Read once when a session starts, written only at game over. Storage
//! failures are never fatal: the caller falls back to a best of 0.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

/// Key the best score is stored under
pub const BEST_SCORE_KEY: &str = "rdash_best";

/// Storage failures
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored best score is corrupt: {0}")]
    Corrupt(String),
}

/// Where the best score lives
pub trait BestScoreStore {
    fn load_best(&self) -> Result<u32, PersistError>;
    fn save_best(&mut self, best: u32) -> Result<(), PersistError>;
}

impl<T: BestScoreStore + ?Sized> BestScoreStore for Box<T> {
    fn load_best(&self) -> Result<u32, PersistError> {
        (**self).load_best()
    }

    fn save_best(&mut self, best: u32) -> Result<(), PersistError> {
        (**self).save_best(best)
    }
}

/// Load the best score, logging and falling back to 0 on failure
pub fn load_best_or_default<S: BestScoreStore + ?Sized>(store: &S) -> u32 {
    match store.load_best() {
        Ok(best) => {
            log::info!("Loaded best score {}", best);
            best
        }
        Err(e) => {
            log::warn!("Could not load best score ({}), starting from 0", e);
            0
        }
    }
}

/// Session-only store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Option<u32>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best: u32) -> Self {
        Self {
            best: Some(best),
            unavailable: false,
        }
    }

    /// A store that refuses every access (e.g. storage denied)
    pub fn unavailable() -> Self {
        Self {
            best: None,
            unavailable: true,
        }
    }

    pub fn stored(&self) -> Option<u32> {
        self.best
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best(&self) -> Result<u32, PersistError> {
        if self.unavailable {
            return Err(PersistError::Unavailable("storage denied".into()));
        }
        Ok(self.best.unwrap_or(0))
    }

    fn save_best(&mut self, best: u32) -> Result<(), PersistError> {
        if self.unavailable {
            return Err(PersistError::Unavailable("storage denied".into()));
        }
        self.best = Some(best);
        Ok(())
    }
}

/// JSON file store: `{ "rdash_best": N }`
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<Map<String, Value>, PersistError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Value>(&json) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(PersistError::Corrupt("expected a JSON object".into())),
            Err(e) => Err(PersistError::Corrupt(e.to_string())),
        }
    }
}

impl BestScoreStore for FileStore {
    fn load_best(&self) -> Result<u32, PersistError> {
        let map = self.read_map()?;
        match map.get(BEST_SCORE_KEY) {
            None => Ok(0),
            Some(value) => parse_best(value),
        }
    }

    fn save_best(&mut self, best: u32) -> Result<(), PersistError> {
        // Keep unrelated keys; a corrupt file is simply replaced
        let mut map = self.read_map().unwrap_or_default();
        map.insert(BEST_SCORE_KEY.to_string(), Value::from(best));
        let json = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| PersistError::Corrupt(e.to_string()))?;
        std::fs::write(&self.path, json)?;
        log::info!("Best score {} saved to {}", best, self.path.display());
        Ok(())
    }
}

/// Accept a number or a numeric string
fn parse_best(value: &Value) -> Result<u32, PersistError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| PersistError::Corrupt(format!("not a best score: {}", value)))
}

/// LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, PersistError> {
        web_sys::window()
            .ok_or_else(|| PersistError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|_| PersistError::Unavailable("localStorage denied".into()))?
            .ok_or_else(|| PersistError::Unavailable("localStorage missing".into()))
    }
}

#[cfg(target_arch = "wasm32")]
impl BestScoreStore for LocalStorageStore {
    fn load_best(&self) -> Result<u32, PersistError> {
        let item = Self::storage()?
            .get_item(BEST_SCORE_KEY)
            .map_err(|_| PersistError::Unavailable("localStorage read failed".into()))?;
        match item {
            None => Ok(0),
            Some(s) => parse_best(&Value::String(s)),
        }
    }

    fn save_best(&mut self, best: u32) -> Result<(), PersistError> {
        Self::storage()?
            .set_item(BEST_SCORE_KEY, &best.to_string())
            .map_err(|_| PersistError::Unavailable("localStorage write failed".into()))?;
        log::info!("Best score {} saved", best);
        Ok(())
    }
}
