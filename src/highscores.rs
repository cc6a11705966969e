//! High score persistence
//!
//! A single best score stored under a fixed key. The backing store is a
//! [`ScoreStorage`]: LocalStorage in the browser, a plain map elsewhere.

use std::collections::HashMap;

/// Storage key for the best score
pub const HIGH_SCORE_KEY: &str = "neon_runner_highscore";

/// Minimal string key/value store
pub trait ScoreStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
}

/// In-memory storage (native runs and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok()).flatten()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    log::warn!("Failed to write {} to LocalStorage", key);
                }
            }
            None => log::warn!("LocalStorage unavailable, {} not saved", key),
        }
    }
}

/// The persisted best score
#[derive(Debug, Clone, Default)]
pub struct HighScore<S: ScoreStorage> {
    storage: S,
}

impl<S: ScoreStorage> HighScore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Stored best score, 0 if missing or unreadable
    pub fn load(&self) -> u64 {
        let Some(raw) = self.storage.get_item(HIGH_SCORE_KEY) else {
            return 0;
        };
        match raw.trim().parse::<u64>() {
            Ok(score) => score,
            Err(err) => {
                log::warn!("Ignoring unreadable high score {:?}: {}", raw, err);
                0
            }
        }
    }

    /// Record a final score. Returns true if it beat the stored best.
    pub fn submit(&mut self, score: u64) -> bool {
        if score <= self.load() {
            return false;
        }
        self.storage.set_item(HIGH_SCORE_KEY, &score.to_string());
        log::info!("New high score: {}", score);
        true
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
