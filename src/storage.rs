//! Durable client preferences (the browser's key/value storage, abstracted).
//!
//! Storage is best-effort: private modes and quota errors make writes fail,
//! so every caller treats a failed write as non-fatal.

use std::collections::HashMap;
use std::sync::Mutex;

use thiserror::Error;

pub const PREFERRED_LANGUAGE_KEY: &str = "preferredLanguage";
pub const PREFERRED_BACKGROUND_KEY: &str = "preferredBackground";

#[derive(Debug, Clone, Error)]
#[error("preference store unavailable: {0}")]
pub struct StoreError(pub String);

pub trait PreferenceStore: Send + Sync {
    /// Read a stored value; absence and read failure are both `None`.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and headless hosts.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .expect("preference store lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .lock()
            .expect("preference store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.get(PREFERRED_LANGUAGE_KEY), None);
        store.set(PREFERRED_LANGUAGE_KEY, "ru").unwrap();
        assert_eq!(store.get(PREFERRED_LANGUAGE_KEY).as_deref(), Some("ru"));
    }
}
