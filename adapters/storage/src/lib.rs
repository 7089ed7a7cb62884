#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Persistence adapter storing whole-world snapshots as JSON blobs.
//!
//! Storage problems never reach gameplay: every failure is logged and
//! degrades to "no saved state".

mod store;

use carbon_quest_world::WorldSnapshot;

pub use store::{DirectoryStore, KeyValueStore, MemoryStore, StoreError};

/// Key under which the game state is persisted.
pub const SAVE_KEY: &str = "cosmic-carbon-quest-save";

/// Single save slot backed by a key-value store.
pub struct SaveSlot {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl SaveSlot {
    /// Creates a slot writing under [`SAVE_KEY`].
    #[must_use]
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self::with_key(store, SAVE_KEY)
    }

    /// Creates a slot writing under a custom key.
    #[must_use]
    pub fn with_key(store: impl KeyValueStore + 'static, key: impl Into<String>) -> Self {
        Self {
            store: Box::new(store),
            key: key.into(),
        }
    }

    /// Key the slot writes under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serialises and writes the snapshot. Returns whether it was stored.
    pub fn save(&mut self, snapshot: &WorldSnapshot) -> bool {
        let json = match serde_json::to_string(snapshot) {
            Ok(json) => json,
            Err(error) => {
                log::error!("failed to serialise game state: {error}");
                return false;
            }
        };
        match self.store.set(&self.key, &json) {
            Ok(()) => {
                log::trace!("saved {} bytes under `{}`", json.len(), self.key);
                true
            }
            Err(error) => {
                log::error!("failed to save game state: {error}");
                false
            }
        }
    }

    /// Reads the stored snapshot. Missing, unreadable or corrupt saves yield `None`.
    #[must_use]
    pub fn load(&self) -> Option<WorldSnapshot> {
        let json = match self.store.get(&self.key) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(error) => {
                log::warn!("failed to read saved game state: {error}");
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(snapshot) => Some(snapshot),
            Err(error) => {
                log::warn!("ignoring corrupt saved game state: {error}");
                None
            }
        }
    }

    /// Deletes the stored snapshot.
    pub fn clear(&mut self) {
        if let Err(error) = self.store.remove(&self.key) {
            log::error!("failed to clear saved game state: {error}");
        }
    }

    /// Reports whether anything is stored under the slot's key.
    #[must_use]
    pub fn exists(&self) -> bool {
        match self.store.get(&self.key) {
            Ok(value) => value.is_some(),
            Err(error) => {
                log::warn!("failed to probe saved game state: {error}");
                false
            }
        }
    }
}

impl std::fmt::Debug for SaveSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveSlot").field("key", &self.key).finish()
    }
}
