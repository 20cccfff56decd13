//! Outbound seam to host-owned state.
//!
//! The dispatcher never owns game state. Baseline values for override
//! hooks come from a [`PlayerDataStore`] and a [`LanguageSource`], and
//! the default actions of intercept hooks write back through them.
//! Missing keys yield the type's default rather than an error.
//!
//! [`MemoryPlayerData`] and [`MemoryLanguage`] are in-memory
//! implementations used by tests and the demo binary.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::domain::{LanguageKey, SaveGameData, SaveSlot};

/// Named flags and counters owned by the host.
pub trait PlayerDataStore: fmt::Debug + Send + Sync {
    /// Reads a bool field; missing fields read as `false`.
    fn get_bool(&self, key: &str) -> bool;
    /// Writes a bool field.
    fn set_bool(&self, key: &str, value: bool);
    /// Reads an int field; missing fields read as `0`.
    fn get_int(&self, key: &str) -> i32;
    /// Writes an int field.
    fn set_int(&self, key: &str, value: i32);
}

/// Shared handle to the host's player data.
pub type SharedPlayerData = Arc<dyn PlayerDataStore>;

/// Localized string tables owned by the host.
pub trait LanguageSource: fmt::Debug + Send + Sync {
    /// Looks up `key`; missing entries yield an empty string.
    fn get(&self, key: &LanguageKey) -> String;
}

#[derive(Debug, Default)]
struct Fields {
    bools: HashMap<String, bool>,
    ints: HashMap<String, i32>,
}

/// In-memory [`PlayerDataStore`].
#[derive(Debug, Default)]
pub struct MemoryPlayerData {
    fields: RwLock<Fields>,
}

impl MemoryPlayerData {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled from save data.
    #[must_use]
    pub fn from_save(data: &SaveGameData) -> Self {
        let fields = Fields {
            bools: data.bools.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            ints: data.ints.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        };
        Self {
            fields: RwLock::new(fields),
        }
    }

    /// Copies the current fields into save data for `slot`.
    #[must_use]
    pub fn to_save(&self, slot: SaveSlot) -> SaveGameData {
        let fields = self.fields.read().unwrap_or_else(PoisonError::into_inner);
        SaveGameData {
            slot,
            bools: fields.bools.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            ints: fields.ints.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            mod_data: Default::default(),
        }
    }
}

impl PlayerDataStore for MemoryPlayerData {
    fn get_bool(&self, key: &str) -> bool {
        let fields = self.fields.read().unwrap_or_else(PoisonError::into_inner);
        fields.bools.get(key).copied().unwrap_or_default()
    }

    fn set_bool(&self, key: &str, value: bool) {
        let mut fields = self.fields.write().unwrap_or_else(PoisonError::into_inner);
        fields.bools.insert(key.to_string(), value);
    }

    fn get_int(&self, key: &str) -> i32 {
        let fields = self.fields.read().unwrap_or_else(PoisonError::into_inner);
        fields.ints.get(key).copied().unwrap_or_default()
    }

    fn set_int(&self, key: &str, value: i32) {
        let mut fields = self.fields.write().unwrap_or_else(PoisonError::into_inner);
        fields.ints.insert(key.to_string(), value);
    }
}

/// In-memory [`LanguageSource`].
#[derive(Debug, Default)]
pub struct MemoryLanguage {
    entries: RwLock<HashMap<LanguageKey, String>>,
}

impl MemoryLanguage {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry.
    pub fn insert(&self, key: LanguageKey, text: impl Into<String>) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, text.into());
    }
}

impl LanguageSource for MemoryLanguage {
    fn get(&self, key: &LanguageKey) -> String {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .unwrap_or_default()
    }
}
