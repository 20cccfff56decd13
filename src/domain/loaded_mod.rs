//! Record of a mod that registered with the dispatcher.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A mod known to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedMod {
    /// Mod name as reported by the loader.
    pub name: String,
    /// When the mod registered.
    pub loaded_at: DateTime<Utc>,
}

impl LoadedMod {
    /// Creates a record stamped with the current time.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            loaded_at: Utc::now(),
        }
    }
}
