//! Value types passed between the host engine and hook subscribers.
//!
//! These mirror the small engine structs that cross the hook boundary.
//! Anything owned by the engine proper (scene graph, controllers) is
//! reduced to the fields mods actually read.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Save slot number.
pub type SaveSlot = i32;

/// Direction of a player attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackDirection {
    /// Horizontal swing.
    Normal,
    /// Upward swing.
    Upward,
    /// Downward swing.
    Downward,
}

/// Kind of hazard that caused damage.
///
/// Kept as the engine's raw integer so unknown hazards from newer game
/// versions still pass through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HazardType(pub i32);

impl HazardType {
    /// Ordinary enemy contact.
    pub const NORMAL: Self = Self(1);
    /// Spikes.
    pub const SPIKES: Self = Self(2);
    /// Acid.
    pub const ACID: Self = Self(3);
    /// Lava.
    pub const LAVA: Self = Self(4);
    /// Bottomless pit.
    pub const PIT: Self = Self(5);
}

/// 2D vector used for velocities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

impl Vector2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a vector from its components.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A player-data write: the field name and the value being stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetValue<T> {
    /// Player-data field name.
    pub key: String,
    /// Value the game wants to store.
    pub value: T,
}

impl<T> SetValue<T> {
    /// Creates a new write request.
    #[must_use]
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Localization lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageKey {
    /// Entry key within the sheet.
    pub key: String,
    /// Sheet (table) the entry lives in.
    pub sheet: String,
}

impl LanguageKey {
    /// Creates a lookup key.
    #[must_use]
    pub fn new(key: impl Into<String>, sheet: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            sheet: sheet.into(),
        }
    }
}

impl fmt::Display for LanguageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.sheet, self.key)
    }
}

/// A freshly created engine object carrying a collider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameObject {
    /// Object name in the scene graph.
    pub name: String,
    /// Scene the object was created in.
    pub scene: String,
}

/// Save data handed to mods around load and save.
///
/// Only the player-data tables and per-mod payloads are modelled; the
/// rest of the save belongs to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveGameData {
    /// Save slot this data belongs to.
    pub slot: SaveSlot,
    /// Boolean player-data fields.
    pub bools: BTreeMap<String, bool>,
    /// Integer player-data fields.
    pub ints: BTreeMap<String, i32>,
    /// Opaque per-mod payloads keyed by mod name.
    #[serde(default)]
    pub mod_data: BTreeMap<String, serde_json::Value>,
}

impl SaveGameData {
    /// Creates empty save data for `slot`.
    #[must_use]
    pub fn new(slot: SaveSlot) -> Self {
        Self {
            slot,
            ..Self::default()
        }
    }
}
