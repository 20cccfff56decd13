//! Domain layer: hook slots, subscriber storage, and override resolution.
//!
//! This module contains the dispatcher core: typed hook slots for every
//! dispatch style, the snapshot-on-fire subscriber list behind them,
//! the first-divergence resolution policy, and the hook catalogue.

pub mod chain_hook;
pub mod game_types;
pub mod hook;
pub mod hook_point;
pub mod loaded_mod;
pub mod resolution;
pub mod subscriber_id;
pub mod subscriber_list;

pub use chain_hook::ChainHook;
pub use game_types::{
    AttackDirection, GameObject, HazardType, LanguageKey, SaveGameData, SaveSlot, SetValue,
    Vector2,
};
pub use hook::Hook;
pub use hook_point::{HookInfo, HookPoint};
pub use loaded_mod::LoadedMod;
pub use resolution::{FirstDivergence, first_divergence};
pub use subscriber_id::SubscriberId;
pub use subscriber_list::SubscriberList;
