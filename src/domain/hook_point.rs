//! Catalogue of every hook point the host exposes to mods.
//!
//! Each [`HookPoint`] names one interception site inside the engine.
//! The catalogue carries a human-readable description and the host
//! method being intercepted, and is serializable so tooling can list
//! the available hooks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named interception site in the host engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookPoint {
    /// Anything in the game sets a bool in player data.
    SetPlayerBool,
    /// Anything in the game reads a bool from player data.
    GetPlayerBool,
    /// Anything in the game sets an int in player data.
    SetPlayerInt,
    /// Anything in the game reads an int from player data.
    GetPlayerInt,
    /// A fresh player data record was set up.
    NewPlayerData,
    /// Health is taken from the player.
    TakeHealth,
    /// Damage is dealt to the player.
    TakeDamage,
    /// The player attacks.
    Attack,
    /// End of the attack routine.
    AfterAttack,
    /// Charm-derived player values were recomputed.
    CharmUpdate,
    /// Per-frame hero update.
    HeroUpdate,
    /// Dash routine asks for a velocity change.
    DashVector,
    /// Dash key pressed; a subscriber replaces the normal dash.
    DashPressed,
    /// A save slot was loaded.
    SavegameLoad,
    /// A save slot was written.
    SavegameSave,
    /// A new game was started.
    NewGame,
    /// A save slot was deleted.
    SavegameClear,
    /// A save was loaded; the loaded data is available.
    AfterSavegameLoad,
    /// A save is about to be written; the data may still be changed.
    BeforeSavegameSave,
    /// A localized string is requested.
    LanguageGet,
    /// A new scene finished loading.
    SceneChanged,
    /// A scene is about to load; the target scene may be replaced.
    BeforeSceneLoad,
    /// A game object with a collider was created.
    ColliderCreate,
    /// The game is closing.
    ApplicationQuit,
}

impl HookPoint {
    /// Every hook point, in catalogue order.
    pub const ALL: [Self; 24] = [
        Self::SetPlayerBool,
        Self::GetPlayerBool,
        Self::SetPlayerInt,
        Self::GetPlayerInt,
        Self::NewPlayerData,
        Self::TakeHealth,
        Self::TakeDamage,
        Self::Attack,
        Self::AfterAttack,
        Self::CharmUpdate,
        Self::HeroUpdate,
        Self::DashVector,
        Self::DashPressed,
        Self::SavegameLoad,
        Self::SavegameSave,
        Self::NewGame,
        Self::SavegameClear,
        Self::AfterSavegameLoad,
        Self::BeforeSavegameSave,
        Self::LanguageGet,
        Self::SceneChanged,
        Self::BeforeSceneLoad,
        Self::ColliderCreate,
        Self::ApplicationQuit,
    ];

    /// Returns the hook name as a static snake_case string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SetPlayerBool => "set_player_bool",
            Self::GetPlayerBool => "get_player_bool",
            Self::SetPlayerInt => "set_player_int",
            Self::GetPlayerInt => "get_player_int",
            Self::NewPlayerData => "new_player_data",
            Self::TakeHealth => "take_health",
            Self::TakeDamage => "take_damage",
            Self::Attack => "attack",
            Self::AfterAttack => "after_attack",
            Self::CharmUpdate => "charm_update",
            Self::HeroUpdate => "hero_update",
            Self::DashVector => "dash_vector",
            Self::DashPressed => "dash_pressed",
            Self::SavegameLoad => "savegame_load",
            Self::SavegameSave => "savegame_save",
            Self::NewGame => "new_game",
            Self::SavegameClear => "savegame_clear",
            Self::AfterSavegameLoad => "after_savegame_load",
            Self::BeforeSavegameSave => "before_savegame_save",
            Self::LanguageGet => "language_get",
            Self::SceneChanged => "scene_changed",
            Self::BeforeSceneLoad => "before_scene_load",
            Self::ColliderCreate => "collider_create",
            Self::ApplicationQuit => "application_quit",
        }
    }

    /// Returns what the hook is for.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::SetPlayerBool => "Called when anything in the game tries to set a bool in player data",
            Self::GetPlayerBool => "Called when anything in the game tries to get a bool from player data",
            Self::SetPlayerInt => "Called when anything in the game tries to set an int in player data",
            Self::GetPlayerInt => "Called when anything in the game tries to get an int from player data",
            Self::NewPlayerData => "Called after setting up a new player data record",
            Self::TakeHealth => "Called when health is taken from the player",
            Self::TakeDamage => "Called when damage is dealt to the player",
            Self::Attack => "Called whenever the player attacks",
            Self::AfterAttack => "Called at the end of the attack function",
            Self::CharmUpdate => "Called after player values for charms have been set",
            Self::HeroUpdate => "Called whenever the hero updates",
            Self::DashVector => "Called during dash function to change velocity",
            Self::DashPressed => "Called whenever the dash key is pressed; overrides normal dash functionality",
            Self::SavegameLoad => "Called directly after a save has been loaded",
            Self::SavegameSave => "Called directly after a save has been saved",
            Self::NewGame => "Called whenever a new game is started",
            Self::SavegameClear => "Called whenever a save file is deleted",
            Self::AfterSavegameLoad => "Called directly after a save has been loaded, with access to the save data",
            Self::BeforeSavegameSave => "Called directly before a save is persisted; the data may be changed",
            Self::LanguageGet => "Called whenever localization specific strings are requested",
            Self::SceneChanged => "Called after a new scene has been loaded",
            Self::BeforeSceneLoad => "Called right before a scene gets loaded; can change which scene gets loaded",
            Self::ColliderCreate => "Called whenever a new game object is created with a collider",
            Self::ApplicationQuit => "Called when the game is fully closed",
        }
    }

    /// Returns the host method this hook intercepts, or `"N/A"`.
    #[must_use]
    pub const fn target(&self) -> &'static str {
        match self {
            Self::SetPlayerBool => "PlayerData.SetBool",
            Self::GetPlayerBool => "PlayerData.GetBool",
            Self::SetPlayerInt => "PlayerData.SetInt",
            Self::GetPlayerInt => "PlayerData.GetInt",
            Self::NewPlayerData => "PlayerData.SetupNewPlayerData",
            Self::TakeHealth => "HeroController.TakeHealth",
            Self::TakeDamage => "HeroController.TakeDamage",
            Self::Attack | Self::AfterAttack => "HeroController.Attack",
            Self::CharmUpdate => "HeroController.CharmUpdate",
            Self::HeroUpdate => "HeroController.Update",
            Self::DashVector => "HeroController.Dash",
            Self::DashPressed => "HeroController.LookForQueueInput",
            Self::SavegameLoad | Self::AfterSavegameLoad => "GameManager.LoadGame",
            Self::SavegameSave | Self::BeforeSavegameSave => "GameManager.SaveGame",
            Self::NewGame => "GameManager.LoadFirstScene",
            Self::SavegameClear => "GameManager.ClearSaveFile",
            Self::ColliderCreate => "PlayMakerUnity2DProxy.Start",
            Self::ApplicationQuit => "GameManager.OnApplicationQuit",
            Self::LanguageGet | Self::SceneChanged | Self::BeforeSceneLoad => "N/A",
        }
    }

    /// Returns the catalogue entry for this hook.
    #[must_use]
    pub const fn info(&self) -> HookInfo {
        HookInfo {
            hook: *self,
            description: self.description(),
            target: self.target(),
        }
    }
}

impl fmt::Display for HookPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serializable catalogue entry describing one hook point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HookInfo {
    /// The hook being described.
    pub hook: HookPoint,
    /// What the hook is for.
    pub description: &'static str,
    /// Host method being intercepted.
    pub target: &'static str,
}

/// Returns the full hook catalogue in declaration order.
#[must_use]
pub fn catalogue() -> Vec<HookInfo> {
    HookPoint::ALL.iter().map(HookPoint::info).collect()
}
