//! Mod hooks: one slot and one host call site per hook point.

use std::sync::{Arc, PoisonError, RwLock};

use crate::config::HookConfig;
use crate::domain::{
    AttackDirection, ChainHook, GameObject, HazardType, Hook, HookPoint, LanguageKey, LoadedMod,
    SaveGameData, SaveSlot, SetValue, Vector2,
};
use crate::error::HookError;
use crate::host::{LanguageSource, SharedPlayerData};
use crate::mod_log::ModLog;

/// Dispatcher for every hook point the host exposes.
///
/// Mods attach callbacks to the public `*_hook` slots. The host engine
/// calls the matching method at each interception site; the method reads
/// the baseline from host state, dispatches, and returns the resolved
/// value or performs the default action when no mod intercepted it.
///
/// Built explicitly and passed by reference; there is no global instance.
#[derive(Debug)]
pub struct ModHooks {
    player_data: SharedPlayerData,
    language: Arc<dyn LanguageSource>,
    mod_log: ModLog,
    loaded_mods: RwLock<Vec<LoadedMod>>,

    /// Player data bool writes. Any subscriber suppresses the host write.
    pub set_player_bool_hook: Hook<SetValue<bool>>,
    /// Player data bool reads, resolved against the stored value.
    pub get_player_bool_hook: Hook<String, bool>,
    /// Player data int writes. Any subscriber suppresses the host write.
    pub set_player_int_hook: Hook<SetValue<i32>>,
    /// Player data int reads, resolved against the stored value.
    pub get_player_int_hook: Hook<String, i32>,
    /// Fresh player data was set up.
    pub new_player_data_hook: Hook<SharedPlayerData>,
    /// Health loss modifiers, applied in registration order.
    pub take_health_hook: ChainHook<(), i32>,
    /// Damage modifiers keyed by hazard, applied in registration order.
    pub take_damage_hook: ChainHook<HazardType, i32>,
    /// Player attacks.
    pub attack_hook: Hook<AttackDirection>,
    /// Player attack finished.
    pub after_attack_hook: Hook<AttackDirection>,
    /// Charm-derived values were recomputed.
    pub charm_update_hook: Hook<SharedPlayerData>,
    /// Per-frame hero update.
    pub hero_update_hook: Hook<()>,
    /// Dash velocity; the last subscriber's vector is used.
    pub dash_vector_hook: Hook<(), Vector2>,
    /// Dash key handler; the earliest subscriber replaces the normal dash.
    pub dash_pressed_hook: Hook<()>,
    /// Save slot loaded.
    pub savegame_load_hook: Hook<SaveSlot>,
    /// Save slot written.
    pub savegame_save_hook: Hook<SaveSlot>,
    /// New game started.
    pub new_game_hook: Hook<()>,
    /// Save slot deleted.
    pub savegame_clear_hook: Hook<SaveSlot>,
    /// Save data just loaded.
    pub after_savegame_load_hook: Hook<SaveGameData>,
    /// Save data about to be written; each subscriber may rewrite it.
    pub before_savegame_save_hook: ChainHook<(), SaveGameData>,
    /// Localized string lookups, resolved against the host table.
    pub language_get_hook: Hook<LanguageKey, String>,
    /// Scene finished loading.
    pub scene_changed_hook: Hook<String>,
    /// Scene about to load; each subscriber may redirect it.
    pub before_scene_load_hook: ChainHook<(), String>,
    /// Collider-bearing object created.
    pub collider_create_hook: Hook<GameObject>,
    /// Game closing.
    pub application_quit_hook: Hook<()>,
}

impl ModHooks {
    /// Creates a dispatcher over the given host state.
    #[must_use]
    pub fn new(
        config: &HookConfig,
        player_data: SharedPlayerData,
        language: Arc<dyn LanguageSource>,
    ) -> Self {
        let mode = config.failure_mode;
        Self {
            player_data,
            language,
            mod_log: ModLog::new(config.log_path.clone(), config.debug),
            loaded_mods: RwLock::new(Vec::new()),
            set_player_bool_hook: Hook::new(HookPoint::SetPlayerBool, mode),
            get_player_bool_hook: Hook::new(HookPoint::GetPlayerBool, mode),
            set_player_int_hook: Hook::new(HookPoint::SetPlayerInt, mode),
            get_player_int_hook: Hook::new(HookPoint::GetPlayerInt, mode),
            new_player_data_hook: Hook::new(HookPoint::NewPlayerData, mode),
            take_health_hook: ChainHook::new(HookPoint::TakeHealth, mode),
            take_damage_hook: ChainHook::new(HookPoint::TakeDamage, mode),
            attack_hook: Hook::new(HookPoint::Attack, mode),
            after_attack_hook: Hook::new(HookPoint::AfterAttack, mode),
            charm_update_hook: Hook::new(HookPoint::CharmUpdate, mode),
            hero_update_hook: Hook::new(HookPoint::HeroUpdate, mode),
            dash_vector_hook: Hook::new(HookPoint::DashVector, mode),
            dash_pressed_hook: Hook::new(HookPoint::DashPressed, mode),
            savegame_load_hook: Hook::new(HookPoint::SavegameLoad, mode),
            savegame_save_hook: Hook::new(HookPoint::SavegameSave, mode),
            new_game_hook: Hook::new(HookPoint::NewGame, mode),
            savegame_clear_hook: Hook::new(HookPoint::SavegameClear, mode),
            after_savegame_load_hook: Hook::new(HookPoint::AfterSavegameLoad, mode),
            before_savegame_save_hook: ChainHook::new(HookPoint::BeforeSavegameSave, mode),
            language_get_hook: Hook::new(HookPoint::LanguageGet, mode),
            scene_changed_hook: Hook::new(HookPoint::SceneChanged, mode),
            before_scene_load_hook: ChainHook::new(HookPoint::BeforeSceneLoad, mode),
            collider_create_hook: Hook::new(HookPoint::ColliderCreate, mode),
            application_quit_hook: Hook::new(HookPoint::ApplicationQuit, mode),
        }
    }

    /// Returns the host player data this dispatcher reads baselines from.
    #[must_use]
    pub fn player_data(&self) -> &SharedPlayerData {
        &self.player_data
    }

    /// Returns the number of subscribers attached to `point`.
    #[must_use]
    pub fn subscriber_count(&self, point: HookPoint) -> usize {
        match point {
            HookPoint::SetPlayerBool => self.set_player_bool_hook.len(),
            HookPoint::GetPlayerBool => self.get_player_bool_hook.len(),
            HookPoint::SetPlayerInt => self.set_player_int_hook.len(),
            HookPoint::GetPlayerInt => self.get_player_int_hook.len(),
            HookPoint::NewPlayerData => self.new_player_data_hook.len(),
            HookPoint::TakeHealth => self.take_health_hook.len(),
            HookPoint::TakeDamage => self.take_damage_hook.len(),
            HookPoint::Attack => self.attack_hook.len(),
            HookPoint::AfterAttack => self.after_attack_hook.len(),
            HookPoint::CharmUpdate => self.charm_update_hook.len(),
            HookPoint::HeroUpdate => self.hero_update_hook.len(),
            HookPoint::DashVector => self.dash_vector_hook.len(),
            HookPoint::DashPressed => self.dash_pressed_hook.len(),
            HookPoint::SavegameLoad => self.savegame_load_hook.len(),
            HookPoint::SavegameSave => self.savegame_save_hook.len(),
            HookPoint::NewGame => self.new_game_hook.len(),
            HookPoint::SavegameClear => self.savegame_clear_hook.len(),
            HookPoint::AfterSavegameLoad => self.after_savegame_load_hook.len(),
            HookPoint::BeforeSavegameSave => self.before_savegame_save_hook.len(),
            HookPoint::LanguageGet => self.language_get_hook.len(),
            HookPoint::SceneChanged => self.scene_changed_hook.len(),
            HookPoint::BeforeSceneLoad => self.before_scene_load_hook.len(),
            HookPoint::ColliderCreate => self.collider_create_hook.len(),
            HookPoint::ApplicationQuit => self.application_quit_hook.len(),
        }
    }

    // -- mod registry and log ------------------------------------------------

    /// Records that a mod finished loading.
    ///
    /// The mod log line is written first; the mod is only recorded once
    /// that succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::ModLog`] if the mod log cannot be written. The
    /// mod is not registered in that case.
    pub fn register_mod(&self, name: &str) -> Result<(), HookError> {
        self.mod_log(&format!("Loaded mod: {name}"))?;
        self.loaded_mods
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LoadedMod::new(name));
        tracing::info!(mod_name = name, "mod loaded");
        Ok(())
    }

    /// Returns every registered mod, in load order.
    #[must_use]
    pub fn loaded_mods(&self) -> Vec<LoadedMod> {
        self.loaded_mods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Writes a line to the mod log when debug is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::ModLog`] if the log file cannot be written.
    pub fn mod_log(&self, info: &str) -> Result<(), HookError> {
        self.mod_log.write(info)
    }

    // -- player data -----------------------------------------------------------

    /// `PlayerData.SetBool`: subscribers replace the write entirely.
    ///
    /// Once anyone is subscribed the host write never happens, even when
    /// every subscriber failed under [`FailureMode::Isolate`](crate::FailureMode::Isolate).
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures; the host write is skipped then.
    pub fn set_player_bool(&self, key: &str, value: bool) -> Result<(), HookError> {
        if !self
            .set_player_bool_hook
            .fire_intercept(&SetValue::new(key, value))?
        {
            self.player_data.set_bool(key, value);
        }
        Ok(())
    }

    /// `PlayerData.GetBool`: first subscriber answer that differs from the
    /// stored value wins.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn get_player_bool(&self, key: &str) -> Result<bool, HookError> {
        let baseline = self.player_data.get_bool(key);
        self.get_player_bool_hook
            .fire_with_override(baseline, &key.to_string())
    }

    /// `PlayerData.SetInt`: subscribers replace the write entirely.
    ///
    /// Once anyone is subscribed the host write never happens, even when
    /// every subscriber failed under [`FailureMode::Isolate`](crate::FailureMode::Isolate).
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures; the host write is skipped then.
    pub fn set_player_int(&self, key: &str, value: i32) -> Result<(), HookError> {
        if !self
            .set_player_int_hook
            .fire_intercept(&SetValue::new(key, value))?
        {
            self.player_data.set_int(key, value);
        }
        Ok(())
    }

    /// `PlayerData.GetInt`: first subscriber answer that differs from the
    /// stored value wins.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn get_player_int(&self, key: &str) -> Result<i32, HookError> {
        let baseline = self.player_data.get_int(key);
        self.get_player_int_hook
            .fire_with_override(baseline, &key.to_string())
    }

    /// `PlayerData.SetupNewPlayerData` finished.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn after_new_player_data(&self) -> Result<(), HookError> {
        self.new_player_data_hook.fire(&self.player_data)
    }

    // -- hero ------------------------------------------------------------------

    /// `HeroController.TakeHealth`: returns the health actually taken.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_take_health(&self, damage: i32) -> Result<i32, HookError> {
        self.take_health_hook.fire_chain(damage, &())
    }

    /// `HeroController.TakeDamage`: returns the damage actually dealt.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_take_damage(&self, hazard: HazardType, damage: i32) -> Result<i32, HookError> {
        self.take_damage_hook.fire_chain(damage, &hazard)
    }

    /// `HeroController.Attack` started.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_attack(&self, direction: AttackDirection) -> Result<(), HookError> {
        self.attack_hook.fire(&direction)
    }

    /// `HeroController.Attack` finished.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn after_attack(&self, direction: AttackDirection) -> Result<(), HookError> {
        self.after_attack_hook.fire(&direction)
    }

    /// `HeroController.CharmUpdate` finished.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_charm_update(&self) -> Result<(), HookError> {
        self.charm_update_hook.fire(&self.player_data)
    }

    /// `HeroController.Update` tick.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_hero_update(&self) -> Result<(), HookError> {
        self.hero_update_hook.fire(&())
    }

    /// `HeroController.Dash`: velocity change, zero when nobody answers.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn dash_velocity_change(&self) -> Result<Vector2, HookError> {
        self.dash_vector_hook.fire_last_or(Vector2::ZERO, &())
    }

    /// Dash key pressed. Returns `true` if a mod handled it and the normal
    /// dash must not run.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the handling subscriber.
    pub fn on_dash_pressed(&self) -> Result<bool, HookError> {
        self.dash_pressed_hook.fire_first_handler_wins(&())
    }

    // -- saves -----------------------------------------------------------------

    /// `GameManager.LoadGame` finished for `slot`.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_savegame_load(&self, slot: SaveSlot) -> Result<(), HookError> {
        self.savegame_load_hook.fire(&slot)
    }

    /// `GameManager.SaveGame` finished for `slot`.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_savegame_save(&self, slot: SaveSlot) -> Result<(), HookError> {
        self.savegame_save_hook.fire(&slot)
    }

    /// `GameManager.LoadFirstScene`: a new game starts.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_new_game(&self) -> Result<(), HookError> {
        self.new_game_hook.fire(&())
    }

    /// `GameManager.ClearSaveFile` deleted `slot`.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_savegame_clear(&self, slot: SaveSlot) -> Result<(), HookError> {
        self.savegame_clear_hook.fire(&slot)
    }

    /// Save data has been loaded.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_after_savegame_load(&self, data: &SaveGameData) -> Result<(), HookError> {
        self.after_savegame_load_hook.fire(data)
    }

    /// Save data is about to be persisted. Returns the data to write.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures; nothing should be written then.
    pub fn on_before_savegame_save(&self, data: SaveGameData) -> Result<SaveGameData, HookError> {
        self.before_savegame_save_hook.fire_chain(data, &())
    }

    // -- language and scenes -----------------------------------------------------

    /// Localized string lookup: first subscriber answer that differs from
    /// the host table wins.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn language_get(&self, key: &str, sheet: &str) -> Result<String, HookError> {
        let key = LanguageKey::new(key, sheet);
        let baseline = self.language.get(&key);
        self.language_get_hook.fire_with_override(baseline, &key)
    }

    /// A scene finished loading.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_scene_changed(&self, scene: &str) -> Result<(), HookError> {
        self.scene_changed_hook.fire(&scene.to_string())
    }

    /// A scene is about to load. Returns the scene that should load instead.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn before_scene_load(&self, scene: &str) -> Result<String, HookError> {
        let target = self.before_scene_load_hook.fire_chain(scene.to_string(), &())?;
        if target != scene {
            tracing::debug!(from = scene, to = %target, "scene load redirected");
        }
        Ok(target)
    }

    // -- engine ------------------------------------------------------------------

    /// `PlayMakerUnity2DProxy.Start`: a collider-bearing object was created.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_collider_create(&self, object: &GameObject) -> Result<(), HookError> {
        self.collider_create_hook.fire(object)
    }

    /// `GameManager.OnApplicationQuit`.
    ///
    /// # Errors
    ///
    /// Propagates subscriber failures.
    pub fn on_application_quit(&self) -> Result<(), HookError> {
        self.application_quit_hook.fire(&())
    }
}
