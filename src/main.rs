//! modhooks demo host.
//!
//! `modhooks catalogue` prints the hook catalogue as JSON. Without
//! arguments, a short scripted session drives every kind of dispatch
//! against in-memory host state with one sample mod attached.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use modhooks::domain::hook_point::catalogue;
use modhooks::domain::{HazardType, SaveGameData};
use modhooks::host::{MemoryLanguage, MemoryPlayerData, PlayerDataStore, SharedPlayerData};
use modhooks::{HookConfig, ModHooks};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if std::env::args().nth(1).as_deref() == Some("catalogue") {
        let json = serde_json::to_string_pretty(&catalogue())
            .context("serializing hook catalogue")?;
        println!("{json}");
        return Ok(());
    }

    let config = HookConfig::from_env().context("loading configuration")?;
    tracing::info!(
        debug = config.debug,
        failure_mode = %config.failure_mode,
        "starting modhooks demo"
    );

    let player_data = Arc::new(MemoryPlayerData::new());
    let language = Arc::new(MemoryLanguage::new());
    let hooks = ModHooks::new(&config, Arc::clone(&player_data) as SharedPlayerData, language);

    install_sample_mod(&hooks).context("registering sample mod")?;
    run_session(&hooks, &player_data).context("running demo session")?;

    hooks.on_application_quit()?;
    Ok(())
}

/// A mod that pins geo, halves spike damage, and skips the tutorial.
fn install_sample_mod(hooks: &ModHooks) -> anyhow::Result<()> {
    let store = Arc::clone(hooks.player_data());
    hooks.get_player_int_hook.subscribe(move |key| {
        Ok(if key == "geo" {
            9_999
        } else {
            store.get_int(key)
        })
    });
    hooks.take_damage_hook.subscribe(|hazard, damage| {
        Ok(if *hazard == HazardType::SPIKES {
            damage / 2
        } else {
            damage
        })
    });
    hooks.before_scene_load_hook.subscribe(|(), scene| {
        Ok(if scene == "Tutorial_01" {
            "Town".to_string()
        } else {
            scene
        })
    });
    hooks.before_savegame_save_hook.subscribe(|(), mut data| {
        data.mod_data
            .insert("SampleMod".to_string(), serde_json::json!({ "version": 1 }));
        Ok(data)
    });

    hooks.register_mod("SampleMod")?;
    Ok(())
}

fn run_session(hooks: &ModHooks, player_data: &MemoryPlayerData) -> anyhow::Result<()> {
    hooks.on_new_game()?;
    hooks.after_new_player_data()?;

    let scene = hooks.before_scene_load("Tutorial_01")?;
    hooks.on_scene_changed(&scene)?;

    hooks.set_player_int("geo", 120)?;
    let geo = hooks.get_player_int("geo")?;
    tracing::info!(stored = player_data.get_int("geo"), resolved = geo, "geo read");

    let damage = hooks.on_take_damage(HazardType::SPIKES, 2)?;
    let taken = hooks.on_take_health(damage)?;
    tracing::info!(damage, taken, "player hit");

    let data = hooks.on_before_savegame_save(player_data.to_save(1))?;
    hooks.on_savegame_save(data.slot)?;
    tracing::info!(
        slot = data.slot,
        mods = data.mod_data.len(),
        "game saved"
    );

    hooks.on_after_savegame_load(&SaveGameData::new(1))?;
    Ok(())
}
