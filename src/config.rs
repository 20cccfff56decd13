//! Dispatcher configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`):
//!
//! | Variable                | Default      | Meaning                            |
//! |-------------------------|--------------|------------------------------------|
//! | `MODHOOKS_DEBUG`        | `false`      | Write the mod log file             |
//! | `MODHOOKS_LOG_PATH`     | `ModLog.txt` | Mod log location                   |
//! | `MODHOOKS_FAILURE_MODE` | `abort`      | `abort` or `isolate` on mod errors |

use std::path::PathBuf;

use crate::error::{FailureMode, HookError};

/// Top-level dispatcher configuration.
///
/// Loaded once at startup via [`HookConfig::from_env`], or built directly
/// in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    /// Global debug flag; gates the mod log file.
    pub debug: bool,

    /// Path of the mod log file.
    pub log_path: PathBuf,

    /// What every hook does when a subscriber fails.
    pub failure_mode: FailureMode,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_path: PathBuf::from("ModLog.txt"),
            failure_mode: FailureMode::Abort,
        }
    }
}

impl HookConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidConfig`] if `MODHOOKS_FAILURE_MODE` is
    /// set to something other than `abort` or `isolate`.
    pub fn from_env() -> Result<Self, HookError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::InvalidConfig`] for an unknown failure mode.
    pub fn from_lookup<L>(lookup: L) -> Result<Self, HookError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let debug = parse_bool(lookup("MODHOOKS_DEBUG").as_deref(), defaults.debug);
        let log_path = lookup("MODHOOKS_LOG_PATH")
            .filter(|v| !v.trim().is_empty())
            .map_or(defaults.log_path, PathBuf::from);
        let failure_mode = match lookup("MODHOOKS_FAILURE_MODE") {
            Some(raw) => raw.parse()?,
            None => defaults.failure_mode,
        };

        Ok(Self {
            debug,
            log_path,
            failure_mode,
        })
    }
}

/// Parses a boolean setting. Accepts `"true"`, `"1"`, `"false"`, `"0"`
/// (case-insensitive). Returns `default` otherwise.
fn parse_bool(value: Option<&str>, default: bool) -> bool {
    match value.map(str::to_ascii_lowercase).as_deref() {
        Some("true" | "1") => true,
        Some("false" | "0") => false,
        _ => default,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let Ok(config) = HookConfig::from_lookup(lookup_from(&[])) else {
            panic!("defaults must load");
        };
        assert_eq!(config, HookConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let Ok(config) = HookConfig::from_lookup(lookup_from(&[
            ("MODHOOKS_DEBUG", "TRUE"),
            ("MODHOOKS_LOG_PATH", "/tmp/mods/ModLog.txt"),
            ("MODHOOKS_FAILURE_MODE", "isolate"),
        ])) else {
            panic!("valid config");
        };
        assert!(config.debug);
        assert_eq!(config.log_path, PathBuf::from("/tmp/mods/ModLog.txt"));
        assert_eq!(config.failure_mode, FailureMode::Isolate);
    }

    #[test]
    fn unparsable_bool_falls_back() {
        assert!(!parse_bool(Some("yes please"), false));
        assert!(parse_bool(Some("1"), false));
        assert!(!parse_bool(None, false));
    }

    #[test]
    fn blank_log_path_uses_default() {
        let Ok(config) = HookConfig::from_lookup(lookup_from(&[("MODHOOKS_LOG_PATH", "  ")])) else {
            panic!("valid config");
        };
        assert_eq!(config.log_path, PathBuf::from("ModLog.txt"));
    }

    #[test]
    fn unknown_failure_mode_is_rejected() {
        let result = HookConfig::from_lookup(lookup_from(&[("MODHOOKS_FAILURE_MODE", "retry")]));
        assert!(matches!(result, Err(HookError::InvalidConfig(_))));
    }
}
