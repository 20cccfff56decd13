//! # modhooks
//!
//! Hook-dispatch layer for a game modding API.
//!
//! The host engine calls into [`ModHooks`] at fixed interception sites
//! (player data reads and writes, combat, saves, scene loads). Mods
//! subscribe callbacks to those sites and either observe the call or
//! override its outcome. Game state itself stays with the host and is
//! reached through the traits in [`host`].
//!
//! ## Architecture
//!
//! ```text
//! Host engine (call sites)
//!     │
//!     ├── ModHooks (service/)
//!     │
//!     ├── Hook / ChainHook (domain/)
//!     ├── SubscriberList (domain/)
//!     ├── FirstDivergence (domain/)
//!     │
//!     ├── ModLog
//!     └── PlayerDataStore / LanguageSource (host/)
//! ```
//!
//! ## Dispatch styles
//!
//! | Style               | Result                                                |
//! |---------------------|-------------------------------------------------------|
//! | fire                | side effects only                                     |
//! | fire_with_override  | first subscriber value that differs from the baseline |
//! | fire_chain          | each subscriber transforms the previous output        |
//! | fire_intercept      | any subscriber replaces the host's default action     |
//! | first handler wins  | only the earliest subscriber runs                     |
//! | fire_last_or        | last subscriber value, or a default                   |

pub mod config;
pub mod domain;
pub mod error;
pub mod host;
pub mod mod_log;
pub mod service;

pub use config::HookConfig;
pub use error::{FailureMode, HookError, SubscriberError, SubscriberResult};
pub use service::ModHooks;
