//! Service layer: host-facing hook dispatch.
//!
//! [`ModHooks`] owns one slot per [`crate::domain::HookPoint`], reads
//! baselines from host state, and resolves subscriber answers.

pub mod mod_hooks;

pub use mod_hooks::ModHooks;
