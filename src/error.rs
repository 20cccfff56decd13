//! Dispatcher error types and subscriber failure policy.
//!
//! [`HookError`] is the central error type for the crate. Subscribers
//! report failures as a boxed [`SubscriberError`]; the dispatcher wraps
//! it with the hook and subscriber that produced it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{HookPoint, SubscriberId};

/// Error type subscribers return from their callbacks.
///
/// Any `std::error::Error + Send + Sync` converts into it with `?`, and
/// so does a plain string via `.into()`.
pub type SubscriberError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type of a subscriber callback.
pub type SubscriberResult<T> = Result<T, SubscriberError>;

/// Crate-wide error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category      |
/// |-----------|---------------|
/// | 1000–1999 | Configuration |
/// | 2000–2999 | Dispatch      |
/// | 3000–3999 | Diagnostics   |
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// A subscriber returned an error and the hook aborted dispatch.
    #[error("subscriber {subscriber} of hook {hook} failed: {source}")]
    SubscriberFailed {
        /// Hook whose dispatch was aborted.
        hook: HookPoint,
        /// Registration that failed.
        subscriber: SubscriberId,
        /// Error reported by the subscriber.
        #[source]
        source: SubscriberError,
    },

    /// Writing to the mod log failed.
    #[error("mod log error: {0}")]
    ModLog(#[from] std::io::Error),

    /// A configuration value could not be understood.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl HookError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidConfig(_) => 1001,
            Self::SubscriberFailed { .. } => 2001,
            Self::ModLog(_) => 3001,
        }
    }

    /// Returns the hook involved, if the error came from dispatch.
    #[must_use]
    pub const fn hook(&self) -> Option<HookPoint> {
        match self {
            Self::SubscriberFailed { hook, .. } => Some(*hook),
            Self::ModLog(_) | Self::InvalidConfig(_) => None,
        }
    }
}

/// What a hook does when one of its subscribers fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Stop at the failing subscriber and return the error to the caller.
    /// Later subscribers are not invoked.
    #[default]
    Abort,
    /// Log the failure and keep dispatching to later subscribers.
    Isolate,
}

impl FailureMode {
    /// Returns the mode as a static string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Abort => "abort",
            Self::Isolate => "isolate",
        }
    }
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailureMode {
    type Err = HookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "isolate" => Ok(Self::Isolate),
            other => Err(HookError::InvalidConfig(format!(
                "unknown failure mode {other:?}; expected \"abort\" or \"isolate\""
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn subscriber_failure_keeps_source() {
        let err = HookError::SubscriberFailed {
            hook: HookPoint::TakeDamage,
            subscriber: SubscriberId::new(),
            source: "boom".into(),
        };
        assert_eq!(err.error_code(), 2001);
        assert_eq!(err.hook(), Some(HookPoint::TakeDamage));
        assert!(err.to_string().contains("take_damage"));
        assert_eq!(err.source().map(ToString::to_string), Some("boom".to_string()));
    }

    #[test]
    fn io_error_converts() {
        let err = HookError::from(std::io::Error::other("disk full"));
        assert_eq!(err.error_code(), 3001);
        assert!(err.hook().is_none());
    }

    #[test]
    fn failure_mode_parses_case_insensitively() {
        assert_eq!("Isolate".parse::<FailureMode>().ok(), Some(FailureMode::Isolate));
        assert_eq!(" abort ".parse::<FailureMode>().ok(), Some(FailureMode::Abort));
    }

    #[test]
    fn unknown_failure_mode_is_config_error() {
        let result = "retry".parse::<FailureMode>();
        assert!(matches!(result, Err(HookError::InvalidConfig(_))));
    }

    #[test]
    fn default_failure_mode_is_abort() {
        assert_eq!(FailureMode::default(), FailureMode::Abort);
    }
}
