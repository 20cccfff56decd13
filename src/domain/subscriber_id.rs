//! Handle returned when a callback is attached to a hook.
//!
//! Closures carry no identity of their own, so every registration is
//! tagged with a [`SubscriberId`] that the caller keeps in order to
//! unsubscribe later.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one registration of a subscriber on one hook.
///
/// Wraps a UUID v4. Registering the same callback twice yields two
/// distinct ids, and each id removes exactly one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriberId(uuid::Uuid);

impl SubscriberId {
    /// Creates a new random `SubscriberId`.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for SubscriberId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(SubscriberId::new(), SubscriberId::new());
    }

    #[test]
    fn display_is_uuid_format() {
        let s = SubscriberId::new().to_string();
        assert_eq!(s.len(), 36);
        assert!(s.contains('-'));
    }

    #[test]
    fn duplicate_registrations_get_distinct_handles() {
        use std::sync::Arc;

        use crate::domain::SubscriberList;

        let list: SubscriberList<dyn Fn() + Send + Sync> = SubscriberList::new();
        let callback: Arc<dyn Fn() + Send + Sync> = Arc::new(|| {});
        let first = list.push(Arc::clone(&callback));
        let second = list.push(callback);

        assert_ne!(first, second);
        assert!(list.remove(first));
        assert!(!list.contains(first));
        assert!(list.contains(second));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn from_uuid_keeps_value() {
        let uuid = uuid::Uuid::new_v4();
        let id = SubscriberId::from(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }
}
