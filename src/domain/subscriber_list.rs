//! Ordered subscriber storage with snapshot-on-fire semantics.
//!
//! [`SubscriberList`] keeps callbacks in registration order behind a
//! [`RwLock`]. Dispatch never iterates the live list: it takes a
//! [`snapshot`](SubscriberList::snapshot) of `Arc` handles and releases
//! the lock before invoking anything, so a subscriber may subscribe or
//! unsubscribe (itself included) mid-dispatch without affecting the
//! call in flight.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::SubscriberId;

/// One registered callback.
pub struct Subscriber<F: ?Sized> {
    /// Registration handle.
    pub id: SubscriberId,
    /// The callback itself.
    pub callback: Arc<F>,
}

impl<F: ?Sized> Clone for Subscriber<F> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<F: ?Sized> fmt::Debug for Subscriber<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber").field("id", &self.id).finish_non_exhaustive()
    }
}

/// Registration-ordered list of callbacks of type `F`.
///
/// # Concurrency
///
/// - The lock is held only while copying or mutating the list.
/// - Callbacks always run with the lock released.
/// - A poisoned lock is recovered; every mutation leaves the list valid.
pub struct SubscriberList<F: ?Sized> {
    entries: RwLock<Vec<Subscriber<F>>>,
}

impl<F: ?Sized> SubscriberList<F> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Subscriber<F>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Subscriber<F>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a callback and returns its registration handle.
    ///
    /// Duplicates are allowed; no ordering other than arrival is applied.
    pub fn push(&self, callback: Arc<F>) -> SubscriberId {
        let id = SubscriberId::new();
        self.write().push(Subscriber { id, callback });
        id
    }

    /// Removes the first registration with the given id.
    ///
    /// Returns `false` if no such registration exists.
    pub fn remove(&self, id: SubscriberId) -> bool {
        let mut entries = self.write();
        match entries.iter().position(|s| s.id == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if a registration with the given id exists.
    #[must_use]
    pub fn contains(&self, id: SubscriberId) -> bool {
        self.read().iter().any(|s| s.id == id)
    }

    /// Copies the current registrations, in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Subscriber<F>> {
        self.read().clone()
    }

    /// Returns the earliest registration, if any.
    #[must_use]
    pub fn first(&self) -> Option<Subscriber<F>> {
        self.read().first().cloned()
    }

    /// Removes every registration.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Returns the number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

impl<F: ?Sized> Default for SubscriberList<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for SubscriberList<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberList").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Callback = dyn Fn() -> u8 + Send + Sync;

    fn callback(value: u8) -> Arc<Callback> {
        Arc::new(move || value)
    }

    fn values(list: &SubscriberList<Callback>) -> Vec<u8> {
        list.snapshot().iter().map(|s| (s.callback)()).collect()
    }

    #[test]
    fn push_keeps_registration_order() {
        let list = SubscriberList::new();
        list.push(callback(1));
        list.push(callback(2));
        list.push(callback(3));
        assert_eq!(values(&list), vec![1, 2, 3]);
    }

    #[test]
    fn duplicate_callbacks_are_kept() {
        let list: SubscriberList<Callback> = SubscriberList::new();
        let cb = callback(9);
        let a = list.push(Arc::clone(&cb));
        let b = list.push(cb);
        assert_ne!(a, b);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn remove_deletes_only_matching_entry() {
        let list = SubscriberList::new();
        list.push(callback(1));
        let id = list.push(callback(2));
        list.push(callback(3));

        assert!(list.remove(id));
        assert!(!list.contains(id));
        assert_eq!(values(&list), vec![1, 3]);
    }

    #[test]
    fn remove_unknown_is_noop() {
        let list = SubscriberList::new();
        list.push(callback(1));
        assert!(!list.remove(SubscriberId::new()));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_later_changes() {
        let list = SubscriberList::new();
        let id = list.push(callback(1));
        let snapshot = list.snapshot();

        list.remove(id);
        list.push(callback(2));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(values(&list), vec![2]);
    }

    #[test]
    fn first_and_clear() {
        let list = SubscriberList::new();
        assert!(list.first().is_none());

        let id = list.push(callback(4));
        list.push(callback(5));
        assert_eq!(list.first().map(|s| s.id), Some(id));

        list.clear();
        assert!(list.is_empty());
    }
}
