//! Hooks whose subscribers transform a running value.
//!
//! [`ChainHook<A, V>`] feeds each subscriber's output into the next one,
//! in registration order. Damage modifiers and scene redirects use it:
//! the order of registration is the order of composition, so
//! non-commutative transforms depend on who subscribed first.

use std::fmt;
use std::sync::Arc;

use super::hook::settle;
use super::subscriber_list::SubscriberList;
use super::{HookPoint, SubscriberId};
use crate::error::{FailureMode, HookError, SubscriberResult};

/// Callback shape stored by a [`ChainHook<A, V>`].
pub type ChainFn<A, V> = dyn Fn(&A, V) -> SubscriberResult<V> + Send + Sync;

/// Ordered transform pipeline for one hook point.
pub struct ChainHook<A, V> {
    point: HookPoint,
    failure_mode: FailureMode,
    subscribers: SubscriberList<ChainFn<A, V>>,
}

impl<A, V> ChainHook<A, V> {
    /// Creates an empty chain for `point`.
    #[must_use]
    pub const fn new(point: HookPoint, failure_mode: FailureMode) -> Self {
        Self {
            point,
            failure_mode,
            subscribers: SubscriberList::new(),
        }
    }

    /// Returns the hook point this chain serves.
    #[must_use]
    pub const fn point(&self) -> HookPoint {
        self.point
    }

    /// Appends a transform to the end of the chain.
    pub fn subscribe<F>(&self, transform: F) -> SubscriberId
    where
        F: Fn(&A, V) -> SubscriberResult<V> + Send + Sync + 'static,
    {
        let id = self.subscribers.push(Arc::new(transform));
        tracing::debug!(hook = %self.point, subscriber = %id, "subscribed");
        id
    }

    /// Removes the registration `id`. Returns `false` if it was not found.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let removed = self.subscribers.remove(id);
        if removed {
            tracing::debug!(hook = %self.point, subscriber = %id, "unsubscribed");
        }
        removed
    }

    /// Returns `true` if `id` is currently registered.
    #[must_use]
    pub fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.subscribers.contains(id)
    }

    /// Removes every transform.
    pub fn clear(&self) {
        self.subscribers.clear();
    }

    /// Returns the number of transforms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` if the chain is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Runs `initial` through every transform in registration order.
    ///
    /// With no subscribers the initial value is returned unchanged. Under
    /// [`FailureMode::Isolate`] a failing transform leaves the running
    /// value as it was before that transform.
    ///
    /// # Errors
    ///
    /// Under [`FailureMode::Abort`], returns [`HookError::SubscriberFailed`]
    /// for the first failing transform; the rest of the chain is skipped.
    pub fn fire_chain(&self, initial: V, args: &A) -> Result<V, HookError>
    where
        V: Clone,
    {
        let snapshot = self.subscribers.snapshot();
        tracing::trace!(hook = %self.point, subscribers = snapshot.len(), "fire chain");
        let mut value = initial;
        for subscriber in &snapshot {
            value = match self.failure_mode {
                FailureMode::Abort => (subscriber.callback)(args, value).map_err(|source| {
                    HookError::SubscriberFailed {
                        hook: self.point,
                        subscriber: subscriber.id,
                        source,
                    }
                })?,
                FailureMode::Isolate => {
                    let result = (subscriber.callback)(args, value.clone());
                    settle(self.point, self.failure_mode, subscriber.id, result)?
                        .unwrap_or(value)
                }
            };
        }
        Ok(value)
    }
}

impl<A, V> fmt::Debug for ChainHook<A, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainHook")
            .field("point", &self.point)
            .field("failure_mode", &self.failure_mode)
            .field("subscribers", &self.len())
            .finish()
    }
}
