//! Typed multicast hook with override resolution.
//!
//! A [`Hook<A, R>`] is the slot for one [`HookPoint`]: subscribers take
//! the event arguments by reference and return an `R`. The same slot
//! supports every dispatch style the host needs:
//!
//! - [`fire`](Hook::fire): side effects only, results discarded
//! - [`fire_with_override`](Hook::fire_with_override): first value that
//!   differs from the host baseline wins
//! - [`fire_intercept`](Hook::fire_intercept): any subscriber replaces
//!   the host's default action
//! - [`fire_first_handler_wins`](Hook::fire_first_handler_wins): only the
//!   earliest subscriber runs
//! - [`fire_last_or`](Hook::fire_last_or): the last subscriber's value,
//!   or a default when nobody is listening
//!
//! Every dispatch works on a snapshot of the subscriber list taken when
//! the call starts.

use std::fmt;
use std::sync::Arc;

use super::resolution::FirstDivergence;
use super::subscriber_list::{Subscriber, SubscriberList};
use super::{HookPoint, SubscriberId};
use crate::error::{FailureMode, HookError, SubscriberResult};

/// Callback shape stored by a [`Hook<A, R>`].
pub type HookFn<A, R> = dyn Fn(&A) -> SubscriberResult<R> + Send + Sync;

/// Applies the failure policy to one subscriber result.
///
/// `Ok(None)` means the subscriber failed under [`FailureMode::Isolate`]
/// and its output must be ignored.
pub(crate) fn settle<T>(
    point: HookPoint,
    mode: FailureMode,
    subscriber: SubscriberId,
    result: SubscriberResult<T>,
) -> Result<Option<T>, HookError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(source) => match mode {
            FailureMode::Abort => Err(HookError::SubscriberFailed {
                hook: point,
                subscriber,
                source,
            }),
            FailureMode::Isolate => {
                tracing::warn!(
                    hook = %point,
                    %subscriber,
                    error = %source,
                    "subscriber failed, continuing dispatch"
                );
                Ok(None)
            }
        },
    }
}

/// Ordered set of subscribers for one hook point.
pub struct Hook<A, R = ()> {
    point: HookPoint,
    failure_mode: FailureMode,
    subscribers: SubscriberList<HookFn<A, R>>,
}

impl<A, R> Hook<A, R> {
    /// Creates an empty hook for `point`.
    #[must_use]
    pub const fn new(point: HookPoint, failure_mode: FailureMode) -> Self {
        Self {
            point,
            failure_mode,
            subscribers: SubscriberList::new(),
        }
    }

    /// Returns the hook point this slot serves.
    #[must_use]
    pub const fn point(&self) -> HookPoint {
        self.point
    }

    /// Returns the failure policy applied to subscriber errors.
    #[must_use]
    pub const fn failure_mode(&self) -> FailureMode {
        self.failure_mode
    }

    /// Appends a subscriber. Never fails; duplicates are allowed.
    pub fn subscribe<F>(&self, callback: F) -> SubscriberId
    where
        F: Fn(&A) -> SubscriberResult<R> + Send + Sync + 'static,
    {
        let id = self.subscribers.push(Arc::new(callback));
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

    /// Removes every subscriber.
    pub fn clear(&self) {
        self.subscribers.clear();
    }

    /// Returns the number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns `true` if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    fn call(
        &self,
        subscriber: &Subscriber<HookFn<A, R>>,
        args: &A,
    ) -> Result<Option<R>, HookError> {
        let result = (subscriber.callback)(args);
        settle(self.point, self.failure_mode, subscriber.id, result)
    }

    /// Invokes every subscriber in registration order, discarding results.
    ///
    /// # Errors
    ///
    /// Under [`FailureMode::Abort`], returns [`HookError::SubscriberFailed`]
    /// for the first failing subscriber; later subscribers are not invoked.
    pub fn fire(&self, args: &A) -> Result<(), HookError> {
        let snapshot = self.subscribers.snapshot();
        tracing::trace!(hook = %self.point, subscribers = snapshot.len(), "fire");
        for subscriber in &snapshot {
            self.call(subscriber, args)?;
        }
        Ok(())
    }

    /// Invokes every subscriber and resolves their answers against
    /// `baseline` with the first-divergence policy.
    ///
    /// Dispatch is not short-circuited: subscribers after the captured
    /// override still run, their values are discarded.
    ///
    /// # Errors
    ///
    /// Under [`FailureMode::Abort`], returns [`HookError::SubscriberFailed`]
    /// for the first failing subscriber; later subscribers are not invoked.
    pub fn fire_with_override(&self, baseline: R, args: &A) -> Result<R, HookError>
    where
        R: PartialEq,
    {
        let snapshot = self.subscribers.snapshot();
        tracing::trace!(hook = %self.point, subscribers = snapshot.len(), "fire with override");
        let mut fold = FirstDivergence::new(baseline);
        for subscriber in &snapshot {
            if let Some(candidate) = self.call(subscriber, args)? {
                fold.offer(candidate);
            }
        }
        if fold.is_overridden() {
            tracing::debug!(hook = %self.point, "baseline overridden");
        }
        Ok(fold.finish())
    }

    /// Invokes every subscriber if there is at least one.
    ///
    /// Returns `true` when subscribers handled the call, in which case the
    /// host must skip its default action; `false` when nobody is listening.
    /// Under [`FailureMode::Isolate`] the answer stays `true` even if every
    /// subscriber failed.
    ///
    /// # Errors
    ///
    /// Under [`FailureMode::Abort`], returns [`HookError::SubscriberFailed`]
    /// for the first failing subscriber; later subscribers are not invoked.
    pub fn fire_intercept(&self, args: &A) -> Result<bool, HookError> {
        let snapshot = self.subscribers.snapshot();
        if snapshot.is_empty() {
            return Ok(false);
        }
        tracing::trace!(hook = %self.point, subscribers = snapshot.len(), "fire intercept");
        for subscriber in &snapshot {
            self.call(subscriber, args)?;
        }
        Ok(true)
    }

    /// Invokes only the earliest registered subscriber.
    ///
    /// Returns `false` without invoking anything when no subscriber is
    /// registered, `true` otherwise regardless of what the handler returned.
    ///
    /// # Errors
    ///
    /// Under [`FailureMode::Abort`], returns [`HookError::SubscriberFailed`]
    /// if the handler fails.
    pub fn fire_first_handler_wins(&self, args: &A) -> Result<bool, HookError> {
        let Some(handler) = self.subscribers.first() else {
            return Ok(false);
        };
        tracing::trace!(hook = %self.point, subscriber = %handler.id, "fire first handler");
        self.call(&handler, args)?;
        Ok(true)
    }

    /// Invokes every subscriber and returns the last value produced, or
    /// `default` when nothing produced one.
    ///
    /// # Errors
    ///
    /// Under [`FailureMode::Abort`], returns [`HookError::SubscriberFailed`]
    /// for the first failing subscriber; later subscribers are not invoked.
    pub fn fire_last_or(&self, default: R, args: &A) -> Result<R, HookError> {
        let snapshot = self.subscribers.snapshot();
        tracing::trace!(hook = %self.point, subscribers = snapshot.len(), "fire last value");
        let mut last = default;
        for subscriber in &snapshot {
            if let Some(value) = self.call(subscriber, args)? {
                last = value;
            }
        }
        Ok(last)
    }
}

impl<A, R> fmt::Debug for Hook<A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("point", &self.point)
            .field("failure_mode", &self.failure_mode)
            .field("subscribers", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::domain::test_support::Journal;

    fn abort_hook<A, R>() -> Hook<A, R> {
        Hook::new(HookPoint::GetPlayerInt, FailureMode::Abort)
    }

    #[test]
    fn fire_runs_all_in_registration_order() {
        let hook: Hook<u8> = abort_hook();
        let journal = Journal::new();
        for tag in ["a", "b", "c"] {
            let j = journal.clone();
            hook.subscribe(move |_| {
                j.push(tag);
                Ok(())
            });
        }

        assert!(hook.fire(&0).is_ok());
        assert_eq!(journal.entries(), vec!["a", "b", "c"]);
    }

    #[test]
    fn fire_without_subscribers_is_ok() {
        let hook: Hook<()> = abort_hook();
        assert!(hook.fire(&()).is_ok());
    }

    #[test]
    fn override_all_baseline_returns_baseline() {
        let hook: Hook<String, i32> = abort_hook();
        hook.subscribe(|_| Ok(10));
        hook.subscribe(|_| Ok(10));
        let result = hook.fire_with_override(10, &"geo".to_string());
        assert_eq!(result.ok(), Some(10));
    }

    #[test]
    fn override_single_divergent_subscriber_wins() {
        let hook: Hook<String, bool> = abort_hook();
        hook.subscribe(|_| Ok(true));
        let result = hook.fire_with_override(false, &"hasDash".to_string());
        assert_eq!(result.ok(), Some(true));
    }

    #[test]
    fn override_first_divergence_wins_and_later_subscribers_still_run() {
        let hook: Hook<String, i32> = abort_hook();
        let journal = Journal::new();

        let j = journal.clone();
        hook.subscribe(move |_| {
            j.push("s1");
            Ok(5)
        });
        let j = journal.clone();
        hook.subscribe(move |_| {
            j.push("s2");
            Ok(7)
        });
        let j = journal.clone();
        hook.subscribe(move |_| {
            j.push("s3");
            Ok(9)
        });

        let result = hook.fire_with_override(5, &"geo".to_string());
        assert_eq!(result.ok(), Some(7));
        assert_eq!(journal.entries(), vec!["s1", "s2", "s3"]);
    }

    #[test]
    fn subscribers_receive_arguments() {
        let hook: Hook<String, String> = abort_hook();
        hook.subscribe(|key| Ok(format!("{key}!")));
        let result = hook.fire_with_override(String::new(), &"hello".to_string());
        assert_eq!(result.ok().as_deref(), Some("hello!"));
    }

    #[test]
    fn abort_stops_at_failing_subscriber() {
        let hook: Hook<()> = abort_hook();
        let journal = Journal::new();

        let j = journal.clone();
        hook.subscribe(move |()| {
            j.push("before");
            Ok(())
        });
        let failing = hook.subscribe(|()| Err("mod crashed".into()));
        let j = journal.clone();
        hook.subscribe(move |()| {
            j.push("after");
            Ok(())
        });

        let Err(HookError::SubscriberFailed {
            hook: point,
            subscriber,
            ..
        }) = hook.fire(&())
        else {
            panic!("expected subscriber failure");
        };
        assert_eq!(point, HookPoint::GetPlayerInt);
        assert_eq!(subscriber, failing);
        assert_eq!(journal.entries(), vec!["before"]);
    }

    #[test]
    fn abort_propagates_from_override_dispatch() {
        let hook: Hook<(), i32> = abort_hook();
        hook.subscribe(|()| Ok(3));
        hook.subscribe(|()| Err("bad".into()));
        assert!(hook.fire_with_override(1, &()).is_err());
    }

    #[test]
    fn isolate_skips_failed_subscriber() {
        let hook: Hook<(), i32> = Hook::new(HookPoint::GetPlayerInt, FailureMode::Isolate);
        let journal = Journal::new();

        hook.subscribe(|()| Err("bad".into()));
        let j = journal.clone();
        hook.subscribe(move |()| {
            j.push("ran");
            Ok(4)
        });

        assert_eq!(hook.fire_with_override(1, &()).ok(), Some(4));
        assert_eq!(journal.entries(), vec!["ran"]);
    }

    #[test]
    fn unsubscribe_self_during_dispatch_keeps_snapshot() {
        let hook: Arc<Hook<()>> = Arc::new(abort_hook());
        let journal = Journal::new();
        let own_id: Arc<Mutex<Option<SubscriberId>>> = Arc::new(Mutex::new(None));

        let weak = Arc::downgrade(&hook);
        let slot = Arc::clone(&own_id);
        let j = journal.clone();
        let id = hook.subscribe(move |()| {
            j.push("self-removing");
            let id = slot.lock().ok().and_then(|g| *g);
            if let (Some(hook), Some(id)) = (weak.upgrade(), id) {
                hook.unsubscribe(id);
            }
            Ok(())
        });
        if let Ok(mut guard) = own_id.lock() {
            *guard = Some(id);
        }
        let j = journal.clone();
        hook.subscribe(move |()| {
            j.push("second");
            Ok(())
        });

        assert!(hook.fire(&()).is_ok());
        assert_eq!(journal.entries(), vec!["self-removing", "second"]);
        assert!(!hook.is_subscribed(id));

        assert!(hook.fire(&()).is_ok());
        assert_eq!(journal.entries(), vec!["self-removing", "second", "second"]);
    }

    #[test]
    fn subscribing_during_dispatch_affects_only_next_fire() {
        let hook: Arc<Hook<()>> = Arc::new(abort_hook());
        let journal = Journal::new();

        let weak = Arc::downgrade(&hook);
        let j = journal.clone();
        hook.subscribe(move |()| {
            j.push("spawner");
            if let Some(hook) = weak.upgrade() {
                let inner = j.clone();
                hook.subscribe(move |()| {
                    inner.push("spawned");
                    Ok(())
                });
            }
            Ok(())
        });

        assert!(hook.fire(&()).is_ok());
        assert_eq!(journal.entries(), vec!["spawner"]);
        assert_eq!(hook.len(), 2);
    }

    #[test]
    fn intercept_reports_presence_of_subscribers() {
        let hook: Hook<i32> = abort_hook();
        assert_eq!(hook.fire_intercept(&1).ok(), Some(false));

        let journal = Journal::new();
        for tag in ["x", "y"] {
            let j = journal.clone();
            hook.subscribe(move |_| {
                j.push(tag);
                Ok(())
            });
        }
        assert_eq!(hook.fire_intercept(&1).ok(), Some(true));
        assert_eq!(journal.entries(), vec!["x", "y"]);
    }

    #[test]
    fn first_handler_wins_reports_handled() {
        let hook: Hook<(), bool> = abort_hook();
        assert_eq!(hook.fire_first_handler_wins(&()).ok(), Some(false));

        hook.subscribe(|()| Ok(false));
        assert_eq!(hook.fire_first_handler_wins(&()).ok(), Some(true));
    }

    #[test]
    fn first_handler_wins_invokes_only_earliest() {
        let hook: Hook<()> = abort_hook();
        let journal = Journal::new();
        for tag in ["first", "second"] {
            let j = journal.clone();
            hook.subscribe(move |()| {
                j.push(tag);
                Ok(())
            });
        }

        assert_eq!(hook.fire_first_handler_wins(&()).ok(), Some(true));
        assert_eq!(journal.entries(), vec!["first"]);
    }

    #[test]
    fn last_value_or_default() {
        let hook: Hook<(), i32> = abort_hook();
        assert_eq!(hook.fire_last_or(0, &()).ok(), Some(0));

        hook.subscribe(|()| Ok(1));
        hook.subscribe(|()| Ok(2));
        assert_eq!(hook.fire_last_or(0, &()).ok(), Some(2));
    }

    fn isolate_hook<A, R>() -> Hook<A, R> {
        Hook::new(HookPoint::DashVector, FailureMode::Isolate)
    }

    #[test]
    fn isolate_last_value_skips_failed_subscriber() {
        let hook: Hook<(), i32> = isolate_hook();
        hook.subscribe(|()| Ok(5));
        hook.subscribe(|()| Err("bad vector".into()));
        assert_eq!(hook.fire_last_or(0, &()).ok(), Some(5));
    }

    #[test]
    fn isolate_last_value_falls_back_when_all_fail() {
        let hook: Hook<(), i32> = isolate_hook();
        hook.subscribe(|()| Err("bad vector".into()));
        assert_eq!(hook.fire_last_or(-1, &()).ok(), Some(-1));
    }

    #[test]
    fn isolate_first_handler_still_counts_as_handled() {
        let hook: Hook<()> = isolate_hook();
        let journal = Journal::new();
        hook.subscribe(|()| Err("dash mod crashed".into()));
        let j = journal.clone();
        hook.subscribe(move |()| {
            j.push("second");
            Ok(())
        });

        assert_eq!(hook.fire_first_handler_wins(&()).ok(), Some(true));
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn isolate_intercept_runs_past_failure() {
        let hook: Hook<i32> = isolate_hook();
        let journal = Journal::new();
        hook.subscribe(|_| Err("write rejected".into()));
        let j = journal.clone();
        hook.subscribe(move |_| {
            j.push("after");
            Ok(())
        });

        assert_eq!(hook.fire_intercept(&1).ok(), Some(true));
        assert_eq!(journal.entries(), vec!["after"]);
    }

    #[test]
    fn isolate_intercept_with_only_failures_is_handled() {
        let hook: Hook<i32> = isolate_hook();
        hook.subscribe(|_| Err("write rejected".into()));
        assert_eq!(hook.fire_intercept(&1).ok(), Some(true));
    }

    #[test]
    fn abort_intercept_propagates() {
        let hook: Hook<i32> = abort_hook();
        hook.subscribe(|_| Err("write rejected".into()));
        assert!(hook.fire_intercept(&1).is_err());
    }

    #[test]
    fn unsubscribe_unknown_is_noop() {
        let hook: Hook<()> = abort_hook();
        hook.subscribe(|()| Ok(()));
        assert!(!hook.unsubscribe(SubscriberId::new()));
        assert_eq!(hook.len(), 1);
    }

    #[test]
    fn debug_shows_point_and_count() {
        let hook: Hook<()> = abort_hook();
        hook.subscribe(|()| Ok(()));
        let text = format!("{hook:?}");
        assert!(text.contains("GetPlayerInt"));
        assert!(text.contains("subscribers: 1"));
    }
}
