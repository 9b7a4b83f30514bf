#![forbid(unsafe_code)]

//! Lifetime scopes that cancel a group of subscriptions together.
//!
//! A [`SubscriptionScope`] is owned by whatever object the subscriptions
//! serve (typically a view). When the owner is dropped, the scope is dropped
//! with it and every retained [`Subscription`] is cancelled, so no callback
//! can reach a destroyed owner and no source keeps growing its subscriber
//! list across repeated construct/destroy cycles.
//!
//! # Invariants
//!
//! 1. `dispose()` cancels each retained subscription exactly once.
//! 2. `dispose()` runs at most once; `Drop` calls it.
//! 3. After disposal the scope ignores further use: `retain()` cancels the
//!    incoming subscription on the spot and `bind()` does not subscribe.

use std::cell::{Cell, RefCell};
use std::fmt;

use crate::stream::Stream;
use crate::subscription::Subscription;

/// A bag of subscriptions cancelled as one.
#[derive(Default)]
pub struct SubscriptionScope {
    subscriptions: RefCell<Vec<Subscription>>,
    disposed: Cell<bool>,
}

impl SubscriptionScope {
    /// Create an empty, live scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `subscription` alive until the scope is disposed.
    pub fn retain(&self, subscription: Subscription) {
        if self.disposed.get() {
            tracing::trace!(message = "scope.retain_after_dispose");
            subscription.cancel();
            return;
        }
        self.subscriptions.borrow_mut().push(subscription);
    }

    /// Subscribe `callback` to `stream` and retain the subscription.
    pub fn bind<T: 'static>(&self, stream: &Stream<T>, callback: impl Fn(&T) + 'static) {
        if self.disposed.get() {
            tracing::trace!(message = "scope.bind_after_dispose");
            return;
        }
        self.retain(stream.subscribe(callback));
    }

    /// Cancel every retained subscription and mark the scope disposed.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        let subscriptions = std::mem::take(&mut *self.subscriptions.borrow_mut());
        let cancelled = subscriptions.len();
        for subscription in &subscriptions {
            subscription.cancel();
        }
        drop(subscriptions);
        tracing::debug!(message = "scope.dispose", cancelled);
    }

    /// Number of retained subscriptions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Whether no subscription is retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `dispose()` has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl Drop for SubscriptionScope {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for SubscriptionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionScope")
            .field("retained", &self.len())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValueCell;
    use std::rc::Rc;

    #[test]
    fn dispose_cancels_everything() {
        let a = ValueCell::new(0);
        let b = ValueCell::new("x".to_string());
        let hits = Rc::new(Cell::new(0u32));

        let scope = SubscriptionScope::new();
        let h = Rc::clone(&hits);
        scope.bind(&a.stream(), move |_| h.set(h.get() + 1));
        let h = Rc::clone(&hits);
        scope.bind(&b.stream().map(|s| s.len()), move |_| h.set(h.get() + 1));
        assert_eq!(scope.len(), 2);
        assert_eq!(hits.get(), 2);

        scope.dispose();
        a.set(1);
        b.set("yy".to_string());
        assert_eq!(hits.get(), 2);
        assert_eq!(a.subscriber_count(), 0);
        assert_eq!(b.subscriber_count(), 0);
        assert!(scope.is_empty());
    }

    #[test]
    fn drop_disposes() {
        let cell = ValueCell::new(0);
        {
            let scope = SubscriptionScope::new();
            scope.retain(cell.subscribe(|_| {}));
            scope.retain(cell.subscribe(|_| {}));
            assert_eq!(cell.subscriber_count(), 2);
        }
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn dispose_twice_is_noop() {
        let count = Rc::new(Cell::new(0u32));
        let scope = SubscriptionScope::new();
        let c = Rc::clone(&count);
        scope.retain(Subscription::new(move || c.set(c.get() + 1)));

        scope.dispose();
        scope.dispose();
        drop(scope);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn use_after_dispose_is_ignored() {
        let cell = ValueCell::new(0);
        let hits = Rc::new(Cell::new(0u32));
        let scope = SubscriptionScope::new();
        scope.dispose();

        let h = Rc::clone(&hits);
        scope.bind(&cell.stream(), move |_| h.set(h.get() + 1));
        assert_eq!(hits.get(), 0, "bind after dispose must not subscribe");

        let h = Rc::clone(&hits);
        scope.retain(cell.subscribe(move |_| h.set(h.get() + 1)));
        cell.set(1);
        assert_eq!(hits.get(), 1, "only the replay got through");
        assert_eq!(cell.subscriber_count(), 0);
        assert!(scope.is_empty());
    }

    #[test]
    fn dispose_releases_captures() {
        let cell = ValueCell::new(0);
        let captured = Rc::new(());
        let scope = SubscriptionScope::new();
        let c = Rc::clone(&captured);
        scope.bind(&cell.stream(), move |_| {
            let _keep = &c;
        });
        assert_eq!(Rc::strong_count(&captured), 2);

        scope.dispose();
        assert_eq!(Rc::strong_count(&captured), 1);
    }

    #[test]
    fn debug_format() {
        let scope = SubscriptionScope::new();
        let dbg = format!("{scope:?}");
        assert!(dbg.contains("retained: 0"));
        assert!(dbg.contains("disposed: false"));
    }
}
