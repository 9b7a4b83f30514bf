#![forbid(unsafe_code)]

//! Cancellation handles returned by every `subscribe` call.
//!
//! A [`Subscription`] owns the capability to unregister one callback from its
//! upstream source. It is an RAII guard: dropping it cancels, and so does an
//! explicit [`cancel()`](Subscription::cancel). Cancelling more than once is a
//! no-op.
//!
//! The guard is type-erased so that subscriptions to sources of different
//! value types can live side by side in one
//! [`SubscriptionScope`](crate::SubscriptionScope).

use std::cell::RefCell;
use std::fmt;

type Canceller = Box<dyn FnOnce()>;

/// RAII guard for a registered callback.
///
/// # Invariants
///
/// 1. The canceller runs at most once.
/// 2. After `cancel()` returns, the upstream source holds no reference to the
///    callback, so anything the callback captured is released.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    canceller: RefCell<Option<Canceller>>,
}

impl Subscription {
    /// Wrap a cancellation closure.
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            canceller: RefCell::new(Some(Box::new(cancel))),
        }
    }

    /// A subscription that is already cancelled.
    pub fn inert() -> Self {
        Self {
            canceller: RefCell::new(None),
        }
    }

    /// Combine several subscriptions into one handle that cancels them all.
    pub fn merge(subscriptions: Vec<Subscription>) -> Self {
        Self::new(move || {
            for sub in &subscriptions {
                sub.cancel();
            }
        })
    }

    /// Unregister the callback from its source.
    ///
    /// Safe to call any number of times, including from inside a delivery
    /// callback.
    pub fn cancel(&self) {
        // Release the borrow before running the canceller: it may drop
        // closures that in turn touch this subscription.
        let canceller = self.canceller.borrow_mut().take();
        if let Some(cancel) = canceller {
            cancel();
        }
    }

    /// Whether the subscription has not yet been cancelled.
    ///
    /// Stays `true` after the source is dropped; such a subscription is inert.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.canceller.borrow().is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}
