#![forbid(unsafe_code)]

//! Hot streams: one upstream subscription shared by many subscribers.
//!
//! # Design
//!
//! [`Shared<T>`] subscribes to its source exactly once and mirrors every
//! emission into an internal hub cell. Downstream subscribers attach to the
//! hub, so an upstream transform chain runs once per emission no matter how
//! many subscribers there are. The latest value is cached and replayed to new
//! subscribers.
//!
//! # Invariants
//!
//! 1. While any `Shared` handle, a stream obtained from one, or an active
//!    downstream subscription is alive, the upstream holds exactly one
//!    subscription for it.
//! 2. Dropping the last of these cancels the upstream subscription.
//! 3. A source that has not emitted yet leaves the hub empty; subscribers get
//!    no replay until the first emission.

use std::fmt;
use std::rc::Rc;

use crate::cell::{Callback, ValueCell};
use crate::stream::Stream;
use crate::subscription::Subscription;

struct SharedInner<T> {
    hub: ValueCell<Option<T>>,
    upstream: Subscription,
}

/// A connected, caching view of a [`Stream`].
///
/// Cloning a `Shared` creates a new handle to the **same** connection.
pub struct Shared<T> {
    inner: Rc<SharedInner<T>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug + Clone + 'static> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("latest", &self.inner.hub.get())
            .field("connected", &self.inner.upstream.is_active())
            .finish()
    }
}

impl<T: Clone + 'static> Shared<T> {
    pub(crate) fn connect(source: &Stream<T>) -> Self {
        let hub = ValueCell::new(None);
        let writer = hub.clone();
        let upstream = source.subscribe(move |value: &T| writer.set(Some(value.clone())));
        Self {
            inner: Rc::new(SharedInner { hub, upstream }),
        }
    }

    /// The most recent upstream value, if any.
    #[must_use]
    pub fn latest(&self) -> Option<T> {
        self.inner.hub.get()
    }

    /// A cold stream over the shared values.
    ///
    /// The returned stream, and every subscription made through it, keeps the
    /// upstream connection alive.
    #[must_use]
    pub fn stream(&self) -> Stream<T> {
        let inner = Rc::clone(&self.inner);
        Stream::from_source(move |downstream: Callback<T>| {
            let attached = inner.hub.subscribe(move |slot: &Option<T>| {
                if let Some(value) = slot {
                    downstream(value);
                }
            });
            // Each downstream subscription holds the connection open.
            let connection = Rc::clone(&inner);
            Subscription::new(move || {
                attached.cancel();
                drop(connection);
            })
        })
    }

    /// Shorthand for `self.stream().subscribe(callback)`.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.stream().subscribe(callback)
    }

    /// Number of downstream subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.hub.subscriber_count()
    }

    /// Whether the upstream subscription is still live.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.upstream.is_active()
    }

    /// Cancel the upstream subscription. The last value stays cached.
    pub fn disconnect(&self) {
        self.inner.upstream.cancel();
    }
}
