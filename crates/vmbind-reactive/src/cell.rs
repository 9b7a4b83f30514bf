#![forbid(unsafe_code)]

//! Mutable value cells with synchronous change notification.
//!
//! # Design
//!
//! [`ValueCell<T>`] keeps its current value and a subscriber map in shared,
//! reference-counted storage. Subscribers are keyed by a monotonically
//! increasing id, so iterating the map visits them in registration order.
//!
//! Every write stores the value, bumps the version, and then runs the whole
//! fan-out before returning. The interior borrow is released before any
//! callback runs, which lets callbacks subscribe, cancel, or read the cell.
//!
//! # Invariants
//!
//! 1. `get()` returns the most recently written value.
//! 2. `subscribe()` invokes the new callback once with the current value
//!    before returning.
//! 3. Each write reaches every registered callback exactly once, in
//!    registration order. Writes are never coalesced, even when the new value
//!    equals the old one.
//! 4. A callback cancelled during a fan-out is not invoked for the remainder
//!    of that fan-out.
//! 5. `version()` increments by exactly 1 per write.
//!
//! # Failure Modes
//!
//! - **Write from inside a callback**: the nested write delivers its own
//!   fan-out before the outer one resumes. Subscribers later in the outer
//!   fan-out then see the older value after the newer one. This is
//!   unsupported and the ordering is left undefined.
//! - **Cell dropped while subscribed**: outstanding [`Subscription`]s become
//!   inert; cancelling them does nothing.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::stream::Stream;
use crate::subscription::Subscription;

/// Shared callback handle used throughout the reactive pipeline.
pub(crate) type Callback<T> = Rc<dyn Fn(&T)>;

/// Shared interior for [`ValueCell<T>`].
struct CellInner<T> {
    value: T,
    /// Bumped on every write.
    version: u64,
    /// Next subscriber id. Ids are never reused.
    next_id: u64,
    subscribers: BTreeMap<u64, Callback<T>>,
}

/// A single mutable value that pushes every write to its subscribers.
///
/// Cloning a `ValueCell` creates a new handle to the **same** value and
/// subscriber list.
pub struct ValueCell<T> {
    inner: Rc<RefCell<CellInner<T>>>,
}

impl<T> Clone for ValueCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ValueCell")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Default + Clone + 'static> Default for ValueCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> ValueCell<T> {
    /// Create a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CellInner {
                value,
                version: 0,
                next_id: 0,
                subscribers: BTreeMap::new(),
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Access the current value by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure writes to this cell (re-entrant borrow).
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replace the value and notify every subscriber before returning.
    pub fn set(&self, value: T) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.value = value.clone();
            inner.version += 1;
        }
        self.notify(&value);
    }

    /// Replace the value only if it differs from the current one.
    ///
    /// Returns `true` when a write (and its fan-out) happened.
    pub fn set_if_changed(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        if self.with(|current| *current == value) {
            return false;
        }
        self.set(value);
        true
    }

    /// Mutate the value in place, then notify like [`set()`](Self::set).
    ///
    /// # Panics
    ///
    /// Panics if the closure reads or writes this cell (re-entrant borrow).
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let value = {
            let mut inner = self.inner.borrow_mut();
            f(&mut inner.value);
            inner.version += 1;
            inner.value.clone()
        };
        self.notify(&value);
    }

    /// Register `callback` and replay the current value to it immediately.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.subscribe_callback(Rc::new(callback))
    }

    pub(crate) fn subscribe_callback(&self, callback: Callback<T>) -> Subscription {
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.subscribers.insert(id, Rc::clone(&callback));
            (id, inner.value.clone())
        };
        tracing::trace!(message = "reactive.subscribe", id);

        let weak = Rc::downgrade(&self.inner);
        let subscription = Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                // Drop the callback only after the borrow is released.
                let removed = inner.borrow_mut().subscribers.remove(&id);
                drop(removed);
                tracing::trace!(message = "reactive.cancel", id);
            }
        });

        callback(&current);
        subscription
    }

    /// A lazy stream over this cell's values.
    ///
    /// The stream holds a handle to the cell; creating it does not subscribe.
    #[must_use]
    pub fn stream(&self) -> Stream<T> {
        let cell = self.clone();
        Stream::from_source(move |callback| cell.subscribe_callback(callback))
    }

    /// Number of writes since construction.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self, value: &T) {
        let snapshot: Vec<(u64, Callback<T>)> = self
            .inner
            .borrow()
            .subscribers
            .iter()
            .map(|(id, callback)| (*id, Rc::clone(callback)))
            .collect();
        tracing::trace!(message = "reactive.set", subscribers = snapshot.len());

        for (id, callback) in snapshot {
            let live = self.inner.borrow().subscribers.contains_key(&id);
            if live {
                callback(value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
