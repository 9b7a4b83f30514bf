#![forbid(unsafe_code)]

//! Lazy, composable streams derived from [`ValueCell`](crate::ValueCell)s.
//!
//! # Design
//!
//! A [`Stream<T>`] is only a recipe: a shared function that, given a
//! downstream callback, attaches to the upstream source and returns the
//! resulting [`Subscription`]. [`map()`](Stream::map) wraps that recipe in
//! another one that runs the transform before forwarding. Nothing happens
//! until [`subscribe()`](Stream::subscribe) is called.
//!
//! # Invariants
//!
//! 1. Creating or mapping a stream never subscribes to anything.
//! 2. Every subscription runs the transform chain independently: a transform
//!    is invoked once per subscriber per upstream emission. Nothing is cached
//!    between subscribers (see [`share()`](Stream::share) for that).
//! 3. A stream rooted in a cell replays the cell's current value, passed
//!    through the transform chain, during `subscribe()`.
//!
//! Transforms must be pure. There is no error channel; a fallible transform
//! encodes failure in its output type, e.g. `Stream<Result<U, E>>`.

use std::fmt;
use std::rc::Rc;

use crate::cell::Callback;
use crate::shared::Shared;
use crate::subscription::Subscription;

type Source<T> = Rc<dyn Fn(Callback<T>) -> Subscription>;

/// A push-based sequence of `T` values.
///
/// Cloning a `Stream` is cheap and yields the same recipe.
pub struct Stream<T> {
    source: Source<T>,
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            source: Rc::clone(&self.source),
        }
    }
}

impl<T> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("item", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Stream<T> {
    pub(crate) fn from_source(source: impl Fn(Callback<T>) -> Subscription + 'static) -> Self {
        Self {
            source: Rc::new(source),
        }
    }

    /// Attach `callback`; every value reaching this stream is passed to it.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        (self.source)(Rc::new(callback))
    }

    /// Derive a stream by applying `transform` to every value.
    #[must_use]
    pub fn map<U: 'static>(&self, transform: impl Fn(&T) -> U + 'static) -> Stream<U> {
        let upstream = self.clone();
        let transform = Rc::new(transform);
        Stream::from_source(move |downstream: Callback<U>| {
            let transform = Rc::clone(&transform);
            upstream.subscribe(move |value| downstream(&transform(value)))
        })
    }

    /// Derive a stream that forwards only the values `f` maps to `Some`.
    ///
    /// If the current value maps to `None`, the replay on subscribe is
    /// suppressed as well.
    #[must_use]
    pub fn filter_map<U: 'static>(&self, f: impl Fn(&T) -> Option<U> + 'static) -> Stream<U> {
        let upstream = self.clone();
        let f = Rc::new(f);
        Stream::from_source(move |downstream: Callback<U>| {
            let f = Rc::clone(&f);
            upstream.subscribe(move |value| {
                if let Some(out) = f(value) {
                    downstream(&out);
                }
            })
        })
    }

    /// Turn this stream hot: one upstream subscription whose values fan out
    /// to every downstream subscriber.
    ///
    /// Unlike the rest of the stream API this subscribes immediately.
    pub fn share(&self) -> Shared<T>
    where
        T: Clone,
    {
        Shared::connect(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
