#![forbid(unsafe_code)]

//! Reactive data bindings for vmbind.
//!
//! This crate provides the push-based primitives a view-model uses to expose
//! its state and a view uses to follow it:
//!
//! - [`ValueCell`]: a shared, version-tracked value that notifies subscriber
//!   callbacks synchronously on every write.
//! - [`Stream`]: a lazy recipe for a value sequence, derived from a cell with
//!   [`Stream::map`] and friends.
//! - [`Subscription`]: RAII guard that unsubscribes on drop or `cancel()`.
//! - [`SubscriptionScope`]: a group of subscriptions cancelled together when
//!   their owner goes away.
//! - [`Shared`]: a hot stream with a single upstream subscription.
//!
//! # Architecture
//!
//! Everything is single-threaded: `Rc<RefCell<..>>` for shared state, no
//! scheduler, no suspension points. `ValueCell::set` runs the entire fan-out,
//! transform chains included, before it returns.
//!
//! # Invariants
//!
//! 1. Subscribing replays the current value to the new callback.
//! 2. Subscribers are notified in registration order, once per write, with no
//!    coalescing.
//! 3. Once `Subscription::cancel()` returns, the callback is never invoked
//!    again and the source no longer references it.
//! 4. Disposing a [`SubscriptionScope`] cancels everything it holds.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use vmbind_reactive::{SubscriptionScope, ValueCell};
//!
//! let celsius = ValueCell::new(20.0_f64);
//! let fahrenheit = celsius.stream().map(|c| c * 9.0 / 5.0 + 32.0);
//!
//! let shown = Rc::new(RefCell::new(0.0));
//! let scope = SubscriptionScope::new();
//! let sink = Rc::clone(&shown);
//! scope.bind(&fahrenheit, move |f| *sink.borrow_mut() = *f);
//! assert_eq!(*shown.borrow(), 68.0);
//!
//! celsius.set(100.0);
//! assert_eq!(*shown.borrow(), 212.0);
//!
//! drop(scope);
//! celsius.set(0.0);
//! assert_eq!(*shown.borrow(), 212.0);
//! ```

pub mod cell;
pub mod scope;
pub mod shared;
pub mod stream;
pub mod subscription;

pub use cell::ValueCell;
pub use scope::SubscriptionScope;
pub use shared::Shared;
pub use stream::Stream;
pub use subscription::Subscription;
