#![forbid(unsafe_code)]

//! Model-View-ViewModel roles on top of `vmbind-reactive`.
//!
//! - [`Model`], [`ViewModel`], [`View`]: role traits linking the three layers
//!   through explicit type parameters.
//! - [`Person`]: the bundled model record.
//! - [`DataProvider`]: cycles through a fixed list of models.
//! - [`PersonViewModel`]: exposes `name`/`address` streams and the
//!   `advance_to_next` command.
//! - [`PersonView`]: binds [`TextElement`]s to the view-model and tears the
//!   bindings down when dropped.
//!
//! # Ownership
//!
//! ```text
//! application --Rc--> DataProvider <--Weak-- PersonViewModel <--owns-- PersonView
//!                                                 |                        |
//!                                            ValueCell <--subscriptions-- SubscriptionScope
//! ```
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use vmbind_mvvm::{DataProvider, Person, PersonView, PersonViewModel};
//!
//! let provider = Rc::new(DataProvider::new(vec![
//!     Person::new("Mr", "Alan", "Turing"),
//!     Person::new("Dr", "Grace", "Hopper"),
//! ])?);
//! let view = PersonView::new(PersonViewModel::from_provider(&provider));
//! assert_eq!(view.name().text(), "Name\nMr Alan Turing");
//!
//! view.on_next_pressed()?;
//! assert_eq!(view.name().text(), "Name\nDr Grace Hopper");
//! # Ok::<(), vmbind_mvvm::MvvmError>(())
//! ```

pub mod error;
pub mod model;
pub mod provider;
pub mod view;
pub mod viewmodel;

pub use error::{MvvmError, Result};
pub use model::{Model, Person};
pub use provider::DataProvider;
pub use view::{PersonView, TextElement, View, ViewState, labeled};
pub use viewmodel::{Labels, PersonViewModel, ViewModel};
