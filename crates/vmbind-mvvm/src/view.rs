#![forbid(unsafe_code)]

//! Views: presentation elements bound to view-model streams.
//!
//! # Design
//!
//! A [`PersonView`] owns its view-model outright and one
//! [`SubscriptionScope`]. On construction it binds the view-model's `name`
//! and `address` streams to two [`TextElement`]s; every binding lands in the
//! scope. Tearing the view down (explicitly or by dropping it) disposes the
//! scope, which unregisters the callbacks from the model cell and releases
//! everything they captured.
//!
//! Callbacks capture only the elements they write to, never the view, so no
//! reference cycle runs through the view-model's subscriber list.
//!
//! # State machine
//!
//! ```text
//! Unbound --bind--> Bound --dispose--> Disposed
//! ```
//!
//! There is no way back; a new binding needs a new view.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use vmbind_reactive::SubscriptionScope;

use crate::error::Result;
use crate::model::Person;
use crate::viewmodel::PersonViewModel;

/// Lifecycle of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Constructed, no subscriptions yet.
    Unbound,
    /// Subscriptions attached; elements follow the view-model.
    Bound,
    /// Scope disposed; elements are frozen.
    Disposed,
}

/// Role trait for views over a view-model of type `VM`.
pub trait View<VM>: Sized {
    /// Build the view and bind it to `view_model`.
    fn new(view_model: VM) -> Self;

    fn view_model(&self) -> &VM;

    fn state(&self) -> ViewState;
}

#[derive(Debug, Default)]
struct TextState {
    text: String,
    revision: u64,
}

/// A UI-agnostic text slot.
///
/// The presentation layer reads it; the view writes it from subscription
/// callbacks. Cloning yields a handle to the same slot.
#[derive(Clone, Default)]
pub struct TextElement {
    inner: Rc<RefCell<TextState>>,
}

impl fmt::Debug for TextElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("TextElement")
            .field("text", &inner.text)
            .field("revision", &inner.revision)
            .finish()
    }
}

impl TextElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> String {
        self.inner.borrow().text.clone()
    }

    /// Number of writes so far. Renderers can compare it to skip redraws.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.inner.borrow().revision
    }

    pub fn set_text(&self, text: impl Into<String>) {
        let mut inner = self.inner.borrow_mut();
        inner.text = text.into();
        inner.revision += 1;
    }
}

/// Heading on its own line, value below.
#[must_use]
pub fn labeled(heading: &str, value: &str) -> String {
    format!("{heading}\n{value}")
}

/// View presenting a [`PersonViewModel`].
pub struct PersonView {
    view_model: PersonViewModel,
    scope: SubscriptionScope,
    title: TextElement,
    name: TextElement,
    address: TextElement,
    state: ViewState,
}

impl fmt::Debug for PersonView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonView")
            .field("state", &self.state)
            .field("title", &self.title)
            .field("name", &self.name)
            .field("address", &self.address)
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

impl PersonView {
    /// Build the view and bind it to `view_model`.
    #[must_use]
    pub fn new(view_model: PersonViewModel) -> Self {
        let mut view = Self {
            view_model,
            scope: SubscriptionScope::new(),
            title: TextElement::new(),
            name: TextElement::new(),
            address: TextElement::new(),
            state: ViewState::Unbound,
        };
        view.bind();
        view
    }

    fn bind(&mut self) {
        debug_assert_eq!(self.state, ViewState::Unbound);
        let vm = &self.view_model;
        self.title.set_text(vm.title());

        let heading = vm.name_heading().to_owned();
        let element = self.name.clone();
        self.scope.bind(vm.name(), move |name: &String| {
            element.set_text(labeled(&heading, name));
        });

        let heading = vm.address_heading().to_owned();
        let element = self.address.clone();
        self.scope.bind(vm.address(), move |address: &String| {
            element.set_text(labeled(&heading, address));
        });

        self.state = ViewState::Bound;
        tracing::debug!(message = "view.bind", bindings = self.scope.len());
    }

    /// Interaction hook for the "next" control.
    ///
    /// Ignored once the view is disposed.
    ///
    /// # Errors
    ///
    /// Propagates [`MvvmError::NoProviderBound`](crate::MvvmError) from the
    /// view-model.
    pub fn on_next_pressed(&self) -> Result<()> {
        if self.state == ViewState::Disposed {
            tracing::trace!(message = "view.press_after_dispose");
            return Ok(());
        }
        self.view_model.advance_to_next()
    }

    /// Tear down all bindings. Runs at most once; `Drop` calls it.
    pub fn dispose(&mut self) {
        if self.state == ViewState::Disposed {
            return;
        }
        let bindings = self.scope.len();
        self.scope.dispose();
        self.state = ViewState::Disposed;
        tracing::debug!(message = "view.dispose", bindings);
    }

    #[must_use]
    pub fn title(&self) -> &TextElement {
        &self.title
    }

    #[must_use]
    pub fn name(&self) -> &TextElement {
        &self.name
    }

    #[must_use]
    pub fn address(&self) -> &TextElement {
        &self.address
    }

    /// Number of live bindings held by the view's scope.
    #[must_use]
    pub fn bindings(&self) -> usize {
        self.scope.len()
    }

    /// The person currently on screen.
    #[must_use]
    pub fn person(&self) -> Person {
        self.view_model.current()
    }
}

impl View<PersonViewModel> for PersonView {
    fn new(view_model: PersonViewModel) -> Self {
        PersonView::new(view_model)
    }

    fn view_model(&self) -> &PersonViewModel {
        &self.view_model
    }

    fn state(&self) -> ViewState {
        self.state
    }
}

impl Drop for PersonView {
    fn drop(&mut self) {
        self.dispose();
    }
}
