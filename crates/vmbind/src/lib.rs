#![forbid(unsafe_code)]

//! vmbind public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub use vmbind_mvvm as mvvm;
pub use vmbind_reactive as reactive;

pub mod prelude {
    pub use vmbind_mvvm::{
        DataProvider, Labels, Model, MvvmError, Person, PersonView, PersonViewModel, TextElement,
        View, ViewModel, ViewState,
    };
    pub use vmbind_reactive::{Shared, Stream, Subscription, SubscriptionScope, ValueCell};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::rc::Rc;

    #[test]
    fn prelude_covers_the_pipeline() {
        let provider = Rc::new(
            DataProvider::new(vec![Person::new("Mx", "Sam", "Lee")]).expect("non-empty"),
        );
        let view = PersonView::new(PersonViewModel::from_provider(&provider));
        assert_eq!(View::state(&view), ViewState::Bound);
        assert!(view.on_next_pressed().is_ok());
        assert_eq!(view.name().text(), "Name\nMx Sam Lee");
    }
}
