#![forbid(unsafe_code)]

//! Cyclic data provider.
//!
//! [`DataProvider`] walks a fixed, non-empty sequence of models and wraps
//! around at the end, so it never runs out.
//!
//! # Invariants
//!
//! 1. The backing sequence is non-empty and never changes.
//! 2. `index() < len()` at all times.
//! 3. Calling `advance()` `len()` times returns to the starting element.

use std::cell::Cell;

use crate::error::{MvvmError, Result};
use crate::model::Model;

/// Deterministic, wrap-around source of model values.
///
/// Advancing takes `&self`, so a provider can be shared behind an `Rc` by
/// the embedding application and referenced weakly by view-models.
#[derive(Debug)]
pub struct DataProvider<M> {
    items: Vec<M>,
    index: Cell<usize>,
}

impl<M: Model> DataProvider<M> {
    /// Provider positioned at the first item.
    ///
    /// # Errors
    ///
    /// [`MvvmError::InvalidConfiguration`] when `items` is empty.
    pub fn new(items: Vec<M>) -> Result<Self> {
        Self::with_start(items, 0)
    }

    /// Provider positioned at `start`.
    ///
    /// # Errors
    ///
    /// [`MvvmError::InvalidConfiguration`] when `items` is empty or `start`
    /// is out of range.
    pub fn with_start(items: Vec<M>, start: usize) -> Result<Self> {
        if items.is_empty() {
            return Err(MvvmError::invalid("data provider needs at least one item"));
        }
        if start >= items.len() {
            return Err(MvvmError::invalid(format!(
                "start index {start} out of range for {} items",
                items.len()
            )));
        }
        Ok(Self {
            items,
            index: Cell::new(start),
        })
    }

    /// The item at the current index.
    #[must_use]
    pub fn current(&self) -> &M {
        &self.items[self.index.get()]
    }

    /// Step to the next item, wrapping at the end, and return it.
    pub fn advance(&self) -> &M {
        let from = self.index.get();
        let to = (from + 1) % self.items.len();
        self.index.set(to);
        tracing::debug!(message = "provider.advance", from, to);
        &self.items[to]
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index.get()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always `false`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[M] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Person;

    fn people() -> Vec<Person> {
        vec![
            Person::new("Mr", "A", "One"),
            Person::new("Ms", "B", "Two"),
            Person::new("Dr", "C", "Three"),
        ]
    }

    #[test]
    fn empty_is_invalid_configuration() {
        let err = DataProvider::<Person>::new(Vec::new()).unwrap_err();
        assert!(matches!(err, MvvmError::InvalidConfiguration { .. }));
    }

    #[test]
    fn start_out_of_range_is_invalid() {
        let err = DataProvider::with_start(people(), 3).unwrap_err();
        assert!(matches!(err, MvvmError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("start index 3"));
    }

    #[test]
    fn current_does_not_mutate() {
        let provider = DataProvider::new(people()).unwrap();
        assert_eq!(provider.current().first_name(), "A");
        assert_eq!(provider.current().first_name(), "A");
        assert_eq!(provider.index(), 0);
    }

    #[test]
    fn advance_steps_and_wraps() {
        let provider = DataProvider::new(people()).unwrap();
        assert_eq!(provider.advance().first_name(), "B");
        assert_eq!(provider.advance().first_name(), "C");
        assert_eq!(provider.advance().first_name(), "A");
        assert_eq!(provider.index(), 0);
    }

    #[test]
    fn single_item_advances_to_itself() {
        let provider = DataProvider::new(vec![Person::new("", "Solo", "")]).unwrap();
        assert_eq!(provider.advance(), provider.current());
        assert_eq!(provider.index(), 0);
    }

    #[test]
    fn with_start_positions_index() {
        let provider = DataProvider::with_start(people(), 2).unwrap();
        assert_eq!(provider.current().first_name(), "C");
        assert_eq!(provider.advance().first_name(), "A");
    }
}
