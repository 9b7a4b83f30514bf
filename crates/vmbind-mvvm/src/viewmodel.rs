#![forbid(unsafe_code)]

//! View-models: read-only streams over a mutable model cell.
//!
//! # Design
//!
//! [`PersonViewModel`] owns a [`ValueCell<Person>`] that nothing outside the
//! view-model can write. Views see only the derived [`Stream`]s (`name`,
//! `address`) and the static [`Labels`]. The single mutator is
//! [`advance_to_next()`](PersonViewModel::advance_to_next), which pulls the
//! next record from a [`DataProvider`] and writes it into the cell; the write
//! re-derives and redelivers both streams before the call returns.
//!
//! The provider is held through a `Weak`: the embedding application owns it,
//! and a view-model never keeps it alive.

use std::fmt;
use std::rc::{Rc, Weak};

use vmbind_reactive::{Stream, ValueCell};

use crate::error::{MvvmError, Result};
use crate::model::{Model, Person};
use crate::provider::DataProvider;

/// Role trait for view-models presenting a model of type `M`.
pub trait ViewModel<M: Model> {
    /// Build a view-model seeded with `model` and no provider.
    fn from_model(model: M) -> Self
    where
        Self: Sized;

    /// Clone of the model currently presented.
    fn current(&self) -> M;

    /// Replace the presented model with the provider's next one.
    ///
    /// # Errors
    ///
    /// [`MvvmError::NoProviderBound`] when the view-model has no provider.
    fn advance_to_next(&self) -> Result<()>;
}

/// Static label text shown next to the streamed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub title: String,
    pub name_heading: String,
    pub address_heading: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "Contact Details".into(),
            name_heading: "Name".into(),
            address_heading: "Address".into(),
        }
    }
}

/// View-model for a single [`Person`].
pub struct PersonViewModel {
    person: ValueCell<Person>,
    name: Stream<String>,
    address: Stream<String>,
    provider: Option<Weak<DataProvider<Person>>>,
    labels: Labels,
}

impl fmt::Debug for PersonViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonViewModel")
            .field("person", &self.person)
            .field("has_provider", &self.has_provider())
            .field("labels", &self.labels)
            .finish_non_exhaustive()
    }
}

impl PersonViewModel {
    /// View-model presenting `person`, without a provider.
    #[must_use]
    pub fn new(person: Person) -> Self {
        let person = ValueCell::new(person);
        let source = person.stream();
        let name = source.map(Person::full_name);
        let address = source.map(|p: &Person| p.address_lines().join("\n"));
        Self {
            person,
            name,
            address,
            provider: None,
            labels: Labels::default(),
        }
    }

    /// View-model seeded from `provider.current()` that advances through
    /// `provider`.
    #[must_use]
    pub fn from_provider(provider: &Rc<DataProvider<Person>>) -> Self {
        let mut view_model = Self::new(provider.current().clone());
        view_model.provider = Some(Rc::downgrade(provider));
        view_model
    }

    /// Replace the default labels.
    #[must_use]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// "title first last" of the current person.
    #[must_use]
    pub fn name(&self) -> &Stream<String> {
        &self.name
    }

    /// Four address lines of the current person, joined by `\n`.
    #[must_use]
    pub fn address(&self) -> &Stream<String> {
        &self.address
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.labels.title
    }

    #[must_use]
    pub fn name_heading(&self) -> &str {
        &self.labels.name_heading
    }

    #[must_use]
    pub fn address_heading(&self) -> &str {
        &self.labels.address_heading
    }

    #[must_use]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// Whether a live provider backs this view-model.
    #[must_use]
    pub fn has_provider(&self) -> bool {
        self.provider
            .as_ref()
            .is_some_and(|provider| provider.strong_count() > 0)
    }

    /// Number of live subscriptions on the model cell.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.person.subscriber_count()
    }

    /// Clone of the person currently presented.
    #[must_use]
    pub fn current(&self) -> Person {
        self.person.get()
    }

    /// Write the provider's next person into the model cell.
    ///
    /// # Errors
    ///
    /// [`MvvmError::NoProviderBound`] when built without a provider, or when
    /// the provider has since been dropped.
    pub fn advance_to_next(&self) -> Result<()> {
        let provider = self
            .provider
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or(MvvmError::NoProviderBound)?;
        let next = provider.advance().clone();
        self.person.set(next);
        Ok(())
    }
}

impl ViewModel<Person> for PersonViewModel {
    fn from_model(model: Person) -> Self {
        Self::new(model)
    }

    fn current(&self) -> Person {
        PersonViewModel::current(self)
    }

    fn advance_to_next(&self) -> Result<()> {
        PersonViewModel::advance_to_next(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn people() -> Vec<Person> {
        vec![
            Person::new("Mr", "Alan", "Turing").with_address(
                "Hollymeade",
                "Wilmslow",
                "SK9 1BN",
                "United Kingdom",
            ),
            Person::new("Dr", "Grace", "Hopper").with_address(
                "1 Navy Yard",
                "Arlington",
                "22202",
                "United States",
            ),
        ]
    }

    fn last_of(stream: &Stream<String>) -> (Rc<RefCell<Vec<String>>>, vmbind_reactive::Subscription) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let sub = stream.subscribe(move |v| sink.borrow_mut().push(v.clone()));
        (log, sub)
    }

    #[test]
    fn name_and_address_project_current_person() {
        let vm = PersonViewModel::new(people().remove(0));
        let (names, _a) = last_of(vm.name());
        let (addresses, _b) = last_of(vm.address());
        assert_eq!(*names.borrow(), vec!["Mr Alan Turing".to_string()]);
        assert_eq!(
            *addresses.borrow(),
            vec!["Hollymeade\nWilmslow\nSK9 1BN\nUnited Kingdom".to_string()]
        );
    }

    #[test]
    fn advance_without_provider_fails() {
        let vm = PersonViewModel::new(people().remove(0));
        assert_eq!(vm.advance_to_next(), Err(MvvmError::NoProviderBound));
        assert!(!vm.has_provider());
    }

    #[test]
    fn advance_redelivers_streams() {
        let provider = Rc::new(DataProvider::new(people()).unwrap());
        let vm = PersonViewModel::from_provider(&provider);
        let (names, _sub) = last_of(vm.name());

        vm.advance_to_next().unwrap();
        assert_eq!(
            *names.borrow(),
            vec!["Mr Alan Turing".to_string(), "Dr Grace Hopper".to_string()]
        );
        assert_eq!(vm.current().last_name(), "Hopper");
    }

    #[test]
    fn provider_is_not_kept_alive() {
        let provider = Rc::new(DataProvider::new(people()).unwrap());
        let vm = PersonViewModel::from_provider(&provider);
        assert_eq!(Rc::strong_count(&provider), 1);
        assert!(vm.has_provider());

        drop(provider);
        assert!(!vm.has_provider());
        assert_eq!(vm.advance_to_next(), Err(MvvmError::NoProviderBound));
    }

    #[test]
    fn from_provider_seeds_from_current() {
        let provider = Rc::new(DataProvider::with_start(people(), 1).unwrap());
        let vm = PersonViewModel::from_provider(&provider);
        assert_eq!(vm.current().first_name(), "Grace");
    }

    #[test]
    fn labels_default_and_override() {
        let vm = PersonViewModel::new(Person::default());
        assert_eq!(vm.title(), "Contact Details");
        assert_eq!(vm.name_heading(), "Name");
        assert_eq!(vm.address_heading(), "Address");

        let vm = vm.with_labels(Labels {
            title: "Kontakt".into(),
            name_heading: "Name".into(),
            address_heading: "Anschrift".into(),
        });
        assert_eq!(vm.title(), "Kontakt");
        assert_eq!(vm.address_heading(), "Anschrift");
    }

    #[test]
    fn role_trait_dispatches() {
        fn seed<VM: ViewModel<Person>>(person: Person) -> VM {
            VM::from_model(person)
        }
        let vm: PersonViewModel = seed(people().remove(1));
        assert_eq!(ViewModel::current(&vm).first_name(), "Grace");
        assert!(ViewModel::advance_to_next(&vm).is_err());
    }

    #[test]
    fn streams_do_not_subscribe_until_bound() {
        let vm = PersonViewModel::new(Person::default());
        assert_eq!(vm.subscriber_count(), 0);
        let (_log, sub) = last_of(vm.name());
        assert_eq!(vm.subscriber_count(), 1);
        drop(sub);
        assert_eq!(vm.subscriber_count(), 0);
    }
}
