#![forbid(unsafe_code)]

//! Model records.
//!
//! A model is a plain value object: no identity beyond structural equality,
//! immutable once constructed. [`Person`] is the record the bundled
//! view-model and view present.

use std::fmt;

/// Role trait for values held by a view-model.
///
/// Implementors are immutable value objects; a change is represented by
/// replacing the whole value.
pub trait Model: Clone + PartialEq + fmt::Debug + 'static {}

/// A contact record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Person {
    title: String,
    first_name: String,
    last_name: String,
    address_line: String,
    city: String,
    postal_code: String,
    country: String,
}

impl Model for Person {}

impl Person {
    /// Create a person with an empty address.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// Set the four address lines.
    #[must_use]
    pub fn with_address(
        mut self,
        address_line: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.address_line = address_line.into();
        self.city = city.into();
        self.postal_code = postal_code.into();
        self.country = country.into();
        self
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn address_line(&self) -> &str {
        &self.address_line
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// "title first last", skipping empty parts.
    #[must_use]
    pub fn full_name(&self) -> String {
        [&self.title, &self.first_name, &self.last_name]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Address line, city, postal code, country.
    #[must_use]
    pub fn address_lines(&self) -> [&str; 4] {
        [
            &self.address_line,
            &self.city,
            &self.postal_code,
            &self.country,
        ]
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}
