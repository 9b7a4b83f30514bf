#![forbid(unsafe_code)]

//! Seed datasets for the demo provider.

use std::fs;
use std::path::Path;

use vmbind_mvvm::Person;

use crate::error::Result;

/// Built-in records used when no dataset file is given.
#[must_use]
pub fn sample() -> Vec<Person> {
    vec![
        Person::new("Dr", "Ada", "Lovelace").with_address(
            "12 St James's Square",
            "London",
            "SW1Y 4JH",
            "United Kingdom",
        ),
        Person::new("Rear Admiral", "Grace", "Hopper").with_address(
            "1000 Navy Pentagon",
            "Arlington",
            "22202",
            "United States",
        ),
        Person::new("Prof", "Donald", "Knuth").with_address(
            "353 Jane Stanford Way",
            "Stanford",
            "94305",
            "United States",
        ),
    ]
}

/// Read a JSON array of persons from `path`, or fall back to [`sample()`].
///
/// An empty array is returned as-is; the provider rejects it.
pub fn load(path: Option<&Path>) -> Result<Vec<Person>> {
    let Some(path) = path else {
        return Ok(sample());
    };
    let raw = fs::read_to_string(path)?;
    let people: Vec<Person> = serde_json::from_str(&raw)?;
    tracing::debug!(message = "dataset.load", path = %path.display(), records = people.len());
    Ok(people)
}
