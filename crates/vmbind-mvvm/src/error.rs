#![forbid(unsafe_code)]

//! Error types for the MVVM layer.
//!
//! Both variants are precondition violations, reported at the call that
//! broke the contract. Nothing here is retried and nothing travels through a
//! stream.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MvvmError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MvvmError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("no data provider bound to this view-model")]
    NoProviderBound,
}

impl MvvmError {
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
