#![forbid(unsafe_code)]

//! Demo error type and process exit codes.

use thiserror::Error;
use vmbind_mvvm::MvvmError;

pub type Result<T> = std::result::Result<T, DemoError>;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Mvvm(#[from] MvvmError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl DemoError {
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
