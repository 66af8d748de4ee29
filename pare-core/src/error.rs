//! Error types for generator construction.

use thiserror::Error;

/// Main error type for pare.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PareError {
    /// A bound, probability or length violates its precondition.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl PareError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::trace!(%message, "rejected generator argument");
        PareError::InvalidArgument { message }
    }
}

/// Result type for pare operations.
pub type Result<T> = std::result::Result<T, PareError>;
