//! Error types for foreach-route

use thiserror::Error;

/// Result type alias using foreach-route's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating foreach arguments
///
/// Only the restriction checks produce errors. Fast-route classification
/// never fails; ineligible input is reported as a slow route instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Invalid argument provided to a foreach operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Name of the argument that failed validation
    pub fn arg(&self) -> &'static str {
        match self {
            Self::InvalidArgument { arg, .. } => arg,
        }
    }
}
