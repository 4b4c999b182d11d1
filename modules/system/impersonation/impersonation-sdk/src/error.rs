//! Error types for the impersonation collaborators.

use thiserror::Error;

/// Errors returned by a [`CapabilityChecker`](crate::CapabilityChecker).
///
/// These represent backend failures only. A denial is `Ok(false)`,
/// never an error variant.
#[derive(Debug, Error)]
pub enum CapabilityCheckError {
    /// The policy backend could not be reached or is not ready.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors returned by a [`TokenLookup`](crate::TokenLookup).
#[derive(Debug, Error)]
pub enum TokenLookupError {
    /// No token with the given identifier exists.
    #[error("token \"{0}\" not found")]
    NotFound(String),

    /// The token store could not be reached or is not ready.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
