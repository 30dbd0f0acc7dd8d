//! Error types for the `AuthN` module.

use thiserror::Error;

/// Errors that can occur when using the `AuthN` API.
#[derive(Debug, Error)]
pub enum AuthNError {
    /// Login rejected. Carries no detail; the reason is only logged.
    #[error("authentication failed")]
    Unauthorized,

    /// The account directory is not available.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
