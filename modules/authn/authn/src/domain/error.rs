//! Domain errors for the `AuthN` module.

use authn_sdk::{AuthNError, DirectoryError, RejectionReason, VerifierError};

/// Internal domain errors.
#[derive(thiserror::Error, Debug)]
pub enum DomainError {
    #[error("login rejected: {0}")]
    Rejected(RejectionReason),

    #[error("account directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("credential verification failed: {0}")]
    Verification(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Reason code when this is a rejection.
    #[must_use]
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Self::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

impl From<RejectionReason> for DomainError {
    fn from(reason: RejectionReason) -> Self {
        Self::Rejected(reason)
    }
}

impl From<DirectoryError> for DomainError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Unavailable(msg) => Self::DirectoryUnavailable(msg),
            DirectoryError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<VerifierError> for DomainError {
    fn from(e: VerifierError) -> Self {
        Self::Verification(e.to_string())
    }
}

impl From<DomainError> for AuthNError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Rejected(_) => Self::Unauthorized,
            DomainError::DirectoryUnavailable(reason) => Self::ServiceUnavailable(reason),
            // Verifier details can reveal that the account exists.
            DomainError::Verification(_) => {
                Self::Internal("credential verification failed".to_owned())
            }
            DomainError::Internal(reason) => Self::Internal(reason),
        }
    }
}
