//! Collaborator traits the `AuthN` module delegates to.
//!
//! Account persistence and password hashing live outside this workspace.
//! Implementations are handed to the module at construction time.

use async_trait::async_trait;
use corebank_security::Account;
use secrecy::SecretString;
use thiserror::Error;

/// Failure of the account directory itself (not "account not found").
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The backing store could not be reached.
    #[error("account directory unavailable: {0}")]
    Unavailable(String),

    /// Any other failure.
    #[error("account directory error: {0}")]
    Internal(String),
}

/// Failure of the credential verifier itself (not "password mismatch").
#[derive(Debug, Error)]
pub enum VerifierError {
    /// The stored hash could not be parsed.
    #[error("malformed credential hash: {0}")]
    MalformedHash(String),

    #[error("credential verification error: {0}")]
    Internal(String),
}

/// Lookup of stored accounts keyed by username.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Fetch the account for `username`.
    ///
    /// Returns `Ok(None)` if no such account exists.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] if the lookup itself failed.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DirectoryError>;
}

/// Comparison of a presented password against a stored credential hash.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Whether `password` matches `hash`.
    ///
    /// # Errors
    ///
    /// Returns [`VerifierError`] if the hash is malformed or verification failed
    /// for a reason other than a mismatch.
    async fn verify(
        &self,
        password: &SecretString,
        hash: &SecretString,
    ) -> Result<bool, VerifierError>;
}
