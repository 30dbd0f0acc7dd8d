//! Public API trait for the `AuthN` module.
//!
//! This trait defines the interface that consumers use to log users in and
//! to re-derive principals for active sessions.

use async_trait::async_trait;
use corebank_security::Principal;

use crate::error::AuthNError;
use crate::models::{AuthenticationResult, LoginRequest};

/// Public API trait for the `AuthN` module.
///
/// ```ignore
/// let result = authn.authenticate(&LoginRequest::new("alice", "s3cret")).await?;
///
/// // later, when the session is reused or the account's roles changed
/// let principal = authn.refresh(&result.principal).await?;
/// ```
///
/// # Security
///
/// Every rejected login surfaces as [`AuthNError::Unauthorized`] with the
/// same message. The reason is only logged.
#[async_trait]
pub trait AuthNClient: Send + Sync {
    /// Authenticate a username/password pair and return the principal.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the account is unknown, invalid, locked, disabled,
    ///   expired, or the credentials do not match or have expired
    /// - `ServiceUnavailable` if the account directory cannot be reached
    /// - `Internal` for unexpected errors
    async fn authenticate(&self, request: &LoginRequest)
    -> Result<AuthenticationResult, AuthNError>;

    /// Rebuild `principal` from the current state of its account.
    ///
    /// Status checks are re-run and the password is not asked for again. A
    /// credential hash rotated since login ends the session.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the account disappeared, no longer passes the
    ///   status checks or its credential hash changed
    /// - `ServiceUnavailable` if the account directory cannot be reached
    /// - `Internal` for unexpected errors
    async fn refresh(&self, principal: &Principal) -> Result<Principal, AuthNError>;
}
