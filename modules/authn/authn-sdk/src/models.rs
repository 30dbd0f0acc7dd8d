//! Domain models for the `AuthN` module.

use std::fmt;

use corebank_security::Principal;
use secrecy::SecretString;

/// Username/password pair presented at login.
///
/// The password is wrapped in `SecretString` so `Debug` redacts it.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

impl LoginRequest {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Result of a successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// The principal derived from the authenticated account.
    ///
    /// Request-scoped: attach it to the session and drop it with the session.
    pub principal: Principal,
}

/// Why a login or refresh was rejected.
///
/// Reason codes go to server-side logs. Callers only ever see
/// [`crate::AuthNError::Unauthorized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// Password did not match, or username/password was blank.
    BadCredentials,
    /// No account with that username.
    UnknownAccount,
    /// The stored account is missing a required field.
    InvalidAccount,
    AccountLocked,
    AccountDisabled,
    AccountExpired,
    CredentialsExpired,
}

impl RejectionReason {
    /// Stable code for structured logs.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::BadCredentials => "bad_credentials",
            Self::UnknownAccount => "unknown_account",
            Self::InvalidAccount => "invalid_account",
            Self::AccountLocked => "account_locked",
            Self::AccountDisabled => "account_disabled",
            Self::AccountExpired => "account_expired",
            Self::CredentialsExpired => "credentials_expired",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
