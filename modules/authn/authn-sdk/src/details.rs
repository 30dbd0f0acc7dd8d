//! Security-middleware boundary.
//!
//! Session middleware expects a principal shaped as [`UserDetails`]: a
//! username, a password hash, authority labels and four status predicates.
//! [`PrincipalDetails`] adapts the domain [`Principal`] to that shape so the
//! domain type stays free of middleware naming.

use chrono::{DateTime, Utc};
use corebank_security::{Authority, Principal};
use secrecy::SecretString;

use crate::models::RejectionReason;

/// Principal shape consumed by session middleware.
pub trait UserDetails {
    fn username(&self) -> &str;

    fn password(&self) -> &SecretString;

    fn authorities(&self) -> &[Authority];

    fn is_account_non_expired(&self) -> bool;

    fn is_account_non_locked(&self) -> bool;

    fn is_credentials_non_expired(&self) -> bool;

    fn is_enabled(&self) -> bool;
}

/// [`UserDetails`] view over a [`Principal`], evaluated at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct PrincipalDetails<'a> {
    principal: &'a Principal,
    now: DateTime<Utc>,
}

impl<'a> PrincipalDetails<'a> {
    /// View evaluated at the current time.
    #[must_use]
    pub fn new(principal: &'a Principal) -> Self {
        Self::at(principal, Utc::now())
    }

    /// View evaluated at `now`. Expiry predicates compare against this instant.
    #[must_use]
    pub fn at(principal: &'a Principal, now: DateTime<Utc>) -> Self {
        Self { principal, now }
    }

    #[must_use]
    pub fn principal(&self) -> &'a Principal {
        self.principal
    }
}

impl UserDetails for PrincipalDetails<'_> {
    fn username(&self) -> &str {
        self.principal.username()
    }

    fn password(&self) -> &SecretString {
        self.principal.password_hash()
    }

    fn authorities(&self) -> &[Authority] {
        self.principal.authorities()
    }

    fn is_account_non_expired(&self) -> bool {
        !self.principal.is_expired_at(self.now)
    }

    fn is_account_non_locked(&self) -> bool {
        !self.principal.is_locked()
    }

    fn is_credentials_non_expired(&self) -> bool {
        !self.principal.credentials_expired_at(self.now)
    }

    fn is_enabled(&self) -> bool {
        self.principal.is_enabled()
    }
}

/// Checks run before the password is verified: locked, disabled, expired.
///
/// # Errors
///
/// Returns the first failing check as a [`RejectionReason`].
pub fn check_before_authentication(details: &dyn UserDetails) -> Result<(), RejectionReason> {
    if !details.is_account_non_locked() {
        return Err(RejectionReason::AccountLocked);
    }
    if !details.is_enabled() {
        return Err(RejectionReason::AccountDisabled);
    }
    if !details.is_account_non_expired() {
        return Err(RejectionReason::AccountExpired);
    }
    Ok(())
}

/// Check run after the password matched: credentials expired.
///
/// # Errors
///
/// Returns [`RejectionReason::CredentialsExpired`] if the credentials must be renewed.
pub fn check_after_authentication(details: &dyn UserDetails) -> Result<(), RejectionReason> {
    if !details.is_credentials_non_expired() {
        return Err(RejectionReason::CredentialsExpired);
    }
    Ok(())
}
