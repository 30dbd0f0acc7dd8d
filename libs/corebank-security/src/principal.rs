use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

use crate::account::{Account, AccountRef, AccountStatus, Role};
use crate::adapter::derive_authorities;
use crate::authority::Authority;

/// `Principal` is the request-scoped authentication context derived from an [`Account`].
///
/// Built by [`crate::build_principal`] and discarded when the request or
/// session ends. Authorities are fixed at construction: when the account's
/// roles change a new principal has to be built (see [`Principal::is_stale`]).
#[derive(Debug, Clone)]
pub struct Principal {
    username: String,
    /// Hash copied from the account for the credential verifier. Never serialized.
    password_hash: SecretString,
    first_name: String,
    last_name: String,
    /// One label per granted role, sorted by canonical role name.
    authorities: Vec<Authority>,
    /// Status flags as they were when the principal was built.
    status: AccountStatus,
    account_ref: AccountRef,
}

impl Principal {
    pub(crate) fn new(account: &Account, authorities: Vec<Authority>) -> Self {
        Self {
            username: account.username().to_owned(),
            password_hash: account.password_hash().clone(),
            first_name: account.first_name().to_owned(),
            last_name: account.last_name().to_owned(),
            authorities,
            status: account.status().clone(),
            account_ref: account.account_ref(),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password_hash(&self) -> &SecretString {
        &self.password_hash
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// First and last name joined, or the username when both are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{first} {last}"),
            (false, true) => first.to_owned(),
            (true, false) => last.to_owned(),
            (true, true) => self.username.clone(),
        }
    }

    #[must_use]
    pub fn authorities(&self) -> &[Authority] {
        &self.authorities
    }

    #[must_use]
    pub fn status(&self) -> &AccountStatus {
        &self.status
    }

    /// Reference used to re-fetch the originating account.
    #[must_use]
    pub fn account_ref(&self) -> &AccountRef {
        &self.account_ref
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.status.enabled
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.status.locked
    }

    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status.is_expired_at(now)
    }

    #[must_use]
    pub fn credentials_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.status.credentials_expired_at(now)
    }

    /// Roles recovered from the authority labels.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.authorities.iter().filter_map(Authority::role)
    }

    #[must_use]
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.iter().any(|a| a == authority)
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.authorities.contains(&Authority::for_role(role))
    }

    /// Whether this principal no longer reflects `current`.
    ///
    /// True when the account's roles, status or credential hash changed since
    /// the principal was built, or when `current` is a different account.
    #[must_use]
    pub fn is_stale(&self, current: &Account) -> bool {
        if current.username() != self.username {
            return true;
        }
        derive_authorities(current) != self.authorities
            || current.status() != &self.status
            || !secrets_equal(current.password_hash(), &self.password_hash)
    }

    /// Whether `other` was built from the same credential hash.
    ///
    /// Compares in constant time.
    #[must_use]
    pub fn has_same_credentials(&self, other: &Principal) -> bool {
        secrets_equal(&self.password_hash, &other.password_hash)
    }
}

fn secrets_equal(a: &SecretString, b: &SecretString) -> bool {
    a.expose_secret()
        .as_bytes()
        .ct_eq(b.expose_secret().as_bytes())
        .into()
}
