use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Enumerated permission category granted to an account.
///
/// The canonical name is the uppercase identifier (`ADMIN`, `CUSTOMER`, `TELLER`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Customer,
    Teller,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Customer, Role::Teller];

    /// Canonical uppercase name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Customer => "CUSTOMER",
            Role::Teller => "TELLER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| ParseRoleError(s.to_owned()))
    }
}

/// Live status flags of an account.
///
/// A freshly created account is enabled, unlocked and never expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountStatus {
    pub enabled: bool,
    pub locked: bool,
    /// Instant from which the account itself is expired.
    pub expires_at: Option<DateTime<Utc>>,
    /// Instant from which the stored credentials must be renewed.
    pub credentials_expire_at: Option<DateTime<Utc>>,
}

impl Default for AccountStatus {
    fn default() -> Self {
        Self {
            enabled: true,
            locked: false,
            expires_at: None,
            credentials_expire_at: None,
        }
    }
}

impl AccountStatus {
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    #[must_use]
    pub fn credentials_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.credentials_expire_at.is_some_and(|at| at <= now)
    }
}

/// Non-owning reference back to the account a principal was derived from.
///
/// Resolve it through the account directory to obtain current account data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountRef(String);

impl AccountRef {
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored identity record, owned by the persistence layer.
///
/// Built with [`Account::builder`]. Missing fields are left blank and are
/// rejected later by [`crate::build_principal`].
#[derive(Debug, Clone)]
pub struct Account {
    username: String,
    /// Never compared in plaintext. `Debug` redacts it.
    password_hash: SecretString,
    first_name: String,
    last_name: String,
    roles: BTreeSet<Role>,
    status: AccountStatus,
}

impl Account {
    #[must_use]
    pub fn builder() -> AccountBuilder {
        AccountBuilder::default()
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

    #[must_use]
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    #[must_use]
    pub fn status(&self) -> &AccountStatus {
        &self.status
    }

    #[must_use]
    pub fn account_ref(&self) -> AccountRef {
        AccountRef::new(self.username.clone())
    }
}

#[derive(Default)]
pub struct AccountBuilder {
    username: Option<String>,
    password_hash: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    roles: BTreeSet<Role>,
    status: AccountStatus,
}

impl AccountBuilder {
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn password_hash(mut self, hash: impl Into<String>) -> Self {
        self.password_hash = Some(hash.into());
        self
    }

    #[must_use]
    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    #[must_use]
    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    #[must_use]
    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    #[must_use]
    pub fn status(mut self, status: AccountStatus) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.status.enabled = enabled;
        self
    }

    #[must_use]
    pub fn locked(mut self, locked: bool) -> Self {
        self.status.locked = locked;
        self
    }

    #[must_use]
    pub fn expires_at(mut self, at: DateTime<Utc>) -> Self {
        self.status.expires_at = Some(at);
        self
    }

    #[must_use]
    pub fn credentials_expire_at(mut self, at: DateTime<Utc>) -> Self {
        self.status.credentials_expire_at = Some(at);
        self
    }

    #[must_use]
    pub fn build(self) -> Account {
        Account {
            username: self.username.unwrap_or_default(),
            password_hash: SecretString::from(self.password_hash.unwrap_or_default()),
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            roles: self.roles,
            status: self.status,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use chrono::{Duration, TimeZone};
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn role_parses_canonical_names_only() {
        assert_eq!("ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("TELLER".parse::<Role>(), Ok(Role::Teller));
        assert_eq!(
            "admin".parse::<Role>(),
            Err(ParseRoleError("admin".to_owned()))
        );
    }

    #[test]
    fn role_serializes_as_canonical_name() {
        let json = serde_json::to_string(&Role::Customer).unwrap();
        assert_eq!(json, "\"CUSTOMER\"");
        let back: Role = serde_json::from_str("\"TELLER\"").unwrap();
        assert_eq!(back, Role::Teller);
    }

    #[test]
    fn builder_defaults_leave_fields_blank() {
        let account = Account::builder().build();

        assert!(account.username().is_empty());
        assert!(account.password_hash().expose_secret().is_empty());
        assert!(account.roles().is_empty());
        assert_eq!(account.status(), &AccountStatus::default());
    }

    #[test]
    fn builder_collapses_duplicate_roles() {
        let account = Account::builder()
            .role(Role::Admin)
            .role(Role::Admin)
            .role(Role::Teller)
            .build();

        assert_eq!(account.roles().len(), 2);
    }

    #[test]
    #[allow(clippy::use_debug)] // asserting on the Debug rendering itself
    fn debug_output_redacts_password_hash() {
        let account = Account::builder()
            .username("alice")
            .password_hash("$argon2id$secret-material")
            .build();

        let rendered = format!("{account:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("secret-material"));
    }

    #[test]
    fn expiry_is_inclusive_of_the_boundary() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let status = AccountStatus {
            expires_at: Some(at),
            credentials_expire_at: Some(at + Duration::days(1)),
            ..AccountStatus::default()
        };

        assert!(!status.is_expired_at(at - Duration::seconds(1)));
        assert!(status.is_expired_at(at));
        assert!(!status.credentials_expired_at(at));
        assert!(status.credentials_expired_at(at + Duration::days(2)));
    }

    #[test]
    fn status_deserializes_with_defaults() {
        let status: AccountStatus = serde_json::from_str(r#"{"locked":true}"#).unwrap();
        assert!(status.enabled);
        assert!(status.locked);
        assert!(status.expires_at.is_none());
    }
}
