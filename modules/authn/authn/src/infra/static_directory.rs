//! In-memory account directory seeded from configuration.

use std::collections::HashMap;

use async_trait::async_trait;
use authn_sdk::{AccountDirectory, DirectoryError};
use corebank_security::{Account, build_principal};
use tracing::warn;

use crate::config::AccountConfig;

/// Static username-to-account mapping for development and testing.
///
/// Lookups are exact and case-sensitive. The mapping never changes after
/// construction.
pub struct StaticAccountDirectory {
    accounts: HashMap<String, Account>,
}

impl StaticAccountDirectory {
    /// Build the directory from configured accounts.
    ///
    /// Accounts without a username cannot be looked up and are skipped.
    /// Accounts that would fail validation are kept (logins against them are
    /// rejected as invalid) but reported.
    ///
    /// # Errors
    ///
    /// Returns an error if two accounts share a username.
    pub fn from_config(accounts: &[AccountConfig]) -> anyhow::Result<Self> {
        Self::from_accounts(accounts.iter().map(AccountConfig::to_account))
    }

    /// # Errors
    ///
    /// Returns an error if two accounts share a username.
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> anyhow::Result<Self> {
        let mut map = HashMap::new();
        for account in accounts {
            if account.username().is_empty() {
                warn!("skipping configured account without username");
                continue;
            }
            if let Err(e) = build_principal(&account) {
                warn!(
                    username = account.username(),
                    error = %e,
                    "configured account will be rejected at login"
                );
            }
            let username = account.username().to_owned();
            anyhow::ensure!(
                !map.contains_key(&username),
                "duplicate account username '{username}'"
            );
            map.insert(username, account);
        }
        Ok(Self { accounts: map })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountDirectory for StaticAccountDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DirectoryError> {
        Ok(self.accounts.get(username).cloned())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use corebank_security::Role;

    use super::*;

    fn config(username: Option<&str>) -> AccountConfig {
        AccountConfig {
            username: username.map(str::to_owned),
            password_hash: Some("$argon2id$v=19$m=4096,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_owned()),
            roles: vec![Role::Customer],
            ..AccountConfig::default()
        }
    }

    #[tokio::test]
    async fn finds_configured_accounts_exactly() {
        let directory =
            StaticAccountDirectory::from_config(&[config(Some("alice")), config(Some("bob"))])
                .unwrap();

        assert_eq!(directory.len(), 2);
        let alice = directory.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(alice.username(), "alice");
        assert!(directory.find_by_username("Alice").await.unwrap().is_none());
    }

    #[test]
    fn accounts_without_username_are_skipped() {
        let directory = StaticAccountDirectory::from_config(&[config(None)]).unwrap();
        assert!(directory.is_empty());
    }

    #[test]
    fn duplicate_usernames_are_rejected() {
        let err = StaticAccountDirectory::from_config(&[config(Some("alice")), config(Some("alice"))])
            .err()
            .unwrap();
        assert!(err.to_string().contains("duplicate account username 'alice'"));
    }
}
