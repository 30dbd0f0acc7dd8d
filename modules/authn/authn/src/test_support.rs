#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use authn_sdk::{AccountDirectory, CredentialVerifier, DirectoryError, VerifierError};
use corebank_security::Account;
use secrecy::{ExposeSecret, SecretString};

const PLAIN_PREFIX: &str = "plain$";

/// Stored "hash" understood by [`PlainVerifier`].
#[must_use]
pub fn plain_hash(password: &str) -> String {
    format!("{PLAIN_PREFIX}{password}")
}

/// Verifier comparing against [`plain_hash`] values, counting calls.
#[derive(Default)]
pub struct PlainVerifier {
    calls: AtomicUsize,
}

impl PlainVerifier {
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialVerifier for PlainVerifier {
    async fn verify(
        &self,
        password: &SecretString,
        hash: &SecretString,
    ) -> Result<bool, VerifierError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let stored = hash
            .expose_secret()
            .strip_prefix(PLAIN_PREFIX)
            .ok_or_else(|| VerifierError::MalformedHash("missing plain$ prefix".to_owned()))?;
        Ok(stored == password.expose_secret())
    }
}

/// Mutable in-memory directory, for tests that change accounts mid-session.
pub struct SharedDirectory {
    accounts: Mutex<HashMap<String, Account>>,
}

impl SharedDirectory {
    #[must_use]
    pub fn new(accounts: Vec<Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|a| (a.username().to_owned(), a))
            .collect();
        Self {
            accounts: Mutex::new(accounts),
        }
    }

    pub fn upsert(&self, account: Account) {
        self.accounts
            .lock()
            .unwrap()
            .insert(account.username().to_owned(), account);
    }

    pub fn remove(&self, username: &str) {
        self.accounts.lock().unwrap().remove(username);
    }
}

#[async_trait]
impl AccountDirectory for SharedDirectory {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, DirectoryError> {
        Ok(self.accounts.lock().unwrap().get(username).cloned())
    }
}

/// Directory whose backing store is always down.
pub struct FailingDirectory;

#[async_trait]
impl AccountDirectory for FailingDirectory {
    async fn find_by_username(&self, _username: &str) -> Result<Option<Account>, DirectoryError> {
        Err(DirectoryError::Unavailable("connection refused".to_owned()))
    }
}
