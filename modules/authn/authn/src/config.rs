//! Configuration for the `AuthN` module.

use std::path::Path;

use anyhow::Context;
use corebank_security::{Account, AccountStatus, Role};
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::Deserialize;

/// Prefix of environment variables overriding file configuration.
///
/// Nested keys are separated by `__`, e.g. `COREBANK_AUTHN_ARGON2__TIME_COST=2`.
pub const ENV_PREFIX: &str = "COREBANK_AUTHN_";

/// Module configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthNConfig {
    /// Argon2 parameters used for hashing new passwords.
    pub argon2: Argon2Config,

    /// Accounts served by the static in-memory directory.
    pub accounts: Vec<AccountConfig>,
}

impl AuthNConfig {
    /// Load configuration from an optional YAML file, then environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the merged
    /// configuration does not match the expected shape.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            anyhow::ensure!(path.is_file(), "config file {} not found", path.display());
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load authn configuration")
    }
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Argon2Config {
    /// Memory cost in KiB.
    pub memory_cost: u32,
    /// Number of iterations.
    pub time_cost: u32,
    pub parallelism: u32,
    /// Output hash length in bytes.
    pub output_len: usize,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost: 65_536,
            time_cost: 3,
            parallelism: 4,
            output_len: 32,
        }
    }
}

impl Argon2Config {
    /// Low-cost parameters for tests.
    #[must_use]
    pub fn testing() -> Self {
        Self {
            memory_cost: 4_096,
            time_cost: 1,
            parallelism: 1,
            output_len: 32,
        }
    }
}

/// A statically configured account.
///
/// Fields left out are left blank on the account; such accounts are
/// rejected at login as invalid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccountConfig {
    pub username: Option<String>,
    /// PHC-format password hash, as produced by `authn-cli hash-password`.
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub roles: Vec<Role>,
    pub status: AccountStatus,
}

impl AccountConfig {
    #[must_use]
    pub fn to_account(&self) -> Account {
        let mut builder = Account::builder()
            .roles(self.roles.iter().copied())
            .status(self.status.clone());
        if let Some(username) = &self.username {
            builder = builder.username(username.as_str());
        }
        if let Some(hash) = &self.password_hash {
            builder = builder.password_hash(hash.as_str());
        }
        if let Some(first_name) = &self.first_name {
            builder = builder.first_name(first_name.as_str());
        }
        if let Some(last_name) = &self.last_name {
            builder = builder.last_name(last_name.as_str());
        }
        builder.build()
    }
}
