//! `AuthN` module wiring.

use std::sync::Arc;

use authn_sdk::{AccountDirectory, AuthNClient, CredentialVerifier};
use secrecy::SecretString;
use tracing::{info, warn};

use crate::config::AuthNConfig;
use crate::domain::{AuthNLocalClient, Service};
use crate::infra::{Argon2Verifier, StaticAccountDirectory};

/// `AuthN` module.
///
/// This module:
/// 1. Builds the account directory and credential verifier
/// 2. Prepares the decoy hash used for unknown usernames
/// 3. Hands out an [`AuthNClient`] backed by the login service
pub struct AuthNModule {
    service: Arc<Service>,
}

impl AuthNModule {
    /// Build the module from configuration, serving the configured accounts
    /// from a [`StaticAccountDirectory`] and verifying with Argon2id.
    ///
    /// # Errors
    ///
    /// Returns an error if the Argon2 parameters are invalid or the
    /// configured accounts cannot be loaded.
    #[tracing::instrument(skip_all, fields(accounts = cfg.accounts.len()))]
    pub fn from_config(cfg: &AuthNConfig) -> anyhow::Result<Self> {
        info!("Initializing authn");

        let verifier = Argon2Verifier::new(&cfg.argon2)?;
        let decoy_hash = verifier.hash_password(&SecretString::from("decoy-password".to_owned()))?;

        let directory = StaticAccountDirectory::from_config(&cfg.accounts)?;
        if !directory.is_empty() {
            warn!(
                "Static account directory is in use; accounts are read from configuration. \
                 Do NOT use this directory in production."
            );
        }

        info!(
            memory_cost = cfg.argon2.memory_cost,
            time_cost = cfg.argon2.time_cost,
            parallelism = cfg.argon2.parallelism,
            account_count = directory.len(),
            "Loaded authn configuration"
        );

        let service = Service::new(Arc::new(directory), Arc::new(verifier))
            .with_decoy_hash(SecretString::from(decoy_hash));
        Ok(Self::from_service(service))
    }

    /// Build the module over externally provided collaborators.
    ///
    /// No decoy hash is configured; use [`Self::from_service`] to supply one.
    #[must_use]
    pub fn with_collaborators(
        directory: Arc<dyn AccountDirectory>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self::from_service(Service::new(directory, verifier))
    }

    #[must_use]
    pub fn from_service(service: Service) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    #[must_use]
    pub fn client(&self) -> Arc<dyn AuthNClient> {
        Arc::new(AuthNLocalClient::new(self.service.clone()))
    }
}
