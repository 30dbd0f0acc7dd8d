//! Argon2id credential hashing and verification.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use authn_sdk::{CredentialVerifier, VerifierError};
use rand::rngs::OsRng;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::config::Argon2Config;

/// [`CredentialVerifier`] over PHC-format Argon2 hashes.
///
/// Verification reads the parameters embedded in each stored hash; the
/// configured parameters only apply to [`Argon2Verifier::hash_password`].
#[derive(Clone)]
pub struct Argon2Verifier {
    argon2: Argon2<'static>,
}

impl Argon2Verifier {
    /// # Errors
    ///
    /// Returns [`VerifierError::Internal`] if the cost parameters are out of range.
    pub fn new(cfg: &Argon2Config) -> Result<Self, VerifierError> {
        let params = Params::new(
            cfg.memory_cost,
            cfg.time_cost,
            cfg.parallelism,
            Some(cfg.output_len),
        )
        .map_err(|e| VerifierError::Internal(format!("invalid argon2 parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash `password` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns [`VerifierError::Internal`] if hashing fails.
    pub fn hash_password(&self, password: &SecretString) -> Result<String, VerifierError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.expose_secret().as_bytes(), &salt)
            .map_err(|e| VerifierError::Internal(format!("failed to hash password: {e}")))?;
        Ok(hash.to_string())
    }

    fn verify_blocking(&self, password: &SecretString, hash: &SecretString) -> Result<bool, VerifierError> {
        let parsed = PasswordHash::new(hash.expose_secret())
            .map_err(|e| VerifierError::MalformedHash(e.to_string()))?;

        match self
            .argon2
            .verify_password(password.expose_secret().as_bytes(), &parsed)
        {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("password does not match stored hash");
                Ok(false)
            }
            Err(e) => Err(VerifierError::Internal(e.to_string())),
        }
    }
}

#[async_trait]
impl CredentialVerifier for Argon2Verifier {
    async fn verify(
        &self,
        password: &SecretString,
        hash: &SecretString,
    ) -> Result<bool, VerifierError> {
        let verifier = self.clone();
        let password = password.clone();
        let hash = hash.clone();

        // CPU-bound; run on the blocking pool.
        tokio::task::spawn_blocking(move || verifier.verify_blocking(&password, &hash))
            .await
            .map_err(|e| VerifierError::Internal(format!("verification task failed: {e}")))?
    }
}
