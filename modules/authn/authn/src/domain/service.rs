//! Login pipeline.

use std::sync::Arc;

use authn_sdk::details::{check_after_authentication, check_before_authentication};
use authn_sdk::{
    AccountDirectory, AuthenticationResult, CredentialVerifier, LoginRequest, PrincipalDetails,
    RejectionReason,
};
use corebank_security::{Principal, build_principal};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};

use super::DomainError;

/// `AuthN` service.
///
/// Turns a [`LoginRequest`] into a [`Principal`]:
/// 1. Look the account up by username
/// 2. Adapt it to a principal (invalid accounts are rejected here)
/// 3. Pre-authentication status checks: locked, disabled, expired
/// 4. Verify the password against the stored hash
/// 5. Post-authentication check: credentials expired
///
/// Every rejection is logged with its reason code and returned as
/// [`DomainError::Rejected`]. Once the username is known, each path spends
/// one verifier call (against the decoy hash when the account is unknown or
/// invalid).
pub struct Service {
    directory: Arc<dyn AccountDirectory>,
    verifier: Arc<dyn CredentialVerifier>,
    /// Hash verified against when the account is unknown or invalid.
    decoy_hash: Option<SecretString>,
}

impl Service {
    #[must_use]
    pub fn new(directory: Arc<dyn AccountDirectory>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            directory,
            verifier,
            decoy_hash: None,
        }
    }

    #[must_use]
    pub fn with_decoy_hash(mut self, hash: SecretString) -> Self {
        self.decoy_hash = Some(hash);
        self
    }

    /// Authenticate a username/password pair.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Rejected`] for any refused login
    /// - [`DomainError::DirectoryUnavailable`] / [`DomainError::Internal`] if the lookup failed
    /// - [`DomainError::Verification`] if the verifier failed
    #[tracing::instrument(skip_all, fields(username = %request.username))]
    pub async fn authenticate(
        &self,
        request: &LoginRequest,
    ) -> Result<AuthenticationResult, DomainError> {
        let principal = self
            .login(request)
            .await
            .inspect_err(|e| log_rejection("authenticate", &request.username, e))?;

        info!(
            authorities = principal.authorities().len(),
            "login succeeded"
        );
        Ok(AuthenticationResult { principal })
    }

    /// Rebuild `principal` from the current state of its account.
    ///
    /// A principal whose credential hash was rotated since login is rejected
    /// as [`RejectionReason::CredentialsExpired`].
    ///
    /// # Errors
    ///
    /// - [`DomainError::Rejected`] if the account is gone, fails a status check
    ///   or its credential hash changed
    /// - [`DomainError::DirectoryUnavailable`] / [`DomainError::Internal`] if the lookup failed
    #[tracing::instrument(skip_all, fields(username = %principal.username()))]
    pub async fn refresh(&self, principal: &Principal) -> Result<Principal, DomainError> {
        let username = principal.account_ref().username();
        let refreshed = self
            .rebuild(username)
            .await
            .and_then(|refreshed| {
                if refreshed.has_same_credentials(principal) {
                    Ok(refreshed)
                } else {
                    debug!("credential hash rotated since login");
                    Err(RejectionReason::CredentialsExpired.into())
                }
            })
            .inspect_err(|e| log_rejection("refresh", username, e))?;

        if refreshed.authorities() == principal.authorities() {
            debug!("principal refreshed without authority changes");
        } else {
            info!(
                before = principal.authorities().len(),
                after = refreshed.authorities().len(),
                "principal authorities changed since login"
            );
        }
        Ok(refreshed)
    }

    async fn login(&self, request: &LoginRequest) -> Result<Principal, DomainError> {
        if request.username.trim().is_empty() || request.password.expose_secret().is_empty() {
            return Err(RejectionReason::BadCredentials.into());
        }

        let Some(account) = self.directory.find_by_username(&request.username).await? else {
            self.spend_decoy_verification(&request.password).await;
            return Err(RejectionReason::UnknownAccount.into());
        };

        let principal = match build_principal(&account) {
            Ok(principal) => principal,
            Err(e) => {
                warn!(error = %e, "stored account is invalid");
                self.spend_decoy_verification(&request.password).await;
                return Err(RejectionReason::InvalidAccount.into());
            }
        };

        // Every rejection past the lookup costs exactly one verification.
        let details = PrincipalDetails::new(&principal);
        if let Err(reason) = check_before_authentication(&details) {
            self.spend_verification(&request.password, principal.password_hash())
                .await;
            return Err(reason.into());
        }

        if !self
            .verifier
            .verify(&request.password, principal.password_hash())
            .await?
        {
            return Err(RejectionReason::BadCredentials.into());
        }

        check_after_authentication(&details)?;
        Ok(principal)
    }

    async fn rebuild(&self, username: &str) -> Result<Principal, DomainError> {
        let account = self
            .directory
            .find_by_username(username)
            .await?
            .ok_or(RejectionReason::UnknownAccount)?;

        let principal = build_principal(&account).map_err(|e| {
            warn!(error = %e, "stored account is invalid");
            RejectionReason::InvalidAccount
        })?;

        let details = PrincipalDetails::new(&principal);
        check_before_authentication(&details)?;
        check_after_authentication(&details)?;
        Ok(principal)
    }

    async fn spend_decoy_verification(&self, password: &SecretString) {
        if let Some(decoy) = &self.decoy_hash {
            self.spend_verification(password, decoy).await;
        }
    }

    /// Run a verification whose outcome is discarded.
    async fn spend_verification(&self, password: &SecretString, hash: &SecretString) {
        if let Err(e) = self.verifier.verify(password, hash).await {
            debug!(error = %e, "discarded verification failed");
        }
    }
}

fn log_rejection(operation: &str, username: &str, e: &DomainError) {
    if let Some(reason) = e.rejection() {
        warn!(operation, username, reason = reason.code(), "login rejected");
    }
}
