//! Local (in-process) client for the `AuthN` module.

use std::sync::Arc;

use async_trait::async_trait;
use authn_sdk::{AuthNClient, AuthNError, AuthenticationResult, LoginRequest};
use corebank_security::Principal;

use super::{DomainError, Service};

/// Local client wrapping the service.
///
/// Handed out by [`crate::AuthNModule::client`].
pub struct AuthNLocalClient {
    svc: Arc<Service>,
}

impl AuthNLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> AuthNError {
    // Rejections are already logged with their reason code by the service.
    if e.rejection().is_none() {
        tracing::error!(operation = op, error = %e, "authn call failed");
    }
    e.into()
}

#[async_trait]
impl AuthNClient for AuthNLocalClient {
    async fn authenticate(
        &self,
        request: &LoginRequest,
    ) -> Result<AuthenticationResult, AuthNError> {
        self.svc
            .authenticate(request)
            .await
            .map_err(|e| log_and_convert("authenticate", e))
    }

    async fn refresh(&self, principal: &Principal) -> Result<Principal, AuthNError> {
        self.svc
            .refresh(principal)
            .await
            .map_err(|e| log_and_convert("refresh", e))
    }
}
