//! Authority checks applied by endpoints after authentication.

use crate::account::Role;
use crate::principal::Principal;

/// The principal lacks the authority an operation requires.
///
/// Carries the missing requirement for server-side logging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessDenied {
    #[error("no required role granted to '{username}'")]
    MissingRole {
        username: String,
        required: Vec<Role>,
    },

    #[error("authority '{required}' not granted to '{username}'")]
    MissingAuthority { username: String, required: String },
}

/// Require that `principal` holds at least one of `required`.
///
/// An empty requirement list grants nothing and is always denied.
///
/// # Errors
///
/// Returns [`AccessDenied::MissingRole`] when no required role is held.
pub fn require_any_role(principal: &Principal, required: &[Role]) -> Result<(), AccessDenied> {
    if required.iter().any(|role| principal.has_role(*role)) {
        return Ok(());
    }
    Err(AccessDenied::MissingRole {
        username: principal.username().to_owned(),
        required: required.to_vec(),
    })
}

/// Require that `principal` holds the authority label `required`.
///
/// # Errors
///
/// Returns [`AccessDenied::MissingAuthority`] when the label is not held.
pub fn require_authority(principal: &Principal, required: &str) -> Result<(), AccessDenied> {
    if principal.has_authority(required) {
        return Ok(());
    }
    Err(AccessDenied::MissingAuthority {
        username: principal.username().to_owned(),
        required: required.to_owned(),
    })
}
