//! Account to principal adapter.
//!
//! [`build_principal`] is a pure transform: it borrows the account, never
//! mutates it, and performs no I/O. Validation happens up front so a
//! malformed account never yields a principal.

use secrecy::ExposeSecret;

use crate::account::{Account, Role};
use crate::authority::Authority;
use crate::principal::Principal;

/// Upper bound on username length, in bytes.
pub const MAX_USERNAME_LEN: usize = 255;

/// A required account field is missing or malformed.
///
/// Messages are for server-side logs only; callers facing end users must
/// answer with a generic authentication failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAccountError {
    #[error("account has no username")]
    MissingUsername,

    #[error("account username is malformed: {reason}")]
    MalformedUsername { reason: &'static str },

    #[error("account '{username}' has no credential hash")]
    MissingCredentialHash { username: String },
}

/// Build the principal for `account`.
///
/// The principal carries one authority per role, `ROLE_` followed by the
/// role's canonical name, sorted by that name. An account without roles
/// yields a principal with no authorities.
///
/// # Errors
///
/// Returns [`InvalidAccountError`] if the username is blank, longer than
/// [`MAX_USERNAME_LEN`] or contains whitespace or control characters, or if
/// the credential hash is blank.
pub fn build_principal(account: &Account) -> Result<Principal, InvalidAccountError> {
    validate(account)?;
    Ok(Principal::new(account, derive_authorities(account)))
}

pub(crate) fn derive_authorities(account: &Account) -> Vec<Authority> {
    let mut roles: Vec<Role> = account.roles().iter().copied().collect();
    roles.sort_by_key(|role| role.as_str());
    roles.into_iter().map(Authority::for_role).collect()
}

fn validate(account: &Account) -> Result<(), InvalidAccountError> {
    let username = account.username();
    if username.is_empty() {
        return Err(InvalidAccountError::MissingUsername);
    }
    if username.len() > MAX_USERNAME_LEN {
        return Err(InvalidAccountError::MalformedUsername {
            reason: "too long",
        });
    }
    if username.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(InvalidAccountError::MalformedUsername {
            reason: "contains whitespace or control characters",
        });
    }
    if account.password_hash().expose_secret().trim().is_empty() {
        return Err(InvalidAccountError::MissingCredentialHash {
            username: username.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn base() -> crate::account::AccountBuilder {
        Account::builder().username("ada").password_hash("$argon2id$v=19$abc")
    }

    #[test]
    fn authorities_are_sorted_by_role_name() {
        let account = base().roles([Role::Teller, Role::Admin, Role::Customer]).build();
        let principal = build_principal(&account).unwrap();

        let labels: Vec<&str> = principal.authorities().iter().map(Authority::as_str).collect();
        assert_eq!(labels, ["ROLE_ADMIN", "ROLE_CUSTOMER", "ROLE_TELLER"]);
    }

    #[test]
    fn blank_username_is_missing() {
        let account = Account::builder().password_hash("hash").build();
        assert_eq!(
            build_principal(&account).unwrap_err(),
            InvalidAccountError::MissingUsername
        );
    }

    #[test]
    fn whitespace_in_username_is_malformed() {
        let account = base().username("ada lovelace").build();
        assert!(matches!(
            build_principal(&account),
            Err(InvalidAccountError::MalformedUsername { .. })
        ));
    }

    #[test]
    fn overlong_username_is_malformed() {
        let account = base().username("a".repeat(MAX_USERNAME_LEN + 1)).build();
        assert_eq!(
            build_principal(&account).unwrap_err(),
            InvalidAccountError::MalformedUsername { reason: "too long" }
        );
    }

    #[test]
    fn username_at_limit_is_accepted() {
        let account = base().username("a".repeat(MAX_USERNAME_LEN)).build();
        assert!(build_principal(&account).is_ok());
    }

    #[test]
    fn blank_hash_is_missing_credential() {
        let account = Account::builder().username("ada").password_hash("   ").build();
        assert_eq!(
            build_principal(&account).unwrap_err(),
            InvalidAccountError::MissingCredentialHash {
                username: "ada".to_owned()
            }
        );
    }
}
