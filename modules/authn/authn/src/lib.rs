//! `AuthN` Module
//!
//! Logs users in: looks the account up in an [`AccountDirectory`], adapts it
//! to a principal, runs the account status checks, and verifies the
//! presented password with a [`CredentialVerifier`]. Also re-derives
//! principals for active sessions so role changes are picked up.
//!
//! Provides the [`authn_sdk::AuthNClient`] trait for consumption by session
//! middleware and other modules.
//!
//! ## Configuration
//!
//! ```yaml
//! argon2:
//!   memory_cost: 65536
//!   time_cost: 3
//!   parallelism: 4
//! accounts:
//!   - username: alice
//!     password_hash: "$argon2id$v=19$m=65536,t=3,p=4$..."
//!     first_name: Alice
//!     last_name: Ng
//!     roles: [ADMIN, CUSTOMER]
//!     status:
//!       locked: false
//!       credentials_expire_at: "2027-01-01T00:00:00Z"
//! ```
//!
//! [`AccountDirectory`]: authn_sdk::AccountDirectory
//! [`CredentialVerifier`]: authn_sdk::CredentialVerifier
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use module::AuthNModule;

#[cfg(test)]
mod test_support;
