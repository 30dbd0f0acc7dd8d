#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Core banking security primitives.
//!
//! - [`Account`] - the stored identity record, owned by persistence
//! - [`build_principal`] - the pure `Account` to [`Principal`] adapter
//! - [`Principal`] - request-scoped identity with derived [`Authority`] labels
//! - [`require_any_role`] / [`require_authority`] - access checks over a principal
pub mod access;
pub mod account;
pub mod adapter;
pub mod authority;
pub mod principal;

pub use access::{AccessDenied, require_any_role, require_authority};
pub use account::{Account, AccountBuilder, AccountRef, AccountStatus, ParseRoleError, Role};
pub use adapter::{InvalidAccountError, MAX_USERNAME_LEN, build_principal};
pub use authority::{Authority, ROLE_PREFIX};
pub use principal::Principal;
