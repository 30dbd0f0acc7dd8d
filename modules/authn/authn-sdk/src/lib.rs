//! `AuthN` SDK
//!
//! This crate provides the public API for the `authn` module:
//!
//! - [`AuthNClient`] - Public API trait for consumers (login and refresh)
//! - [`AccountDirectory`] / [`CredentialVerifier`] - Collaborator traits the module delegates to
//! - [`LoginRequest`] / [`AuthenticationResult`] - Request and result models
//! - [`RejectionReason`] - Reason codes for rejected logins, for logs only
//! - [`AuthNError`] - Error types
//! - [`UserDetails`] / [`PrincipalDetails`] - Security-middleware boundary
//!
//! ## Usage
//!
//! ```ignore
//! use authn_sdk::{AuthNClient, LoginRequest};
//!
//! let result = authn.authenticate(&LoginRequest::new("alice", "s3cret")).await?;
//! let principal = result.principal;
//! ```

pub mod api;
pub mod details;
pub mod error;
pub mod models;
pub mod plugin_api;

// Re-export main types at crate root
pub use api::AuthNClient;
pub use details::{
    PrincipalDetails, UserDetails, check_after_authentication, check_before_authentication,
};
pub use error::AuthNError;
pub use models::{AuthenticationResult, LoginRequest, RejectionReason};
pub use plugin_api::{AccountDirectory, CredentialVerifier, DirectoryError, VerifierError};
