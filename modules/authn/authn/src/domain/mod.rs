//! Domain layer for the `AuthN` module.

pub mod error;
pub mod local_client;
pub mod service;

pub use error::DomainError;
pub use local_client::AuthNLocalClient;
pub use service::Service;
