//! Collaborator implementations shipped with the module.

pub mod argon2_verifier;
pub mod static_directory;

pub use argon2_verifier::Argon2Verifier;
pub use static_directory::StaticAccountDirectory;
