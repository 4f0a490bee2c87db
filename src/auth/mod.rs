//! User accounts, sessions and saved texts.

pub mod model;
pub mod store;

pub use store::CredentialStore;
