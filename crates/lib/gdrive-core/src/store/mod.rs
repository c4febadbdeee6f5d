//! Local credential storage.
//!
//! The store layer locates, reads, and removes the single credentials file
//! written by the authentication flow.

pub mod credentials;

pub use credentials::{
    CREDENTIALS_FILE_NAME,
    CredentialStore,
    RemoveOutcome,
    StoredCredentials,
};
