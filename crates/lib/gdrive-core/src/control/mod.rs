//! Control plane for the Drive, Sheets, and credential tools.
//!
//! Every operation returns a [`ToolResponse`](crate::envelope::ToolResponse);
//! failures are folded into error envelopes and never propagated.

use std::sync::Arc;

use crate::client::GoogleBackend;
use crate::store::CredentialStore;

pub mod auth;
pub mod cells;
pub mod search;

pub use cells::CellUpdateRequest;
pub use search::{DEFAULT_PAGE_SIZE, SearchRequest};

const UNKNOWN_ERROR: &str = "Unknown error occurred";

pub struct GdriveControlPlane<B: GoogleBackend> {
    backend: Arc<B>,
    credentials: CredentialStore,
}

impl<B: GoogleBackend> Clone for GdriveControlPlane<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            credentials: self.credentials.clone(),
        }
    }
}

impl<B: GoogleBackend> GdriveControlPlane<B> {
    #[must_use]
    pub fn new(backend: B, credentials: CredentialStore) -> Self {
        Self::from_arc(Arc::new(backend), credentials)
    }

    #[must_use]
    pub const fn from_arc(backend: Arc<B>, credentials: CredentialStore) -> Self {
        Self {
            backend,
            credentials,
        }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub const fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }
}

/// Falls back to `default` when the service reported no message.
fn or_default<'a>(message: &'a str, default: &'a str) -> &'a str {
    if message.trim().is_empty() {
        default
    } else {
        message
    }
}
