use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::CredentialError;

/// File name of the credential artifact inside the credentials directory.
pub const CREDENTIALS_FILE_NAME: &str = ".gdrive-server-credentials.json";

/// OAuth token set persisted by the authentication flow.
///
/// Only `access_token` is consumed here; the remaining fields are kept so the
/// file can be inspected without loss.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
    /// Expiry as milliseconds since the Unix epoch.
    pub expiry_date: Option<i64>,
}

impl StoredCredentials {
    /// Whether the stored expiry lies at or before `now`. Unknown expiry is
    /// treated as still valid.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date
            .and_then(DateTime::from_timestamp_millis)
            .is_some_and(|expiry| expiry <= now)
    }
}

/// Result of a removal attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// Handle on the credential artifact. The path is fixed at construction.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Uses `path` as the credential artifact.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses [`CREDENTIALS_FILE_NAME`] inside `dir`.
    #[must_use]
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(CREDENTIALS_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored token set, or `None` when no artifact exists.
    ///
    /// # Errors
    /// Returns `CredentialError` if the file cannot be read or is not valid JSON.
    pub async fn load(&self) -> Result<Option<StoredCredentials>, CredentialError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Deletes the artifact. A missing artifact is reported, not failed.
    ///
    /// # Errors
    /// Returns `CredentialError::Io` for any filesystem failure other than
    /// the file being absent.
    pub async fn remove(&self) -> Result<RemoveOutcome, CredentialError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!(path = %self.path.display(), "removed stored credentials");
                Ok(RemoveOutcome::Removed)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(RemoveOutcome::NotFound),
            Err(err) => Err(err.into()),
        }
    }
}
