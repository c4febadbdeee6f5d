use chrono::Utc;
use gdrive_core::client::{GoogleClientConfig, GoogleHttpClient};
use gdrive_core::error::ClientError;
use gdrive_core::store::CredentialStore;
use tracing::{info, warn};

use crate::config::GdriveConfig;

/// Builds the Google API client, authorized with the stored access token when
/// one is available.
///
/// A missing or unreadable credentials file is not fatal: the server still
/// starts and tools report authentication errors until it is restarted with
/// valid credentials.
pub async fn build_client(
    config: &GdriveConfig,
    credentials: &CredentialStore,
) -> Result<GoogleHttpClient, ClientError> {
    let path = credentials.path().display();
    let access_token = match credentials.load().await {
        Ok(Some(stored)) => {
            if stored.is_expired(Utc::now()) {
                warn!(%path, "stored access token has expired; re-authenticate and restart");
            }
            let token = stored.access_token.filter(|token| !token.trim().is_empty());
            if token.is_none() {
                warn!(%path, "credentials file has no access token");
            }
            token
        }
        Ok(None) => {
            warn!(%path, "no stored credentials found; Google API calls will be unauthorized");
            None
        }
        Err(err) => {
            warn!(%path, error = %err, "failed to read stored credentials");
            None
        }
    };

    let client = GoogleHttpClient::new(
        GoogleClientConfig::new()
            .with_drive_api_base(config.drive_api_base.as_str())
            .with_sheets_api_base(config.sheets_api_base.as_str())
            .with_timeout(config.request_timeout)
            .with_access_token(access_token),
    )?;
    info!(authorized = client.has_access_token(), "google api client ready");
    Ok(client)
}
