use serde::Serialize;
use tracing::warn;

use crate::client::GoogleBackend;
use crate::envelope::ToolResponse;
use crate::store::RemoveOutcome;

use super::GdriveControlPlane;

const REMOVED_MESSAGE: &str = "Google Drive credentials have been removed successfully.";
const RESTART_REQUIRED: &str = "IMPORTANT: You must restart your MCP client/agent for the changes to take effect. The next time you use Google Drive tools, you will be prompted to authenticate again.";
const NOT_FOUND_MESSAGE: &str = "No credentials file found to remove.";
const FAILED_MESSAGE: &str = "Failed to remove credentials file.";

/// JSON body reported by the deauthenticate tool.
#[derive(Debug, Serialize)]
struct DeauthReport<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    action_required: Option<&'a str>,
    credentials_path: String,
}

impl<B: GoogleBackend> GdriveControlPlane<B> {
    /// Removes the stored credentials file.
    ///
    /// A missing file is reported without an error flag; any other filesystem
    /// failure yields an error envelope.
    pub async fn deauthenticate(&self) -> ToolResponse {
        let credentials_path = self.credentials.path().display().to_string();
        let (report, is_error) = match self.credentials.remove().await {
            Ok(RemoveOutcome::Removed) => (
                DeauthReport {
                    success: true,
                    error: None,
                    message: REMOVED_MESSAGE,
                    action_required: Some(RESTART_REQUIRED),
                    credentials_path,
                },
                false,
            ),
            Ok(RemoveOutcome::NotFound) => (
                DeauthReport {
                    success: false,
                    error: None,
                    message: NOT_FOUND_MESSAGE,
                    action_required: None,
                    credentials_path,
                },
                false,
            ),
            Err(err) => {
                warn!(error = %err, path = %credentials_path, "failed to remove credentials file");
                (
                    DeauthReport {
                        success: false,
                        error: Some(err.to_string()),
                        message: FAILED_MESSAGE,
                        action_required: None,
                        credentials_path,
                    },
                    true,
                )
            }
        };

        let text = serde_json::to_string_pretty(&report)
            .unwrap_or_else(|_| format!("{}: {}", report.message, report.credentials_path));
        if is_error {
            ToolResponse::error(text)
        } else {
            ToolResponse::success(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::control::testing::FakeBackend;
    use crate::store::CredentialStore;

    fn body(response: &ToolResponse) -> Value {
        serde_json::from_str(&response.text()).expect("report should be JSON")
    }

    #[tokio::test]
    async fn removes_existing_credentials_then_reports_absence() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CredentialStore::in_dir(dir.path());
        std::fs::write(store.path(), r#"{"access_token":"ya29.abc"}"#).expect("write");
        let control = GdriveControlPlane::new(FakeBackend::default(), store.clone());

        let first = control.deauthenticate().await;
        assert!(!first.is_error());
        assert!(!store.path().exists());
        let report = body(&first);
        assert_eq!(report["success"], Value::Bool(true));
        assert!(report["action_required"]
            .as_str()
            .is_some_and(|text| text.contains("restart")));
        assert_eq!(
            report["credentials_path"],
            store.path().display().to_string()
        );

        let second = control.deauthenticate().await;
        assert!(!second.is_error());
        assert_eq!(body(&second)["message"], NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn missing_credentials_is_not_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let control =
            GdriveControlPlane::new(FakeBackend::default(), CredentialStore::in_dir(dir.path()));

        let response = control.deauthenticate().await;

        assert!(!response.is_error());
        assert!(response
            .text()
            .to_lowercase()
            .contains("no credentials file found"));
        assert_eq!(body(&response)["success"], Value::Bool(false));
    }

    #[tokio::test]
    async fn filesystem_failure_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("occupied");
        std::fs::create_dir(&path).expect("create directory");
        let control = GdriveControlPlane::new(FakeBackend::default(), CredentialStore::new(&path));

        let response = control.deauthenticate().await;

        assert!(response.is_error());
        let report = body(&response);
        assert_eq!(report["message"], FAILED_MESSAGE);
        assert!(report["error"].is_string());
        assert!(path.exists());
    }
}
