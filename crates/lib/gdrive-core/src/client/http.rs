use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::error::{ApiError, ClientError};

use super::{
    FileList,
    FileListRequest,
    GoogleBackend,
    ValueUpdateRequest,
    ValueUpdateResponse,
};

pub const DEFAULT_DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`GoogleHttpClient`].
#[derive(Debug, Clone)]
pub struct GoogleClientConfig {
    pub drive_api_base: String,
    pub sheets_api_base: String,
    pub timeout: Duration,
    pub access_token: Option<String>,
}

impl GoogleClientConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            drive_api_base: DEFAULT_DRIVE_API_BASE.to_string(),
            sheets_api_base: DEFAULT_SHEETS_API_BASE.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            access_token: None,
        }
    }

    #[must_use]
    pub fn with_drive_api_base(mut self, base: impl Into<String>) -> Self {
        self.drive_api_base = base.into();
        self
    }

    #[must_use]
    pub fn with_sheets_api_base(mut self, base: impl Into<String>) -> Self {
        self.sheets_api_base = base.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.access_token = access_token;
        self
    }
}

impl Default for GoogleClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// REST client for the Drive v3 and Sheets v4 APIs.
///
/// Requests carry the configured bearer token when one is present. Failures
/// are classified into [`ApiError`] here and nowhere else.
#[derive(Debug, Clone)]
pub struct GoogleHttpClient {
    http: Client,
    drive_api_base: Url,
    sheets_api_base: Url,
    access_token: Option<String>,
}

impl GoogleHttpClient {
    /// Builds a client from configuration.
    ///
    /// # Errors
    /// Returns `ClientError` if a base URL cannot be used as a base or the
    /// underlying HTTP client cannot be built.
    pub fn new(config: GoogleClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            drive_api_base: parse_api_base(&config.drive_api_base)?,
            sheets_api_base: parse_api_base(&config.sheets_api_base)?,
            access_token: config.access_token,
        })
    }

    #[must_use]
    pub const fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

impl GoogleBackend for GoogleHttpClient {
    async fn list_files(&self, request: FileListRequest) -> Result<FileList, ApiError> {
        let url = join_segments(&self.drive_api_base, &["files"])?;
        let mut query = vec![
            ("q", request.query),
            ("pageSize", request.page_size.to_string()),
            ("orderBy", request.order_by),
            ("fields", request.fields),
        ];
        if let Some(token) = request.page_token {
            query.push(("pageToken", token));
        }

        debug!(%url, "listing drive files");
        let response = self
            .authorize(self.http.get(url).query(&query))
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn update_values(
        &self,
        request: ValueUpdateRequest,
    ) -> Result<ValueUpdateResponse, ApiError> {
        let url = join_segments(
            &self.sheets_api_base,
            &[
                "spreadsheets",
                &request.spreadsheet_id,
                "values",
                &request.range,
            ],
        )?;
        let body = json!({
            "range": request.range,
            "majorDimension": "ROWS",
            "values": request.values,
        });

        debug!(%url, "updating sheet values");
        let response = self
            .authorize(self.http.put(url))
            .query(&[("valueInputOption", request.value_input_option.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    #[serde(default)]
    message: String,
}

/// Parses an API base URL. Only `http` and `https` URLs usable as a base are
/// accepted.
///
/// # Errors
/// Returns `ClientError::InvalidBaseUrl` when `raw` does not parse or is not a
/// usable http(s) base.
pub fn parse_api_base(raw: &str) -> Result<Url, ClientError> {
    let invalid = |message: String| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        message,
    };
    let url = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot be a base".to_string()));
    }
    Ok(url)
}

/// Appends percent-encoded path segments to a base URL.
fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ApiError::Unknown {
            message: format!("API base URL cannot be a base: {base}"),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn transport_error(err: reqwest::Error) -> ApiError {
    let status = err.status().map(|status| status.as_u16());
    ApiError::classify(status, err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(|err| ApiError::Unknown {
            message: format!("failed to decode response: {err}"),
        });
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GoogleErrorBody>(&body)
        .ok()
        .map(|parsed| parsed.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| status.to_string(), str::to_string)
        });
    Err(ApiError::classify(Some(status.as_u16()), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unusable_base_urls() {
        let config = GoogleClientConfig::new().with_drive_api_base("not a url");
        assert!(matches!(
            GoogleHttpClient::new(config),
            Err(ClientError::InvalidBaseUrl { .. })
        ));

        let config = GoogleClientConfig::new().with_sheets_api_base("mailto:someone@example.com");
        assert!(matches!(
            GoogleHttpClient::new(config),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn api_base_must_be_http() {
        assert!(parse_api_base(" http://127.0.0.1:8080/drive/v3 ").is_ok());
        assert!(matches!(
            parse_api_base("ftp://example.com/drive"),
            Err(ClientError::InvalidBaseUrl { message, .. }) if message.contains("ftp")
        ));
    }

    #[test]
    fn range_segments_are_percent_encoded() {
        let base = parse_api_base("https://sheets.googleapis.com/v4/").expect("valid base");
        let url = join_segments(&base, &["spreadsheets", "abc", "values", "My Sheet!A1"])
            .expect("joinable base");

        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/My%20Sheet!A1"
        );
    }

    #[test]
    fn token_presence_is_reported() {
        let client = GoogleHttpClient::new(
            GoogleClientConfig::new().with_access_token(Some("ya29.token".to_string())),
        )
        .expect("client should build");
        assert!(client.has_access_token());
    }
}
