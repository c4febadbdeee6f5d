//! Error taxonomy for calls against the Google APIs.
//!
//! The HTTP client classifies every failure into an [`ApiError`] variant once,
//! so adapters match on the variant instead of re-inspecting status codes.

use thiserror::Error;

/// Classified failure of a remote Drive or Sheets call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401, or any failure whose message mentions "unauthorized".
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },
    /// 403.
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },
    /// 404.
    #[error("not found: {message}")]
    NotFound { message: String },
    /// 400.
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },
    /// Any other status, transport failure, or undecodable response.
    #[error("{message}")]
    Unknown { message: String },
}

impl ApiError {
    /// Classifies a failure from its HTTP status (if one was received) and message.
    ///
    /// 401 and 404 are decided by status alone; otherwise an "unauthorized"
    /// substring wins over 403 and 400.
    #[must_use]
    pub fn classify(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            Some(401) => Self::Unauthorized { message },
            Some(404) => Self::NotFound { message },
            _ if message.contains("unauthorized") => Self::Unauthorized { message },
            Some(403) => Self::PermissionDenied { message },
            Some(400) => Self::InvalidRequest { message },
            _ => Self::Unknown { message },
        }
    }

    /// Underlying message as reported by the service or transport.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthorized { message }
            | Self::PermissionDenied { message }
            | Self::NotFound { message }
            | Self::InvalidRequest { message }
            | Self::Unknown { message } => message,
        }
    }
}

/// Failure to construct the HTTP client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failure reading or removing the local credential artifact.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("malformed credentials file: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_to_variants() {
        assert!(matches!(
            ApiError::classify(Some(401), "Login Required"),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::classify(Some(403), "forbidden"),
            ApiError::PermissionDenied { .. }
        ));
        assert!(matches!(
            ApiError::classify(Some(404), "File not found"),
            ApiError::NotFound { .. }
        ));
        assert!(matches!(
            ApiError::classify(Some(400), "Invalid Value"),
            ApiError::InvalidRequest { .. }
        ));
        assert!(matches!(
            ApiError::classify(Some(500), "backend error"),
            ApiError::Unknown { .. }
        ));
    }

    #[test]
    fn unauthorized_substring_wins_over_status() {
        assert!(matches!(
            ApiError::classify(Some(403), "request is unauthorized"),
            ApiError::Unauthorized { .. }
        ));
        assert!(matches!(
            ApiError::classify(None, "unauthorized client"),
            ApiError::Unauthorized { .. }
        ));
        // Substring match is case sensitive.
        assert!(matches!(
            ApiError::classify(Some(400), "Unauthorized"),
            ApiError::InvalidRequest { .. }
        ));
    }

    #[test]
    fn not_found_is_decided_by_status() {
        let err = ApiError::classify(Some(404), "unauthorized lookup");
        assert!(matches!(err, ApiError::NotFound { .. }));
        assert_eq!(err.message(), "unauthorized lookup");
    }
}
