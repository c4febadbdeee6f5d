use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::{FILE_LIST_FIELDS, FILE_ORDER_BY, FileList, FileListRequest, GoogleBackend};
use crate::envelope::ToolResponse;
use crate::error::ApiError;
use crate::query::build_search_filter;

use super::{GdriveControlPlane, UNKNOWN_ERROR, or_default};

/// Page size used when the caller gives none (or zero).
pub const DEFAULT_PAGE_SIZE: u32 = 10;

const AUTH_MESSAGE: &str = "Authentication error: Please ensure you are authenticated with Google Drive. You may need to restart the MCP server to re-authenticate.";
const PERMISSION_MESSAGE: &str = "Permission denied: You don't have access to perform this search. Please check your Google Drive permissions.";

/// Input for a Drive file search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    pub page_token: Option<String>,
    pub page_size: Option<u32>,
}

impl<B: GoogleBackend> GdriveControlPlane<B> {
    /// Searches Drive by file name, narrowing by document kind when the query
    /// names one.
    pub async fn search_files(&self, request: SearchRequest) -> ToolResponse {
        let SearchRequest {
            query,
            page_token,
            page_size,
        } = request;

        let filter = build_search_filter(&query);
        debug!(%filter, "searching google drive");
        let list_request = FileListRequest {
            query: filter,
            page_size: page_size
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            page_token,
            order_by: FILE_ORDER_BY.to_string(),
            fields: FILE_LIST_FIELDS.to_string(),
        };

        match self.backend.list_files(list_request).await {
            Ok(list) => ToolResponse::success(format_listing(&list)),
            Err(err) => {
                warn!(error = %err, "error searching google drive");
                search_failure(&err)
            }
        }
    }
}

fn format_listing(list: &FileList) -> String {
    let lines = list
        .files
        .iter()
        .map(|file| format!("{} {} ({})", file.id, file.name, file.mime_type))
        .collect::<Vec<_>>()
        .join("\n");
    let mut text = format!("Found {} files:\n{lines}", list.files.len());

    if let Some(token) = list
        .next_page_token
        .as_deref()
        .filter(|token| !token.is_empty())
    {
        text.push_str("\n\nMore results available. Use pageToken: ");
        text.push_str(token);
    }
    text
}

fn search_failure(err: &ApiError) -> ToolResponse {
    match err {
        ApiError::Unauthorized { .. } => ToolResponse::error(AUTH_MESSAGE),
        // 404 classifies ahead of the message check; search has no not-found
        // branch, so the message decides.
        ApiError::NotFound { message } if message.contains("unauthorized") => {
            ToolResponse::error(AUTH_MESSAGE)
        }
        ApiError::PermissionDenied { .. } => ToolResponse::error(PERMISSION_MESSAGE),
        ApiError::InvalidRequest { message } => ToolResponse::error(format!(
            "Invalid search query: {}",
            or_default(message, "Please check your search syntax.")
        )),
        ApiError::NotFound { message } | ApiError::Unknown { message } => {
            ToolResponse::error(format!(
                "Error searching Google Drive: {}",
                or_default(message, UNKNOWN_ERROR)
            ))
        }
    }
}
