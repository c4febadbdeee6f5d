use gdrive_core::client::GoogleBackend;
use gdrive_core::control::SearchRequest;
use rmcp::{
    ErrorData,
    handler::server::wrapper::Parameters,
    model::CallToolResult,
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::{GdriveMcp, helpers};

/// Parameters for searching Drive files.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Search query
    pub query: String,
    /// Token for the next page of results
    pub page_token: Option<String>,
    /// Number of results per page (max 100)
    pub page_size: Option<f64>,
}

impl From<SearchParams> for SearchRequest {
    fn from(params: SearchParams) -> Self {
        Self {
            query: params.query,
            page_token: params.page_token,
            page_size: params.page_size.and_then(whole_page_size),
        }
    }
}

/// Truncates a JSON number to a page size. Anything below one, or not finite,
/// leaves the choice to the default.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn whole_page_size(raw: f64) -> Option<u32> {
    if !raw.is_finite() || raw < 1.0 {
        return None;
    }
    Some(raw.trunc().min(f64::from(u32::MAX)) as u32)
}

#[tool_router(router = tool_router_drive, vis = "pub")]
impl<B: GoogleBackend> GdriveMcp<B> {
    #[tool(description = "Search for files in Google Drive")]
    async fn gdrive_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self.control.search_files(params.into()).await;
        Ok(helpers::into_call_result(response))
    }
}
