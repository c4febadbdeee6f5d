use gdrive_core::client::GoogleBackend;
use gdrive_core::control::CellUpdateRequest;
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

/// Parameters for writing a single spreadsheet cell.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCellParams {
    /// ID of the spreadsheet
    pub file_id: String,
    /// Cell range in A1 notation (e.g. 'Sheet1!A1')
    pub range: String,
    /// New cell value
    pub value: String,
}

impl From<UpdateCellParams> for CellUpdateRequest {
    fn from(params: UpdateCellParams) -> Self {
        Self {
            file_id: params.file_id,
            range: params.range,
            value: params.value,
        }
    }
}

#[tool_router(router = tool_router_sheets, vis = "pub")]
impl<B: GoogleBackend> GdriveMcp<B> {
    #[tool(description = "Update a cell value in a Google Spreadsheet")]
    async fn gsheets_update_cell(
        &self,
        Parameters(params): Parameters<UpdateCellParams>,
    ) -> Result<CallToolResult, ErrorData> {
        let response = self.control.update_cell(params.into()).await;
        Ok(helpers::into_call_result(response))
    }
}
