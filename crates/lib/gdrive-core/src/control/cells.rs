use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::client::{GoogleBackend, ValueUpdateRequest};
use crate::envelope::ToolResponse;
use crate::error::ApiError;

use super::{GdriveControlPlane, UNKNOWN_ERROR, or_default};

const AUTH_MESSAGE: &str = "Authentication error: Please ensure you are authenticated with Google Sheets. You may need to restart the MCP server to re-authenticate.";
const PERMISSION_MESSAGE: &str =
    "Permission denied: You don't have permission to edit this spreadsheet.";

/// Input for writing a single spreadsheet cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellUpdateRequest {
    pub file_id: String,
    /// Target cell in A1 notation, e.g. `Sheet1!A1`.
    pub range: String,
    pub value: String,
}

impl<B: GoogleBackend> GdriveControlPlane<B> {
    /// Writes `value` into one cell without formula interpretation.
    pub async fn update_cell(&self, request: CellUpdateRequest) -> ToolResponse {
        let CellUpdateRequest {
            file_id,
            range,
            value,
        } = request;

        debug!(spreadsheet_id = %file_id, %range, "updating google sheets cell");
        let update = ValueUpdateRequest::single_cell(file_id.as_str(), range.as_str(), value.as_str());
        match self.backend.update_values(update).await {
            Ok(_) => ToolResponse::success(format!("Updated cell {range} to value: {value}")),
            Err(err) => {
                warn!(error = %err, "error updating google sheets cell");
                update_failure(&err, &file_id, &range)
            }
        }
    }
}

fn update_failure(err: &ApiError, file_id: &str, range: &str) -> ToolResponse {
    match err {
        ApiError::NotFound { .. } => ToolResponse::error(format!(
            "Spreadsheet not found: The spreadsheet with ID '{file_id}' does not exist or you don't have access to it."
        )),
        ApiError::Unauthorized { .. } => ToolResponse::error(AUTH_MESSAGE),
        ApiError::PermissionDenied { .. } => ToolResponse::error(PERMISSION_MESSAGE),
        ApiError::InvalidRequest { message } if message.contains("range") => {
            ToolResponse::error(format!(
                "Invalid range: '{range}'. Please use A1 notation (e.g., 'Sheet1!A1' or 'A1:B2')."
            ))
        }
        ApiError::InvalidRequest { message } => ToolResponse::error(format!(
            "Invalid request: {}",
            or_default(message, "Please check your input parameters.")
        )),
        ApiError::Unknown { message } => ToolResponse::error(format!(
            "Error updating cell: {}",
            or_default(message, UNKNOWN_ERROR)
        )),
    }
}
