//! MCP server implementation for gdrive-mcp.
//!
//! This crate wires the control plane into rmcp tool handlers and exposes the
//! MCP-facing API surface for Drive search, Sheets cell updates, and
//! credential removal.

mod helpers;
mod tools;
pub mod server;

use gdrive_core::client::GoogleBackend;
use gdrive_core::control::GdriveControlPlane;
use rmcp::{ServerHandler, handler::server::tool::ToolRouter, tool_handler};
use rmcp::model::{ServerCapabilities, ServerInfo};

pub use tools::{SearchParams, UpdateCellParams};

const SERVER_INSTRUCTIONS: &str = r"gdrive-mcp provides MCP tools for Google Drive and Google Sheets.

Tools:
- `gdrive_search`: search files by name. Mentioning 'sheet', 'doc', or 'folder' in the
  query also matches files of that kind. Pass `pageToken` from a previous result to
  fetch the next page; `pageSize` defaults to 10 (max 100).
- `gsheets_update_cell`: write a single value into one cell. `range` uses A1 notation
  (e.g. `Sheet1!A1`). Values are stored as-is; formulas are not evaluated.
- `gdrive_deauthenticate`: remove the stored Google credentials. The MCP client must be
  restarted afterwards to authenticate again.
- `help`: list the available tools.

Every tool returns a single text result; failures are flagged with `isError`.";

/// MCP server wrapper around the control plane and tool routers.
pub struct GdriveMcp<B: GoogleBackend> {
    tool_router: ToolRouter<Self>,
    control: GdriveControlPlane<B>,
}

impl<B: GoogleBackend> Clone for GdriveMcp<B> {
    fn clone(&self) -> Self {
        Self {
            tool_router: self.tool_router.clone(),
            control: self.control.clone(),
        }
    }
}

impl<B: GoogleBackend> GdriveMcp<B> {
    /// Creates a new server over a control plane.
    #[must_use]
    pub fn new(control: GdriveControlPlane<B>) -> Self {
        let tool_router = Self::tool_router_drive()
            + Self::tool_router_sheets()
            + Self::tool_router_auth()
            + Self::tool_router_context();
        Self {
            tool_router,
            control,
        }
    }

    #[must_use]
    pub const fn control(&self) -> &GdriveControlPlane<B> {
        &self.control
    }
}

#[tool_handler]
impl<B: GoogleBackend> ServerHandler for GdriveMcp<B> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use gdrive_core::ApiError;
    use gdrive_core::client::{
        FileList,
        FileListRequest,
        GoogleBackend,
        ValueUpdateRequest,
        ValueUpdateResponse,
    };
    use gdrive_core::control::GdriveControlPlane;
    use gdrive_core::store::CredentialStore;

    use crate::GdriveMcp;

    /// Backend answering every call with the same canned outcome.
    pub struct StubBackend {
        pub failure: Option<ApiError>,
        pub listing: FileList,
        pub updates: Mutex<Vec<ValueUpdateRequest>>,
    }

    impl GoogleBackend for StubBackend {
        async fn list_files(&self, _request: FileListRequest) -> Result<FileList, ApiError> {
            self.failure
                .clone()
                .map_or_else(|| Ok(self.listing.clone()), Err)
        }

        async fn update_values(
            &self,
            request: ValueUpdateRequest,
        ) -> Result<ValueUpdateResponse, ApiError> {
            self.updates.lock().expect("lock").push(request);
            self.failure
                .clone()
                .map_or_else(|| Ok(ValueUpdateResponse::default()), Err)
        }
    }

    pub fn server(
        failure: Option<ApiError>,
        listing: FileList,
        credentials: CredentialStore,
    ) -> GdriveMcp<StubBackend> {
        let backend = StubBackend {
            failure,
            listing,
            updates: Mutex::new(Vec::new()),
        };
        GdriveMcp::new(GdriveControlPlane::new(backend, credentials))
    }

    /// Serialized form of a call result, as the host receives it.
    pub fn wire(result: &rmcp::model::CallToolResult) -> serde_json::Value {
        serde_json::to_value(result).expect("call result should serialize")
    }
}
