use gdrive_core::client::GoogleBackend;
use rmcp::{ErrorData, model::CallToolResult, tool, tool_router};

use crate::{GdriveMcp, helpers};

#[tool_router(router = tool_router_auth, vis = "pub")]
impl<B: GoogleBackend> GdriveMcp<B> {
    #[tool(description = "Remove Google Drive authentication credentials and deauthenticate the server. After using this tool, the user must restart their MCP client/agent to re-authenticate.")]
    async fn gdrive_deauthenticate(&self) -> Result<CallToolResult, ErrorData> {
        let response = self.control.deauthenticate().await;
        Ok(helpers::into_call_result(response))
    }
}
