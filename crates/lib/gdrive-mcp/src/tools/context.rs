use gdrive_core::client::GoogleBackend;
use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::GdriveMcp;

/// Payload listing the MCP commands.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: vec![
                "help - List the MCP commands this server provides."
                    .to_string(),
                "gdrive_search - Search Google Drive files by name; pass pageToken to continue a listing."
                    .to_string(),
                "gsheets_update_cell - Write one value into a spreadsheet cell given in A1 notation."
                    .to_string(),
                "gdrive_deauthenticate - Remove the stored Google credentials; restart the client afterwards."
                    .to_string(),
            ],
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl<B: GoogleBackend> GdriveMcp<B> {
    #[tool(description = "List the MCP commands this server provides.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }
}

#[cfg(test)]
mod tests {
    use gdrive_core::client::FileList;
    use gdrive_core::store::CredentialStore;

    use super::*;
    use crate::testing::server;

    #[test]
    fn help_mentions_every_tool() {
        let commands = HelpCommands::default().commands.join("\n");
        for name in ["gdrive_search", "gsheets_update_cell", "gdrive_deauthenticate"] {
            assert!(commands.contains(name), "help is missing {name}");
        }
    }

    #[tokio::test]
    async fn help_returns_json_listing() {
        let mcp = server(None, FileList::default(), CredentialStore::new("unused.json"));

        let result = mcp.help().await.expect("help should succeed");

        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.content.len(), 1);
    }
}
