use gdrive_core::ToolResponse;
use rmcp::model::{CallToolResult, Content};

/// Relays a tool envelope as an MCP call result, keeping the error flag.
pub fn into_call_result(response: ToolResponse) -> CallToolResult {
    let content = response
        .content
        .into_iter()
        .map(|item| Content::text(item.text))
        .collect();
    if response.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}
