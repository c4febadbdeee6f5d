//! Daemon entry point for the Google Drive MCP server.
//!
//! Loads configuration from the environment, builds the Google API client from
//! the stored credentials, and serves the MCP protocol over stdio and/or
//! streamable HTTP.

mod backend;
mod config;

use gdrive_core::control::GdriveControlPlane;
use gdrive_core::store::CredentialStore;
use gdrive_mcp::GdriveMcp;
use gdrive_mcp::server::{McpHttpServerConfig, serve_stdio, serve_streamable_http};
use tracing_subscriber::EnvFilter;

use crate::backend::build_client;
use crate::config::{GdriveConfig, Transport};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gdrive_core=info".parse()?)
                .add_directive("gdrive_mcp=info".parse()?)
                .add_directive("gdrive_mcpd=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = GdriveConfig::from_args()?;
    let credentials = CredentialStore::new(config.credentials_path.clone());
    let client = build_client(&config, &credentials).await?;
    let server = GdriveMcp::new(GdriveControlPlane::new(client, credentials));

    match config.transport {
        Transport::Stdio => serve_stdio(server).await,
        Transport::Http(addr) => {
            serve_streamable_http(server, McpHttpServerConfig::new(addr)).await
        }
        Transport::StdioAndHttp(addr) => {
            let http = serve_streamable_http(server.clone(), McpHttpServerConfig::new(addr));
            tokio::select! {
                result = serve_stdio(server) => result,
                result = http => result,
            }
        }
    }
}
