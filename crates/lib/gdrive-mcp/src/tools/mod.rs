//! MCP tool modules.
//!
//! Tools are grouped by service: Drive search, Sheets cell writes, credential
//! removal, and contextual help.

pub mod auth;
pub mod drive;
pub mod sheets;
mod context;

pub use drive::SearchParams;
pub use sheets::UpdateCellParams;
