//! Core types and services for gdrive-mcp.
//!
//! This crate owns the Google Drive and Sheets client, the response envelope
//! shared by every tool, the local credential store, and the control plane
//! that turns tool requests into a single remote call each.

pub mod client;
pub mod control;
pub mod envelope;
pub mod error;
pub mod query;
pub mod store;

pub use envelope::ToolResponse;
pub use error::ApiError;
