//! Google Drive and Sheets client interfaces.
//!
//! [`GoogleBackend`] is the seam between the control plane and the remote
//! services; [`GoogleHttpClient`] is the REST implementation.

pub mod http;

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub use http::{GoogleClientConfig, GoogleHttpClient};

/// Ordering applied to every file listing.
pub const FILE_ORDER_BY: &str = "modifiedTime desc";
/// Response field mask for file listings.
pub const FILE_LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType, modifiedTime, size)";

/// Parameters of a single `files.list` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListRequest {
    pub query: String,
    pub page_size: u32,
    pub page_token: Option<String>,
    pub order_by: String,
    pub fields: String,
}

/// File metadata limited to the requested field mask.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    pub modified_time: Option<DateTime<Utc>>,
    /// Byte size; Drive encodes int64 values as strings.
    pub size: Option<String>,
}

/// One page of a file listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
    pub next_page_token: Option<String>,
}

/// How Sheets interprets written values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Stored exactly as given; formulas are not evaluated.
    Raw,
    UserEntered,
}

impl ValueInputOption {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "RAW",
            Self::UserEntered => "USER_ENTERED",
        }
    }
}

/// Parameters of a single `spreadsheets.values.update` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueUpdateRequest {
    pub spreadsheet_id: String,
    pub range: String,
    pub value_input_option: ValueInputOption,
    pub values: Vec<Vec<String>>,
}

impl ValueUpdateRequest {
    /// A raw write of one value into one cell.
    #[must_use]
    pub fn single_cell(
        spreadsheet_id: impl Into<String>,
        range: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            range: range.into(),
            value_input_option: ValueInputOption::Raw,
            values: vec![vec![value.into()]],
        }
    }
}

/// Summary returned by `spreadsheets.values.update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueUpdateResponse {
    pub spreadsheet_id: Option<String>,
    pub updated_range: Option<String>,
    pub updated_rows: Option<u32>,
    pub updated_columns: Option<u32>,
    pub updated_cells: Option<u32>,
}

/// Remote operations the tools depend on. Each method issues exactly one call.
pub trait GoogleBackend: Send + Sync + 'static {
    /// Lists Drive files matching a filter.
    fn list_files(
        &self,
        request: FileListRequest,
    ) -> impl Future<Output = Result<FileList, ApiError>> + Send;

    /// Writes values into a spreadsheet range.
    fn update_values(
        &self,
        request: ValueUpdateRequest,
    ) -> impl Future<Output = Result<ValueUpdateResponse, ApiError>> + Send;
}
