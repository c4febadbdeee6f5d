//! Drive search filter construction.
//!
//! Builds the `q` parameter for `files.list` from free-form user text.

/// Filter used on its own for an empty query, and appended to every other.
pub const NOT_TRASHED: &str = "trashed = false";

/// Document kinds the keyword heuristic can narrow a search to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeFilter {
    Spreadsheet,
    Document,
    Folder,
}

impl MimeFilter {
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Spreadsheet => "application/vnd.google-apps.spreadsheet",
            Self::Document => "application/vnd.google-apps.document",
            Self::Folder => "application/vnd.google-apps.folder",
        }
    }

    /// Scans the unescaped query, case-insensitively, for "sheet", "doc",
    /// then "folder". The first keyword found decides.
    ///
    /// The whole query is scanned, so "sheet music" narrows to spreadsheets.
    #[must_use]
    pub fn detect(query: &str) -> Option<Self> {
        let lowered = query.to_lowercase();
        if lowered.contains("sheet") {
            Some(Self::Spreadsheet)
        } else if lowered.contains("doc") {
            Some(Self::Document)
        } else if lowered.contains("folder") {
            Some(Self::Folder)
        } else {
            None
        }
    }

    fn condition(self) -> String {
        format!("mimeType = '{}'", self.mime_type())
    }
}

/// Escapes a value for embedding inside a single-quoted Drive query literal.
#[must_use]
pub fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Builds the Drive `q` filter for a user query.
///
/// An empty (after trimming) query lists everything not in the trash.
#[must_use]
pub fn build_search_filter(query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return NOT_TRASHED.to_string();
    }

    let mut conditions = vec![format!("name contains '{}'", escape_literal(query))];
    if let Some(filter) = MimeFilter::detect(query) {
        conditions.push(filter.condition());
    }

    format!("({}) and {NOT_TRASHED}", conditions.join(" or "))
}
