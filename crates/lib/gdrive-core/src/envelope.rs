//! Uniform result shape returned by every tool operation.

use serde::{Deserialize, Serialize};

/// Kind tag of a content element. Only text is produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
}

/// A single content element of a [`ToolResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub text: String,
}

impl TextContent {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            text: text.into(),
        }
    }
}

/// Response envelope: `{ content: [{ type, text }], isError }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<TextContent>,
    pub is_error: bool,
}

impl ToolResponse {
    /// Builds a non-error envelope with one text element.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent::new(text)],
            is_error: false,
        }
    }

    /// Builds an error envelope with one text element.
    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent::new(text)],
            is_error: true,
        }
    }

    /// Concatenated text of every content element, newline separated.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|item| item.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.is_error
    }
}
