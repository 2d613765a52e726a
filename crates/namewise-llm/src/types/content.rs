//! Content block types

use serde::{Deserialize, Serialize};

/// A content block in a response message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Text content
    #[serde(rename = "text")]
    Text {
        /// The text content
        text: String,
    },

    /// Any block type this client does not model (tool use, thinking, ...).
    #[serde(other)]
    Unsupported,
}

impl ContentBlock {
    /// Get text content if this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Unsupported => None,
        }
    }
}

/// A content block sent as part of a request message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlockParam {
    /// Text content
    #[serde(rename = "text")]
    Text {
        /// The text content
        text: String,
    },
}

impl ContentBlockParam {
    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlockParam::Text { text: text.into() }
    }
}
