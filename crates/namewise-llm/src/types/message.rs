//! Message-related types

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use super::{ContentBlock, ContentBlockParam, Usage};

/// A message returned by the Messages API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for the message
    pub id: String,

    /// Type of the object (always "message")
    #[serde(rename = "type")]
    pub message_type: String,

    /// Role of the message sender
    pub role: Role,

    /// Content of the message
    pub content: Vec<ContentBlock>,

    /// Model that generated the message
    pub model: String,

    /// Stop reason if the message generation stopped
    pub stop_reason: Option<StopReason>,

    /// Stop sequence that triggered the stop
    pub stop_sequence: Option<String>,

    /// Usage statistics for the message
    pub usage: Usage,
}

impl Message {
    /// Create a user message with text content.
    pub fn user(content: impl Into<String>) -> MessageParam {
        MessageParam {
            role: Role::User,
            content: vec![ContentBlockParam::text(content)],
        }
    }

    /// Create an assistant message with text content.
    pub fn assistant(content: impl Into<String>) -> MessageParam {
        MessageParam {
            role: Role::Assistant,
            content: vec![ContentBlockParam::text(content)],
        }
    }

    /// Text of the first content block, if that block is text.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(ContentBlock::as_text)
    }
}

/// Parameters for one turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageParam {
    /// Role of the message
    pub role: Role,

    /// Content blocks
    pub content: Vec<ContentBlockParam>,
}

/// Request parameters for creating a message.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(setter(into, strip_option))]
pub struct MessageRequest {
    /// Model to use
    pub model: String,

    /// Messages in the conversation
    pub messages: Vec<MessageParam>,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(default)]
    pub temperature: Option<f32>,
}

impl MessageRequest {
    /// Create a builder for constructing a MessageRequest.
    pub fn builder() -> MessageRequestBuilder {
        MessageRequestBuilder::default()
    }
}

/// Role of a message sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// Reason for stopping message generation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Reached end of message
    EndTurn,
    /// Hit maximum token limit
    MaxTokens,
    /// Hit a stop sequence
    StopSequence,
    /// Tool use requested
    ToolUse,
    /// Model declined to answer
    Refusal,
    /// A reason this client does not know about
    #[serde(other)]
    Other,
}
