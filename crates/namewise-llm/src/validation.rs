//! Request validation for the completion client
//!
//! Requests are checked before they're sent so malformed input fails fast
//! with a descriptive `Error::InvalidRequest` instead of a round trip to the
//! API.
//!
//! # Examples
//!
//! ```rust
//! use namewise_llm::types::{MessageRequest, Message};
//! use namewise_llm::validation::validate_message_request;
//!
//! let request = MessageRequest::builder()
//!     .model("claude-3-5-sonnet-20241022")
//!     .max_tokens(1024u32)
//!     .messages(vec![Message::user("Hello")])
//!     .build()?;
//!
//! validate_message_request(&request)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{Error, Result};
use crate::observability::log_validation_error;
use crate::types::{ContentBlockParam, MessageParam, MessageRequest};
use tracing::debug;

/// Anthropic's maximum output token limit.
const MAX_TOKEN_LIMIT: u32 = 200_000;

/// Validate a MessageRequest before sending to the API.
///
/// # Errors
///
/// Returns `Error::InvalidRequest` with a descriptive message for any validation failure.
pub fn validate_message_request(request: &MessageRequest) -> Result<()> {
    debug!(
        model = %request.model,
        max_tokens = request.max_tokens,
        message_count = request.messages.len(),
        "Validating message request"
    );

    validate_model_id(&request.model)?;
    validate_max_tokens(request.max_tokens)?;
    validate_messages(&request.messages)?;

    if let Some(temperature) = request.temperature {
        validate_unit_interval("temperature", temperature)?;
    }

    Ok(())
}

fn invalid(field: &str, reason: String) -> Error {
    log_validation_error(field, &reason);
    Error::InvalidRequest(reason)
}

fn validate_model_id(model: &str) -> Result<()> {
    if model.is_empty() {
        return Err(invalid("model", "Model ID cannot be empty".to_string()));
    }

    if !model
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_')
    {
        return Err(invalid(
            "model",
            format!(
                "Invalid model ID '{}': must contain only alphanumeric characters, hyphens, dots, and underscores",
                model
            ),
        ));
    }

    Ok(())
}

fn validate_max_tokens(max_tokens: u32) -> Result<()> {
    if max_tokens == 0 {
        return Err(invalid(
            "max_tokens",
            "max_tokens must be greater than 0".to_string(),
        ));
    }

    if max_tokens > MAX_TOKEN_LIMIT {
        return Err(invalid(
            "max_tokens",
            format!(
                "max_tokens ({}) exceeds maximum allowed value ({})",
                max_tokens, MAX_TOKEN_LIMIT
            ),
        ));
    }

    Ok(())
}

fn validate_messages(messages: &[MessageParam]) -> Result<()> {
    if messages.is_empty() {
        return Err(invalid(
            "messages",
            "Messages array cannot be empty. At least one message is required.".to_string(),
        ));
    }

    for (index, message) in messages.iter().enumerate() {
        if message.content.is_empty() {
            return Err(invalid(
                "messages",
                format!("Message at index {} has empty content", index),
            ));
        }

        for (block_index, block) in message.content.iter().enumerate() {
            match block {
                ContentBlockParam::Text { text } if text.is_empty() => {
                    return Err(invalid(
                        "messages",
                        format!(
                            "Text content block at message {} block {} is empty",
                            index, block_index
                        ),
                    ));
                }
                ContentBlockParam::Text { .. } => {}
            }
        }
    }

    Ok(())
}

fn validate_unit_interval(field: &str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(
            field,
            format!("{} must be between 0.0 and 1.0, got {}", field, value),
        ));
    }
    Ok(())
}
