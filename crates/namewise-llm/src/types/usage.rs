//! Usage statistics

use serde::{Deserialize, Serialize};

/// Token usage statistics for a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    /// Number of input tokens
    pub input_tokens: u32,

    /// Number of output tokens
    pub output_tokens: u32,
}
