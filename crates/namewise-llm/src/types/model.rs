//! Model identifiers and quality tiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Predefined model identifiers.
pub struct Models;

impl Models {
    /// Claude 3.5 Sonnet (October 2024)
    pub const CLAUDE_3_5_SONNET: &'static str = "claude-3-5-sonnet-20241022";

    /// Claude 3.5 Haiku (October 2024)
    pub const CLAUDE_3_5_HAIKU: &'static str = "claude-3-5-haiku-20241022";
}

/// Cost/latency versus capability trade-off for a completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    /// Cheaper, lower-latency model.
    Fast,
    /// Higher-capability model.
    #[default]
    Comprehensive,
}

impl ModelTier {
    /// Model identifier sent to the API for this tier.
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelTier::Fast => Models::CLAUDE_3_5_HAIKU,
            ModelTier::Comprehensive => Models::CLAUDE_3_5_SONNET,
        }
    }

    /// Lowercase tier name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Fast => "fast",
            ModelTier::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelTier {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(ModelTier::Fast),
            "comprehensive" => Ok(ModelTier::Comprehensive),
            other => Err(crate::error::Error::InvalidRequest(format!(
                "Unknown model tier '{}', expected 'fast' or 'comprehensive'",
                other
            ))),
        }
    }
}
