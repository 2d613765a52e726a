//! Filename classification prompt
//!
//! The rules live in `prompts/filename_rules.toml`, compiled into the binary
//! and replaceable at start-up with a file of the same shape. Each rule
//! describes one kind of document and the filename layout to use for it.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::Path;

use namewise_llm::{Message, MessageRequest, ModelTier};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::HandlerConfig;
use crate::error::ConfigError;
use crate::format::SEPARATOR;

/// Rules document compiled into the crate.
pub const BUILTIN_RULES: &str = include_str!("../prompts/filename_rules.toml");

/// Tag of the catch-all rule, which must come last.
pub const FALLBACK_TAG: &str = "default";

/// Structured classification rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRules {
    /// Revision label, logged with every request
    pub version: String,

    /// What the model is asked to do
    pub task: String,

    /// Constraints that apply regardless of document type
    #[serde(default)]
    pub global_rules: Vec<String>,

    /// Per-document-type rules, in priority order
    pub rules: Vec<Rule>,
}

/// One document category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Section tag, e.g. `research_paper`
    pub tag: String,

    /// How to recognise the category and what to extract
    pub instruction: String,

    /// Filename layout, fields in braces
    pub format: String,

    /// Sample filenames
    #[serde(default)]
    pub examples: Vec<String>,
}

impl PromptRules {
    /// Rules compiled into the crate.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml(BUILTIN_RULES)
    }

    /// Parse and check a rules document.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let rules: PromptRules = toml::from_str(source)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Read rules from a file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::PromptRead {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&source)
    }

    /// Load the override file when one is given, otherwise the built-in rules.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let rules = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::builtin()?,
        };
        info!(
            version = %rules.version,
            rule_count = rules.rules.len(),
            overridden = path.is_some(),
            "Prompt rules loaded"
        );
        Ok(rules)
    }

    /// Check the structural constraints the renderer relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::InvalidRules(message));

        if self.task.trim().is_empty() {
            return invalid("task must not be empty".to_string());
        }

        let Some(last) = self.rules.last() else {
            return invalid("at least one rule is required".to_string());
        };
        if last.tag != FALLBACK_TAG {
            return invalid(format!(
                "the last rule must be '{FALLBACK_TAG}', found '{}'",
                last.tag
            ));
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if rule.tag.trim().is_empty() {
                return invalid("rule tags must not be empty".to_string());
            }
            if !rule
                .tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                return invalid(format!("rule tag '{}' is not a plain identifier", rule.tag));
            }
            if !seen.insert(rule.tag.as_str()) {
                return invalid(format!("duplicate rule tag '{}'", rule.tag));
            }
            if rule.format.matches('{').count() > 1 && !rule.format.contains(SEPARATOR) {
                return invalid(format!(
                    "rule '{}' must separate its fields with '{}'",
                    rule.tag, SEPARATOR
                ));
            }
        }

        Ok(())
    }

    /// Render the tagged instruction document sent to the model.
    pub fn render(&self) -> String {
        let mut out = String::new();

        section(&mut out, "task", self.task.trim());

        if !self.global_rules.is_empty() {
            let mut body = String::from("Your response must follow the following rules:");
            for (i, rule) in self.global_rules.iter().enumerate() {
                let _ = write!(body, "\n{}. {}", i + 1, rule.trim());
            }
            section(&mut out, "global_rules", &body);
        }

        for rule in &self.rules {
            let mut body = format!("{}\nFormat: {}", rule.instruction.trim(), rule.format);
            for (i, example) in rule.examples.iter().enumerate() {
                let _ = write!(body, "\nExample {}: {}", i + 1, example);
            }
            section(&mut out, &rule.tag, &body);
        }

        out.trim_end().to_string()
    }
}

fn section(out: &mut String, tag: &str, body: &str) {
    let _ = write!(out, "<{tag}>\n{body}\n</{tag}>\n\n");
}

/// Builds completion requests for the filename task.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    instructions: String,
    version: String,
    model_tier: ModelTier,
    max_tokens: u32,
    temperature: f32,
    content_char_limit: Option<usize>,
}

impl PromptComposer {
    /// Render the rules once and keep the request settings.
    pub fn new(rules: &PromptRules, config: &HandlerConfig) -> Self {
        Self {
            instructions: rules.render(),
            version: rules.version.clone(),
            model_tier: config.model_tier,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            content_char_limit: config.content_char_limit,
        }
    }

    /// Rendered instruction block.
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Revision of the rules in use.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Two-turn exchange: the rules as the assistant turn, the file text as
    /// the user turn.
    pub fn compose(&self, content: &str) -> namewise_llm::Result<MessageRequest> {
        let content = match self.content_char_limit {
            Some(limit) => truncate_chars(content, limit),
            None => content,
        };
        debug!(
            prompt_version = %self.version,
            model_tier = %self.model_tier,
            content_bytes = content.len(),
            "Composing filename request"
        );

        MessageRequest::builder()
            .model(self.model_tier.model_id())
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .messages(vec![
                Message::assistant(self.instructions.as_str()),
                Message::user(content),
            ])
            .build()
            .map_err(|e| namewise_llm::Error::InvalidRequest(e.to_string()))
    }
}

/// First `limit` characters of `text`.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
