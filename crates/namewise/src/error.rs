//! Error types for the filename handler
//!
//! Every failure ends up as a [`HandlerError`], whose `Display` is the
//! message returned to the caller. Underlying causes stay on the error for
//! logging and never reach the response body.

use thiserror::Error;

/// Result type alias for handler operations.
pub type Result<T> = std::result::Result<T, HandlerError>;

/// Problems with the caller's input. Never retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// `text` missing or empty
    #[error("File content cannot be empty")]
    EmptyContent,

    /// `local_time` missing or empty
    #[error("Local time cannot be empty")]
    EmptyLocalTime,

    /// `date_format` missing or not one of the supported tokens
    #[error("Date format empty or invalid")]
    InvalidDateFormat,

    /// `filename_format` missing or not one of the supported templates
    #[error("Filename format empty or invalid")]
    InvalidFilenameFormat,

    /// `local_time` present but not a calendar date
    #[error("Local time is not a valid YYYY-MM-DD date")]
    InvalidLocalTime,

    /// Envelope body absent, not JSON, or with non-string fields
    #[error("Request body is not valid JSON")]
    MalformedBody,
}

/// Failure to obtain a usable filename from the completion service.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The completion call itself failed
    #[error("completion service error: {0}")]
    Service(#[from] namewise_llm::Error),

    /// The call succeeded but carried no usable text
    #[error("completion contained no usable text")]
    EmptyCompletion,
}

/// Top-level error for one invocation.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// Input validation failed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Filename generation failed
    #[error("Anthropic filename user preference generation error")]
    Generation(#[from] GenerationError),
}

impl HandlerError {
    /// Whether the failure was caused by the caller's input.
    pub fn is_validation(&self) -> bool {
        matches!(self, HandlerError::Validation(_))
    }
}

impl From<namewise_llm::Error> for HandlerError {
    fn from(err: namewise_llm::Error) -> Self {
        HandlerError::Generation(GenerationError::Service(err))
    }
}

/// Start-up configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable held a value that could not be used
    #[error("invalid value for {var}: {message}")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// What was wrong with it
        message: String,
    },

    /// The prompt rules file could not be read
    #[error("failed to read prompt rules from {path}: {source}")]
    PromptRead {
        /// Path that was read
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The prompt rules document did not parse
    #[error("prompt rules are not valid TOML: {0}")]
    PromptParse(#[from] toml::de::Error),

    /// The prompt rules parsed but break a structural rule
    #[error("invalid prompt rules: {0}")]
    InvalidRules(String),
}
