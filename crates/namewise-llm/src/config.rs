//! Configuration for the completion client

use http::HeaderMap;
use secrecy::SecretString;
use std::time::Duration;

/// Default request timeout (10 minutes).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Default number of retries for retryable failures.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Configuration for the completion client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key for authentication
    pub api_key: Option<SecretString>,

    /// Base URL for the API
    pub base_url: Option<String>,

    /// API version header value
    pub api_version: Option<String>,

    /// Default timeout for requests
    pub timeout: Duration,

    /// Maximum number of retries for failed requests
    pub max_retries: u32,

    /// Custom headers to include with every request
    pub default_headers: HeaderMap,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            api_version: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            default_headers: HeaderMap::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with an API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::new(api_key.into().into_boxed_str())),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `ANTHROPIC_API_KEY` for authentication
    /// - `ANTHROPIC_BASE_URL` for the API base URL
    /// - `ANTHROPIC_API_VERSION` for the API version
    /// - `ANTHROPIC_TIMEOUT` for request timeout (in seconds)
    /// - `ANTHROPIC_MAX_RETRIES` for maximum retry attempts
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingConfig` if a numeric variable is set but
    /// cannot be parsed.
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self, crate::error::Error> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(api_key) = env::var("ANTHROPIC_API_KEY") {
            config.api_key = Some(SecretString::new(api_key.into_boxed_str()));
        }

        if let Ok(base_url) = env::var("ANTHROPIC_BASE_URL") {
            config.base_url = Some(base_url);
        }

        if let Ok(api_version) = env::var("ANTHROPIC_API_VERSION") {
            config.api_version = Some(api_version);
        }

        if let Ok(timeout_str) = env::var("ANTHROPIC_TIMEOUT") {
            let timeout_secs = timeout_str.parse::<u64>().map_err(|_| {
                crate::error::Error::MissingConfig(format!(
                    "ANTHROPIC_TIMEOUT must be a whole number of seconds, got '{}'",
                    timeout_str
                ))
            })?;
            config.timeout = Duration::from_secs(timeout_secs);
        }

        if let Ok(max_retries_str) = env::var("ANTHROPIC_MAX_RETRIES") {
            config.max_retries = max_retries_str.parse::<u32>().map_err(|_| {
                crate::error::Error::MissingConfig(format!(
                    "ANTHROPIC_MAX_RETRIES must be a non-negative integer, got '{}'",
                    max_retries_str
                ))
            })?;
        }

        Ok(config)
    }
}
