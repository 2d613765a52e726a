//! Handler configuration

use std::path::PathBuf;

use namewise_llm::{ClientConfig, ModelTier};

use crate::error::ConfigError;

/// Token budget for one filename completion.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Sampling temperature for filename completions.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Characters of file text sent to the model.
pub const DEFAULT_CONTENT_CHAR_LIMIT: usize = 10_000;

/// Settings for one handler instance.
#[derive(Debug, Clone, PartialEq)]
pub struct HandlerConfig {
    /// Model tier used for classification
    pub model_tier: ModelTier,

    /// Completion token budget
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Truncate content to this many characters; `None` sends it whole
    pub content_char_limit: Option<usize>,

    /// Rules file replacing the built-in prompt
    pub prompt_path: Option<PathBuf>,

    /// Retries the completion client may make
    pub max_retries: u32,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            model_tier: ModelTier::Comprehensive,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            content_char_limit: Some(DEFAULT_CONTENT_CHAR_LIMIT),
            prompt_path: None,
            max_retries: 0,
        }
    }
}

impl HandlerConfig {
    /// Load configuration from environment variables.
    ///
    /// This will look for:
    /// - `NAMEWISE_MODEL_TIER` (`fast` or `comprehensive`)
    /// - `NAMEWISE_MAX_TOKENS`
    /// - `NAMEWISE_TEMPERATURE` (0.0 to 1.0)
    /// - `NAMEWISE_CONTENT_LIMIT` (characters, `0` disables truncation)
    /// - `NAMEWISE_PROMPT_PATH`
    /// - `NAMEWISE_MAX_RETRIES`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when a variable is set to
    /// something unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        use std::env;

        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(tier) = env::var("NAMEWISE_MODEL_TIER") {
            config.model_tier = tier.parse::<ModelTier>().map_err(|e: namewise_llm::Error| {
                ConfigError::InvalidValue {
                    var: "NAMEWISE_MODEL_TIER",
                    message: e.to_string(),
                }
            })?;
        }

        if let Ok(value) = env::var("NAMEWISE_MAX_TOKENS") {
            config.max_tokens = parse_var("NAMEWISE_MAX_TOKENS", &value)?;
            if config.max_tokens == 0 {
                return Err(ConfigError::InvalidValue {
                    var: "NAMEWISE_MAX_TOKENS",
                    message: "must be greater than zero".to_string(),
                });
            }
        }

        if let Ok(value) = env::var("NAMEWISE_TEMPERATURE") {
            config.temperature = parse_var("NAMEWISE_TEMPERATURE", &value)?;
            if !(0.0..=1.0).contains(&config.temperature) {
                return Err(ConfigError::InvalidValue {
                    var: "NAMEWISE_TEMPERATURE",
                    message: format!("must be between 0.0 and 1.0, got {}", value),
                });
            }
        }

        if let Ok(value) = env::var("NAMEWISE_CONTENT_LIMIT") {
            let limit: usize = parse_var("NAMEWISE_CONTENT_LIMIT", &value)?;
            config.content_char_limit = (limit > 0).then_some(limit);
        }

        if let Ok(path) = env::var("NAMEWISE_PROMPT_PATH") {
            if !path.trim().is_empty() {
                config.prompt_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(value) = env::var("NAMEWISE_MAX_RETRIES") {
            config.max_retries = parse_var("NAMEWISE_MAX_RETRIES", &value)?;
        }

        Ok(config)
    }

    /// Client settings for this handler, on top of a base configuration.
    ///
    /// The handler's retry count wins over whatever the base carries.
    pub fn client_config(&self, base: ClientConfig) -> ClientConfig {
        ClientConfig {
            max_retries: self.max_retries,
            ..base
        }
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            var,
            message: format!("'{}': {}", value, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VARS: [&str; 6] = [
        "NAMEWISE_MODEL_TIER",
        "NAMEWISE_MAX_TOKENS",
        "NAMEWISE_TEMPERATURE",
        "NAMEWISE_CONTENT_LIMIT",
        "NAMEWISE_PROMPT_PATH",
        "NAMEWISE_MAX_RETRIES",
    ];

    fn with_vars<F: FnOnce()>(set: &[(&str, &str)], f: F) {
        let vars: Vec<(&str, Option<&str>)> = VARS
            .iter()
            .map(|name| {
                let value = set.iter().find(|(k, _)| k == name).map(|(_, v)| *v);
                (*name, value)
            })
            .collect();
        temp_env::with_vars(vars, f);
    }

    #[test]
    fn test_defaults() {
        let config = HandlerConfig::default();
        assert_eq!(config.model_tier, ModelTier::Comprehensive);
        assert_eq!(config.max_tokens, 2048);
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.content_char_limit, Some(10_000));
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_from_env_unset_matches_default() {
        with_vars(&[], || {
            assert_eq!(HandlerConfig::from_env().unwrap(), HandlerConfig::default());
        });
    }

    #[test]
    fn test_from_env_overrides() {
        with_vars(
            &[
                ("NAMEWISE_MODEL_TIER", "fast"),
                ("NAMEWISE_MAX_TOKENS", "256"),
                ("NAMEWISE_TEMPERATURE", "0"),
                ("NAMEWISE_CONTENT_LIMIT", "0"),
                ("NAMEWISE_PROMPT_PATH", "/etc/namewise/rules.toml"),
                ("NAMEWISE_MAX_RETRIES", "2"),
            ],
            || {
                let config = HandlerConfig::from_env().unwrap();
                assert_eq!(config.model_tier, ModelTier::Fast);
                assert_eq!(config.max_tokens, 256);
                assert_eq!(config.temperature, 0.0);
                assert_eq!(config.content_char_limit, None);
                assert_eq!(
                    config.prompt_path,
                    Some(PathBuf::from("/etc/namewise/rules.toml"))
                );
                assert_eq!(config.max_retries, 2);
            },
        );
    }

    #[test]
    fn test_from_env_rejects_bad_values() {
        for (var, value) in [
            ("NAMEWISE_MODEL_TIER", "premium"),
            ("NAMEWISE_MAX_TOKENS", "lots"),
            ("NAMEWISE_MAX_TOKENS", "0"),
            ("NAMEWISE_TEMPERATURE", "1.5"),
            ("NAMEWISE_CONTENT_LIMIT", "-1"),
        ] {
            with_vars(&[(var, value)], || {
                match HandlerConfig::from_env() {
                    Err(ConfigError::InvalidValue { var: reported, .. }) => {
                        assert_eq!(reported, var)
                    }
                    other => panic!("expected invalid {var}, got {other:?}"),
                }
            });
        }
    }

    #[test]
    fn test_client_config_forces_retry_count() {
        let base = ClientConfig {
            max_retries: 5,
            ..ClientConfig::with_api_key("test-key")
        };
        let config = HandlerConfig::default().client_config(base);

        assert_eq!(config.max_retries, 0);
        assert!(config.api_key.is_some());
    }
}
