//! Anthropic API HTTP provider implementation
//!
//! Handles requests to the Anthropic endpoints with API key authentication,
//! version headers and bounded retries.

use super::{HttpProvider, Method, RequestBuilder, provider::serialize_body};
use crate::{
    DEFAULT_API_VERSION,
    config::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT},
    error::{Error, Result},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::{sync::Arc, time::Duration};
use url::Url;

/// HTTP provider for the Anthropic API.
///
/// Cheap to clone; all state lives behind an `Arc` and is never mutated
/// after construction, so one provider can serve every invocation.
///
/// # Example
///
/// ```rust,no_run
/// use namewise_llm::http::AnthropicHttpProvider;
///
/// let provider = AnthropicHttpProvider::builder()
///     .api_key_secret(secrecy::SecretString::new("sk-ant-...".into()))
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct AnthropicHttpProvider {
    pub(crate) inner: Arc<ProviderInner>,
}

#[derive(Debug)]
pub(crate) struct ProviderInner {
    pub(crate) http_client: reqwest::Client,
    pub(crate) base_url: Url,
    pub(crate) api_key: SecretString,
    pub(crate) api_version: String,
    pub(crate) timeout: Duration,
    pub(crate) max_retries: u32,
    pub(crate) default_headers: http::HeaderMap,
}

impl AnthropicHttpProvider {
    /// Create a new builder for configuring the provider.
    pub fn builder() -> AnthropicHttpProviderBuilder {
        AnthropicHttpProviderBuilder::default()
    }

    /// Create a request builder with provider configuration.
    fn build_request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.inner.base_url.join(path).map_err(|e| {
            Error::InvalidUrl(format!(
                "Failed to construct URL from path '{}': {}",
                path, e
            ))
        })?;

        let mut builder = RequestBuilder::new(method, url)
            .with_client(self.inner.http_client.clone())
            .timeout(self.inner.timeout)
            .max_retries(self.inner.max_retries)
            .try_header("anthropic-version", &self.inner.api_version)?
            .try_header("content-type", "application/json")?
            .try_header("x-api-key", self.inner.api_key.expose_secret())?;

        for (key, value) in &self.inner.default_headers {
            if let Ok(value_str) = value.to_str() {
                builder = builder.try_header(key.as_str(), value_str)?;
            }
        }

        Ok(builder)
    }
}

#[async_trait]
impl HttpProvider for AnthropicHttpProvider {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
    ) -> Result<super::Response> {
        let mut builder = self.build_request(method, path)?;

        if let Some(body) = body {
            builder = builder.body(serialize_body(body)?);
        }

        builder.send().await
    }

    fn provider_name(&self) -> &'static str {
        "anthropic"
    }

    fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }
}

/// Builder for creating an `AnthropicHttpProvider` with custom configuration.
///
/// # Example
///
/// ```rust,no_run
/// use namewise_llm::http::AnthropicHttpProvider;
///
/// let provider = AnthropicHttpProvider::builder()
///     .api_key_secret(secrecy::SecretString::new("sk-ant-...".into()))
///     .timeout(std::time::Duration::from_secs(120))
///     .max_retries(0)
///     .build()
///     .unwrap();
/// ```
#[derive(Default)]
pub struct AnthropicHttpProviderBuilder {
    api_key: Option<SecretString>,
    base_url: Option<String>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    default_headers: http::HeaderMap,
}

impl AnthropicHttpProviderBuilder {
    /// Set the API key sent in the `x-api-key` header.
    pub fn api_key_secret(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set the base URL for the API.
    ///
    /// Defaults to `https://api.anthropic.com`.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the API version header value.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 600 seconds (10 minutes).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of retries for failed requests.
    ///
    /// Defaults to 2 retries.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Add a custom header to include with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str.parse::<http::HeaderName>().map_err(|e| {
            Error::HttpClient(format!("Invalid header name '{}': {}", key_str, e))
        })?;
        let value = value_str.parse::<http::HeaderValue>().map_err(|e| {
            Error::HttpClient(format!("Invalid header value '{}': {}", value_str, e))
        })?;

        self.default_headers.insert(key, value);
        Ok(self)
    }

    /// Build the provider with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No API key is provided (and none is found in `ANTHROPIC_API_KEY`)
    /// - The base URL is empty, unparsable, or not http(s)
    /// - HTTP client creation fails
    pub fn build(self) -> Result<AnthropicHttpProvider> {
        let Self {
            api_key,
            base_url,
            api_version,
            timeout,
            max_retries,
            default_headers,
        } = self;

        let api_key = match api_key {
            Some(key) => key,
            None => api_key_from_env()?,
        };

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("namewise-llm/{}", crate::VERSION))
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;

        let base_url_string = base_url.unwrap_or_else(|| crate::DEFAULT_BASE_URL.to_string());

        if base_url_string.trim().is_empty() {
            return Err(Error::InvalidUrl("Base URL cannot be empty".to_string()));
        }

        let base_url: Url = base_url_string
            .parse()
            .map_err(|e| Error::InvalidUrl(format!("{}", e)))?;

        match base_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(Error::InvalidUrl(format!(
                    "Invalid URL scheme '{}'. Only 'http' and 'https' are supported.",
                    scheme
                )));
            }
        }

        Ok(AnthropicHttpProvider {
            inner: Arc::new(ProviderInner {
                http_client,
                base_url,
                api_key,
                api_version: api_version.unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                timeout,
                max_retries: max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
                default_headers,
            }),
        })
    }
}

#[cfg(feature = "env")]
fn api_key_from_env() -> Result<SecretString> {
    std::env::var("ANTHROPIC_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(|key| SecretString::new(key.into_boxed_str()))
        .ok_or_else(|| {
            Error::Authentication(
                "No API key provided. Set ANTHROPIC_API_KEY or provide the key explicitly."
                    .to_string(),
            )
        })
}

#[cfg(not(feature = "env"))]
fn api_key_from_env() -> Result<SecretString> {
    Err(Error::Authentication("No API key provided".to_string()))
}
