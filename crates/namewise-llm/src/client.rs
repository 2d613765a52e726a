//! Main client implementation for the Anthropic API

use std::sync::Arc;

use crate::{
    config::ClientConfig,
    error::Result,
    http::{AnthropicHttpProvider, HttpProvider},
    resources::Messages,
};

/// Client for the Messages API.
///
/// Build it once per process and clone it freely: clones share the same
/// provider and connection pool, and nothing inside is mutated after
/// construction.
///
/// # Example
///
/// ```rust,no_run
/// use namewise_llm::{Client, ClientConfig};
///
/// let client = Client::from_config(ClientConfig::with_api_key("sk-ant-...")).unwrap();
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    /// HTTP provider for making requests (handles auth, retries, etc.)
    provider: Arc<dyn HttpProvider>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("provider", &self.inner.provider.provider_name())
            .field("base_url", &self.inner.provider.base_url())
            .finish()
    }
}

impl Client {
    /// Create a client with a custom HTTP provider.
    pub fn from_provider(provider: Arc<dyn HttpProvider>) -> Self {
        Self {
            inner: Arc::new(ClientInner { provider }),
        }
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is available, the base URL is invalid,
    /// or a default header cannot be encoded.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let mut provider_builder = AnthropicHttpProvider::builder();

        if let Some(api_key) = config.api_key {
            provider_builder = provider_builder.api_key_secret(api_key);
        }
        if let Some(base_url) = config.base_url {
            provider_builder = provider_builder.base_url(base_url);
        }
        if let Some(api_version) = config.api_version {
            provider_builder = provider_builder.api_version(api_version);
        }
        provider_builder = provider_builder
            .timeout(config.timeout)
            .max_retries(config.max_retries);

        for (key, value) in &config.default_headers {
            if let Ok(value_str) = value.to_str() {
                provider_builder = provider_builder.header(key.as_str(), value_str)?;
            }
        }

        Ok(Self::from_provider(Arc::new(provider_builder.build()?)))
    }

    /// Access the Messages API endpoint.
    ///
    /// The handle holds its own clone of the client and is dropped with it.
    pub fn messages(&self) -> Messages {
        Messages::new(self.clone())
    }

    /// Provider the resources send requests through.
    pub(crate) fn provider(&self) -> &dyn HttpProvider {
        self.inner.provider.as_ref()
    }
}
