//! HTTP request builder

use super::Response;
use crate::{
    error::{Error, Result},
    observability::Exchange,
};
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::time::Duration;
use url::Url;

/// Builder for HTTP requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(super) method: Method,
    pub(super) url: Url,
    pub(super) headers: HeaderMap,
    body: Option<Vec<u8>>,
    pub(super) timeout: Duration,
    pub(crate) max_retries: u32,
    pub(crate) http_client: Option<reqwest::Client>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
            timeout: crate::config::DEFAULT_TIMEOUT,
            max_retries: crate::config::DEFAULT_MAX_RETRIES,
            http_client: None,
        }
    }

    /// Set the HTTP client to use
    pub(crate) fn with_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Set a header, returning an error if the name or value is invalid.
    ///
    /// # Errors
    /// Returns an error if the header name or value contains invalid characters.
    pub fn try_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let key_str = key.into();
        let value_str = value.into();

        let key = key_str.parse::<HeaderName>().map_err(|e| {
            Error::HttpClient(format!("Invalid header name '{}': {}", key_str, e))
        })?;
        let mut value = value_str.parse::<HeaderValue>().map_err(|_| {
            // The value may be a credential; keep it out of the message.
            Error::HttpClient(format!("Invalid value for header '{}'", key))
        })?;

        if key == "x-api-key" {
            value.set_sensitive(true);
        }

        self.headers.insert(key, value);
        Ok(self)
    }

    /// Set the request body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set max retries.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Send the request and get a response.
    ///
    /// Retryable failures (429, 5xx, 529, timeouts) are retried up to
    /// `max_retries` times with exponential backoff, honoring `retry-after`.
    /// With `max_retries(0)` exactly one attempt is made.
    pub async fn send(self) -> Result<Response> {
        let client = self
            .http_client
            .ok_or_else(|| Error::HttpClient("No HTTP client configured".to_string()))?;

        let exchange = Exchange::begin(
            self.method.as_str(),
            self.url.path(),
            self.body.as_ref().map(Vec::len),
        );

        let mut req = client
            .request(self.method.clone(), self.url.as_str())
            .timeout(self.timeout);

        for (key, value) in &self.headers {
            req = req.header(key, value);
        }

        if let Some(body) = self.body {
            req = req.body(body);
        }

        let mut attempt = 0;
        loop {
            let attempt_req = req
                .try_clone()
                .ok_or_else(|| Error::HttpClient("Could not clone request".to_string()))?;

            match attempt_req.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    let headers = resp.headers().clone();
                    let body = resp
                        .bytes()
                        .await
                        .map_err(|e| Error::Connection(e.to_string()))?
                        .to_vec();

                    let response =
                        Response::with_metadata(status, headers, body, attempt, exchange.elapsed());

                    if response.is_error() && attempt < self.max_retries {
                        let error = Error::from_response(
                            status.as_u16(),
                            &String::from_utf8_lossy(response.body()),
                            response.headers(),
                        );

                        if error.is_retryable() {
                            attempt += 1;
                            let delay = error
                                .retry_after()
                                .unwrap_or_else(|| backoff_delay(attempt));
                            exchange.retrying(attempt, delay, &error);
                            tokio::time::sleep(delay).await;
                            continue;
                        }
                    }

                    exchange.finish(status.as_u16(), response.body().len(), attempt);

                    return Ok(response);
                }
                Err(e) if e.is_timeout() => {
                    if attempt >= self.max_retries {
                        return Err(Error::Timeout(self.timeout));
                    }
                    attempt += 1;
                    let delay = backoff_delay(attempt);
                    exchange.retrying(attempt, delay, &e);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    return Err(Error::Connection(e.to_string()));
                }
            }
        }
    }
}

/// Exponential backoff: 1s, 2s, 4s, ...
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt.saturating_sub(1)))
}
