//! HTTP provider trait for abstracting the API backend
//!
//! The client talks to the Messages endpoint through `HttpProvider`, so the
//! transport (auth headers, base URL, retries) can be swapped without
//! touching the resources.

use crate::{
    error::Result,
    http::{Method, Response},
};
use async_trait::async_trait;
use std::fmt;

/// Provider trait for making HTTP requests to a completion backend.
#[async_trait]
pub trait HttpProvider: Send + Sync + fmt::Debug {
    /// Make a request and return the raw response.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method (GET, POST, etc.)
    /// * `path` - API endpoint path (e.g., "/v1/messages")
    /// * `body` - Optional request body (will be serialized to JSON)
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or sent. Error
    /// statuses are returned as a `Response`; use
    /// [`Response::parse_result`] to convert them.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
    ) -> Result<Response>;

    /// Get the provider name for debugging/logging.
    fn provider_name(&self) -> &'static str;

    /// Get the base URL for this provider (for debugging).
    fn base_url(&self) -> &str;
}

/// Serialize a body to JSON bytes.
pub(crate) fn serialize_body(
    body: &(dyn erased_serde::Serialize + Send + Sync),
) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(crate::error::Error::Serialization)
}
