//! HTTP layer for the completion client
//!
//! Provides the provider seam, a request builder with bounded retries, and
//! the response wrapper that turns error statuses into typed errors.

pub use anthropic_provider::{AnthropicHttpProvider, AnthropicHttpProviderBuilder};
pub use provider::HttpProvider;
pub use request::RequestBuilder;
pub use response::Response;

mod anthropic_provider;
pub mod provider;
mod request;
mod response;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
