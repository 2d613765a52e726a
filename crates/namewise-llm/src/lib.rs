//! # namewise-llm
//!
//! Async client for the Anthropic Messages API, covering what the namewise
//! handler needs from a completion service:
//! - Typed message requests and responses
//! - Fast and comprehensive model tiers
//! - API key authentication with secret handling
//! - Bounded retries and HTTP status to error mapping
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use namewise_llm::{Client, ClientConfig, Message, MessageRequest, ModelTier};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::from_config(ClientConfig::with_api_key("your-api-key"))?;
//!
//!     let message = client.messages()
//!         .create(MessageRequest::builder()
//!             .model(ModelTier::Comprehensive.model_id())
//!             .max_tokens(1024u32)
//!             .messages(vec![
//!                 Message::user("Hello, Claude!")
//!             ])
//!             .build()?)
//!         .await?;
//!
//!     println!("{}", message.first_text().unwrap_or_default());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// Re-export commonly used types
pub use client::Client;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod resources;
pub mod types;
pub mod validation;

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default API version header value
pub const DEFAULT_API_VERSION: &str = "2023-06-01";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_BASE_URL, "https://api.anthropic.com");
        assert_eq!(DEFAULT_API_VERSION, "2023-06-01");
    }
}
