//! # namewise
//!
//! Serverless handler that turns raw file text into a descriptive filename.
//!
//! One invocation runs a linear pipeline: validate the request, ask the
//! completion service to classify the content and propose a filename, render
//! the caller's local date in the chosen format, and join the two according to
//! the chosen filename template.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use namewise::{Event, Handler, HandlerConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = HandlerConfig::from_env()?;
//! let client = namewise_llm::Client::from_config(
//!     config.client_config(namewise_llm::ClientConfig::from_env()?),
//! )?;
//! let handler = Handler::new(Arc::new(client), &config)?;
//!
//! let event = Event::new(r#"{"text": "...", "local_time": "2024-01-01"}"#);
//! let response = handler.handle(event).await;
//! println!("{}", serde_json::to_string(&response)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub use completion::CompletionService;
pub use config::HandlerConfig;
pub use error::{ConfigError, GenerationError, HandlerError, ValidationError};
pub use format::{DateFormat, FilenameFormat};
pub use handler::Handler;
pub use prompt::{PromptComposer, PromptRules};
pub use request::{Event, RawRequest, ValidatedRequest};
pub use response::{Response, ResponseBody};

pub mod completion;
pub mod config;
pub mod error;
pub mod format;
pub mod handler;
pub mod prompt;
pub mod request;
pub mod response;

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
