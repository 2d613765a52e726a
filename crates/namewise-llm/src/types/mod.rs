//! Request and response types for the Messages API

pub use content::*;
pub use message::*;
pub use model::*;
pub use usage::*;

pub mod content;
pub mod message;
pub mod model;
pub mod usage;
