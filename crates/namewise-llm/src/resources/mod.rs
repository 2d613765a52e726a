//! API resource endpoints

pub mod messages;

pub use messages::Messages;
