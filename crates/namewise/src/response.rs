//! Response returned to the host runtime

use serde::{Deserialize, Serialize};

use crate::error::HandlerError;

/// Status code for a generated filename.
pub const STATUS_OK: u16 = 200;

/// Status code for every failure, validation included.
pub const STATUS_ERROR: u16 = 500;

/// Invocation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// HTTP-style status
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    /// Filename on success, error object otherwise
    pub body: ResponseBody,
}

/// Response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseBody {
    /// The generated filename
    Filename(String),

    /// A failure description
    Error {
        /// User-facing message
        message: String,
        /// Always `true`
        error: bool,
    },
}

impl Response {
    /// Successful response carrying a filename.
    pub fn ok(filename: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_OK,
            body: ResponseBody::Filename(filename.into()),
        }
    }

    /// Failure response with a message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status_code: STATUS_ERROR,
            body: ResponseBody::Error {
                message: message.into(),
                error: true,
            },
        }
    }

    /// Whether this is a success response.
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }

    /// Filename, for success responses.
    pub fn filename(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Filename(filename) => Some(filename),
            ResponseBody::Error { .. } => None,
        }
    }

    /// Error message, for failure responses.
    pub fn error_message(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Error { message, .. } => Some(message),
            ResponseBody::Filename(_) => None,
        }
    }
}

impl From<&HandlerError> for Response {
    fn from(err: &HandlerError) -> Self {
        Response::error(err.to_string())
    }
}
