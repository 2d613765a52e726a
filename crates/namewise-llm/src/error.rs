//! Error types for the completion client
//!
//! HTTP failures from the Messages API are mapped onto variants by status
//! code, so callers can tell authentication problems from rate limiting or
//! an overloaded service without inspecting raw bodies.

use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with a client error.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the completion client.
#[derive(Debug, Error)]
pub enum Error {
    /// API returned a bad request error (400).
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from the API
        message: String,
        /// Optional error type from API
        error_type: Option<String>,
    },

    /// Authentication failed (401).
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Permission denied (403).
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Resource not found (404).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Conflict error (409).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unprocessable entity (422).
    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    /// Rate limit exceeded (429).
    #[error("Rate limit exceeded")]
    RateLimit {
        /// Time to wait before retrying, if provided by the API
        retry_after: Option<Duration>,
        /// Time when the rate limit resets
        reset_at: Option<chrono::DateTime<chrono::Utc>>,
    },

    /// Internal server error (500+).
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    /// Service overloaded (529).
    #[error("Service overloaded: {0}")]
    Overloaded(String),

    /// Generic API error for status codes not covered above.
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
        /// Request ID for debugging
        request_id: Option<String>,
    },

    /// Failed to decode the API response.
    #[error("Failed to parse API response: {0}")]
    ResponseValidation(String),

    /// Network or connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// Invalid request parameters, caught before anything is sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client configuration or initialization error.
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing required configuration.
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),
}

impl Error {
    /// Create an API error from an HTTP response status and body.
    pub fn from_response(status: u16, body: &str, headers: &http::HeaderMap) -> Self {
        let message = serde_json::from_str::<ApiErrorResponse>(body)
            .map(|parsed| parsed.error.message)
            .unwrap_or_else(|_| body.to_string());
        let error_type = serde_json::from_str::<ApiErrorResponse>(body)
            .ok()
            .map(|parsed| parsed.error.error_type);

        match status {
            400 => Error::BadRequest {
                message,
                error_type,
            },
            401 => Error::Authentication(message),
            403 => Error::PermissionDenied(message),
            404 => Error::NotFound(message),
            409 => Error::Conflict(message),
            422 => Error::UnprocessableEntity(message),
            429 => Error::RateLimit {
                retry_after: headers
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(Duration::from_secs),
                reset_at: parse_header_datetime(headers, "anthropic-ratelimit-requests-reset"),
            },
            529 => Error::Overloaded(message),
            s if s >= 500 => Error::InternalServerError(message),
            _ => Error::ApiError {
                status,
                message,
                request_id: headers
                    .get("request-id")
                    .or_else(|| headers.get("x-request-id"))
                    .and_then(|v| v.to_str().ok())
                    .map(String::from),
            },
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RateLimit { .. } => true,
            Error::InternalServerError(_) => true,
            Error::Overloaded(_) => true,
            Error::Connection(_) => true,
            Error::Timeout(_) => true,
            Error::ApiError { status, .. } => *status >= 500 || *status == 408 || *status == 409,
            _ => false,
        }
    }

    /// Get retry delay if this is a rate limit error with retry-after.
    pub fn retry_after(&self) -> Option<Duration> {
        if let Error::RateLimit { retry_after, .. } = self {
            *retry_after
        } else {
            None
        }
    }
}

// Shape of the API's error body: {"type":"error","error":{"type":..,"message":..}}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetails,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorDetails {
    message: String,
    #[serde(rename = "type")]
    error_type: String,
}

fn parse_header_datetime(
    headers: &http::HeaderMap,
    name: &str,
) -> Option<chrono::DateTime<chrono::Utc>> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&chrono::Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_retryable() {
        assert!(
            Error::RateLimit {
                retry_after: None,
                reset_at: None,
            }
            .is_retryable()
        );

        assert!(Error::InternalServerError("test".to_string()).is_retryable());
        assert!(Error::Connection("test".to_string()).is_retryable());
        assert!(Error::Timeout(Duration::from_secs(30)).is_retryable());

        assert!(
            !Error::BadRequest {
                message: "test".to_string(),
                error_type: None,
            }
            .is_retryable()
        );

        assert!(!Error::Authentication("test".to_string()).is_retryable());
        assert!(!Error::InvalidRequest("test".to_string()).is_retryable());
    }

    #[test]
    fn test_error_retry_after() {
        let error = Error::RateLimit {
            retry_after: Some(Duration::from_secs(60)),
            reset_at: None,
        };
        assert_eq!(error.retry_after(), Some(Duration::from_secs(60)));

        let error = Error::NotFound("test".to_string());
        assert_eq!(error.retry_after(), None);
    }

    #[test]
    fn test_error_400_bad_request_parsing() {
        let json_body = r#"{"type":"error","error":{"type":"invalid_request_error","message":"Missing required field: model"}}"#;
        let headers = http::HeaderMap::new();

        match Error::from_response(400, json_body, &headers) {
            Error::BadRequest {
                message,
                error_type,
            } => {
                assert_eq!(message, "Missing required field: model");
                assert_eq!(error_type, Some("invalid_request_error".to_string()));
            }
            other => panic!("Expected BadRequest variant, got {other:?}"),
        }
    }

    #[test]
    fn test_error_401_authentication() {
        let json_body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        let headers = http::HeaderMap::new();

        match Error::from_response(401, json_body, &headers) {
            Error::Authentication(msg) => assert_eq!(msg, "invalid x-api-key"),
            other => panic!("Expected Authentication variant, got {other:?}"),
        }
    }

    #[test]
    fn test_error_429_rate_limit_headers() {
        let json_body = r#"{"type":"error","error":{"type":"rate_limit_error","message":"Rate limit exceeded"}}"#;

        let mut headers = http::HeaderMap::new();
        headers.insert("retry-after", "60".parse().unwrap());
        headers.insert(
            "anthropic-ratelimit-requests-reset",
            "2025-10-23T20:00:00Z".parse().unwrap(),
        );

        match Error::from_response(429, json_body, &headers) {
            Error::RateLimit {
                retry_after,
                reset_at,
            } => {
                assert_eq!(retry_after, Some(Duration::from_secs(60)));
                assert!(reset_at.is_some());
            }
            other => panic!("Expected RateLimit variant, got {other:?}"),
        }
    }

    #[test]
    fn test_error_529_overloaded() {
        let json_body = r#"{"type":"error","error":{"type":"overloaded_error","message":"Overloaded"}}"#;
        let headers = http::HeaderMap::new();

        assert!(matches!(
            Error::from_response(529, json_body, &headers),
            Error::Overloaded(msg) if msg == "Overloaded"
        ));
    }

    #[test]
    fn test_error_invalid_json_fallback() {
        let headers = http::HeaderMap::new();

        match Error::from_response(502, "Bad Gateway", &headers) {
            Error::InternalServerError(msg) => assert_eq!(msg, "Bad Gateway"),
            other => panic!("Expected InternalServerError variant, got {other:?}"),
        }
    }

    #[test]
    fn test_error_unmapped_status_keeps_request_id() {
        let mut headers = http::HeaderMap::new();
        headers.insert("request-id", "req_123".parse().unwrap());

        match Error::from_response(418, "teapot", &headers) {
            Error::ApiError {
                status,
                request_id,
                ..
            } => {
                assert_eq!(status, 418);
                assert_eq!(request_id.as_deref(), Some("req_123"));
            }
            other => panic!("Expected ApiError variant, got {other:?}"),
        }
    }
}
