//! Structured logging for completion exchanges
//!
//! One [`Exchange`] spans every attempt made for a single request, so the
//! final log line carries the total elapsed time and the retry count.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// A request in flight, from first attempt to final response.
#[derive(Debug)]
pub struct Exchange {
    method: String,
    path: String,
    body_size: Option<usize>,
    started: Instant,
}

impl Exchange {
    /// Start timing a request and log that it is being sent.
    pub fn begin(
        method: impl Into<String>,
        path: impl Into<String>,
        body_size: Option<usize>,
    ) -> Self {
        let exchange = Self {
            method: method.into(),
            path: path.into(),
            body_size,
            started: Instant::now(),
        };
        debug!(
            method = %exchange.method,
            path = %exchange.path,
            body_size = exchange.body_size,
            "Sending HTTP request"
        );
        exchange
    }

    /// Time since the first attempt started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Log a retry about to happen after `delay`.
    pub fn retrying(&self, attempt: u32, delay: Duration, reason: &dyn std::fmt::Display) {
        debug!(
            path = %self.path,
            attempt,
            delay_ms = delay.as_millis(),
            reason = %reason,
            "Retrying request"
        );
    }

    /// Log the final response.
    pub fn finish(&self, status: u16, response_size: usize, retries: u32) {
        let elapsed_ms = self.elapsed().as_millis();
        if (200..300).contains(&status) {
            info!(
                method = %self.method,
                path = %self.path,
                status,
                elapsed_ms,
                response_size,
                retries,
                "HTTP request succeeded"
            );
        } else {
            warn!(
                method = %self.method,
                path = %self.path,
                status,
                elapsed_ms,
                response_size,
                retries,
                "HTTP request failed"
            );
        }
    }
}

/// Log a request rejected before it was sent.
pub fn log_validation_error(field: &str, reason: &str) {
    debug!(field = %field, reason = %reason, "Request validation failed");
}
