//! Common test utilities and helpers

use std::path::Path;
use std::sync::Arc;

use namewise::{Handler, HandlerConfig};
use namewise_llm::{Client, ClientConfig};
use wiremock::MockServer;

/// Load a response fixture
#[allow(dead_code)]
pub fn load_response_fixture(name: &str) -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let path = Path::new(manifest_dir)
        .join("tests")
        .join("fixtures")
        .join("responses")
        .join(format!("{}.json", name));

    std::fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "Failed to load response fixture '{}' from {:?}: {}",
            name, path, e
        )
    })
}

/// Create a test API key
#[allow(dead_code)]
pub fn test_api_key() -> String {
    "sk-test-key-01234567890123456789012345678901234567890123456789".to_string()
}

/// Handler wired to a real client pointed at the mock server.
#[allow(dead_code)]
pub fn handler_for(server: &MockServer, config: &HandlerConfig) -> Handler {
    let base = ClientConfig {
        base_url: Some(server.uri()),
        ..ClientConfig::with_api_key(test_api_key())
    };
    let client = Client::from_config(config.client_config(base)).expect("Failed to build client");
    Handler::new(Arc::new(client), config).expect("Failed to build handler")
}

/// Envelope JSON carrying a string-encoded request body.
#[allow(dead_code)]
pub fn envelope(text: &str, local_time: &str, date_format: &str, filename_format: &str) -> String {
    let body = serde_json::json!({
        "text": text,
        "local_time": local_time,
        "date_format": date_format,
        "filename_format": filename_format,
    });
    serde_json::json!({ "body": body.to_string() }).to_string()
}
