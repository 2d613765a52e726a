//! Serve one filename invocation.
//!
//! Reads an envelope document from stdin and prints the response document to
//! stdout. Logs go to stderr; set `RUST_LOG` to change verbosity.

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use namewise::{Handler, HandlerConfig};
use namewise_llm::{Client, ClientConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = HandlerConfig::from_env().context("invalid handler configuration")?;
    let client_config = ClientConfig::from_env().context("invalid client configuration")?;
    let client = Client::from_config(config.client_config(client_config))
        .context("failed to build completion client")?;
    let handler = Handler::new(Arc::new(client), &config).context("failed to load prompt rules")?;

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read invocation from stdin")?;

    let response = handler.handle_json(&raw).await;
    println!("{}", serde_json::to_string(&response)?);

    Ok(())
}
