//! Request handler: validate, generate, format, assemble

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::completion::CompletionService;
use crate::config::HandlerConfig;
use crate::error::{ConfigError, GenerationError, HandlerError, Result};
use crate::prompt::{PromptComposer, PromptRules};
use crate::request::{Event, RawRequest};
use crate::response::Response;

/// Serves filename requests.
///
/// Cheap to share: the completion service sits behind an `Arc` and the
/// rendered prompt is read-only after construction.
#[derive(Clone)]
pub struct Handler {
    service: Arc<dyn CompletionService>,
    composer: PromptComposer,
}

impl std::fmt::Debug for Handler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handler")
            .field("prompt_version", &self.composer.version())
            .finish_non_exhaustive()
    }
}

impl Handler {
    /// Build a handler, loading prompt rules as the configuration says.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt rules cannot be read or are invalid.
    pub fn new(
        service: Arc<dyn CompletionService>,
        config: &HandlerConfig,
    ) -> std::result::Result<Self, ConfigError> {
        let rules = PromptRules::load(config.prompt_path.as_deref())?;
        Ok(Self::with_rules(service, &rules, config))
    }

    /// Build a handler from already loaded rules.
    pub fn with_rules(
        service: Arc<dyn CompletionService>,
        rules: &PromptRules,
        config: &HandlerConfig,
    ) -> Self {
        Self {
            service,
            composer: PromptComposer::new(rules, config),
        }
    }

    /// Serve one invocation. Never fails: errors become 500 responses.
    #[tracing::instrument(skip(self, event), fields(prompt_version = %self.composer.version()))]
    pub async fn handle(&self, event: Event) -> Response {
        let start = Instant::now();

        let result = match event.request() {
            Ok(request) => self.generate(request).await,
            Err(err) => Err(err.into()),
        };

        let elapsed = start.elapsed();
        match result {
            Ok(filename) => {
                info!(elapsed_ms = elapsed.as_millis(), %filename, "Filename generated");
                Response::ok(filename)
            }
            Err(err) => {
                match &err {
                    HandlerError::Validation(cause) => {
                        warn!(elapsed_ms = elapsed.as_millis(), error = %cause, "Request rejected");
                    }
                    HandlerError::Generation(cause) => {
                        error!(elapsed_ms = elapsed.as_millis(), error = %cause, "Filename generation failed");
                    }
                }
                Response::from(&err)
            }
        }
    }

    /// Serve an invocation given as a raw envelope document.
    pub async fn handle_json(&self, raw: &str) -> Response {
        match Event::from_json(raw) {
            Ok(event) => self.handle(event).await,
            Err(err) => {
                warn!(error = %err, "Envelope rejected");
                Response::from(&HandlerError::from(err))
            }
        }
    }

    /// Validate a request and produce the final filename.
    ///
    /// # Errors
    ///
    /// Returns a validation error before anything is sent to the completion
    /// service, or a generation error if no usable filename comes back.
    pub async fn generate(&self, request: RawRequest) -> Result<String> {
        let request = request.validate()?;

        let filename = self.generate_filename(&request.content).await?;
        let date = request.formatted_date();

        Ok(request.filename_format.assemble(&filename, &date))
    }

    async fn generate_filename(&self, content: &str) -> Result<String> {
        let request = self.composer.compose(content)?;
        let message = self.service.complete(request).await?;

        debug!(
            stop_reason = ?message.stop_reason,
            block_count = message.content.len(),
            "Completion received"
        );

        message
            .first_text()
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| GenerationError::EmptyCompletion.into())
    }
}
