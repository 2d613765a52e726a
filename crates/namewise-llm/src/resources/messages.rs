//! Messages API endpoint

use crate::{
    client::Client,
    error::Result,
    http::Method,
    types::{Message, MessageRequest, StopReason},
};
use tracing::{debug, info, warn};

const MESSAGES_PATH: &str = "/v1/messages";

/// Messages API resource.
#[derive(Clone)]
pub struct Messages {
    client: Client,
}

impl Messages {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a message and wait for the full completion.
    ///
    /// The request is validated locally first; an invalid request never
    /// reaches the network.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use namewise_llm::{Client, MessageRequest, Message, ModelTier};
    /// # async fn example(client: Client) -> Result<(), Box<dyn std::error::Error>> {
    /// let request = MessageRequest::builder()
    ///     .model(ModelTier::Comprehensive.model_id())
    ///     .max_tokens(2048u32)
    ///     .temperature(0.3f32)
    ///     .messages(vec![
    ///         Message::assistant("Name the file."),
    ///         Message::user("Quarterly report, Q3 2023 ..."),
    ///     ])
    ///     .build()?;
    ///
    /// let message = client.messages().create(request).await?;
    /// println!("{}", message.first_text().unwrap_or_default());
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self, request), fields(model = %request.model, max_tokens = request.max_tokens, message_count = request.messages.len()))]
    pub async fn create(&self, request: MessageRequest) -> Result<Message> {
        crate::validation::validate_message_request(&request).inspect_err(|e| {
            warn!(error = %e, "Request validation failed");
        })?;

        debug!(provider = self.client.provider().provider_name(), "Sending message request");

        let response = match self
            .client
            .provider()
            .request(Method::POST, MESSAGES_PATH, Some(&request))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Message request did not complete");
                return Err(e);
            }
        };

        let retries = response.retries_taken();
        let elapsed_ms = response.elapsed().as_millis();
        let request_id = response.request_id().map(str::to_owned);

        match response.parse_result::<Message>() {
            Ok(message) => {
                if message.stop_reason == Some(StopReason::Refusal) {
                    warn!(request_id = ?request_id, "Model declined the request");
                }
                info!(
                    elapsed_ms,
                    retries,
                    request_id = ?request_id,
                    stop_reason = ?message.stop_reason,
                    input_tokens = message.usage.input_tokens,
                    output_tokens = message.usage.output_tokens,
                    "Message created"
                );
                Ok(message)
            }
            Err(e) => {
                warn!(elapsed_ms, retries, request_id = ?request_id, error = %e, "Message creation failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HeaderMap, HttpProvider, Response, StatusCode};
    use crate::types::Role;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Provider that records what it was sent and answers with a fixed body.
    #[derive(Debug)]
    struct CannedProvider {
        status: StatusCode,
        body: &'static str,
        sent: Mutex<Vec<(Method, String, serde_json::Value)>>,
    }

    impl CannedProvider {
        fn new(status: StatusCode, body: &'static str) -> Arc<Self> {
            Arc::new(Self {
                status,
                body,
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl HttpProvider for CannedProvider {
        async fn request(
            &self,
            method: Method,
            path: &str,
            body: Option<&(dyn erased_serde::Serialize + Send + Sync)>,
        ) -> Result<Response> {
            let body = match body {
                Some(body) => serde_json::to_value(body)?,
                None => serde_json::Value::Null,
            };
            self.sent
                .lock()
                .unwrap()
                .push((method, path.to_string(), body));
            Ok(Response::new(
                self.status,
                HeaderMap::new(),
                self.body.as_bytes().to_vec(),
            ))
        }

        fn provider_name(&self) -> &'static str {
            "canned"
        }

        fn base_url(&self) -> &str {
            "http://canned.invalid/"
        }
    }

    const SUCCESS: &str = r#"{
        "id": "msg_1", "type": "message", "role": "assistant",
        "content": [{"type": "text", "text": "High Output Management - Andrew Grove"}],
        "model": "claude-3-5-sonnet-20241022", "stop_reason": "end_turn",
        "stop_sequence": null, "usage": {"input_tokens": 900, "output_tokens": 9}
    }"#;

    fn request() -> MessageRequest {
        MessageRequest::builder()
            .model("claude-3-5-sonnet-20241022")
            .max_tokens(2048u32)
            .messages(vec![
                Message::assistant("Name the file."),
                Message::user("Chapter 1. The Basics of Production"),
            ])
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_posts_serialized_request() {
        let provider = CannedProvider::new(StatusCode::OK, SUCCESS);
        let client = Client::from_provider(provider.clone());

        let message = client.messages().create(request()).await.unwrap();
        assert_eq!(message.first_text(), Some("High Output Management - Andrew Grove"));
        assert_eq!(message.role, Role::Assistant);

        let sent = provider.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (method, path, body) = &sent[0];
        assert_eq!(*method, Method::POST);
        assert_eq!(path, "/v1/messages");
        assert_eq!(body["messages"][0]["role"], "assistant");
        assert_eq!(body["messages"][1]["content"][0]["type"], "text");
        let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["max_tokens", "messages", "model"]);
    }

    #[tokio::test]
    async fn test_create_maps_error_status() {
        let provider = CannedProvider::new(
            StatusCode::BAD_REQUEST,
            r#"{"type":"error","error":{"type":"invalid_request_error","message":"messages: empty"}}"#,
        );
        let client = Client::from_provider(provider);

        let err = client.messages().create(request()).await.unwrap_err();
        assert!(matches!(err, crate::Error::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_create_skips_provider_for_invalid_request() {
        let provider = CannedProvider::new(StatusCode::OK, SUCCESS);
        let client = Client::from_provider(provider.clone());

        let mut invalid = request();
        invalid.messages.clear();

        assert!(client.messages().create(invalid).await.is_err());
        assert!(provider.sent.lock().unwrap().is_empty());
    }
}
