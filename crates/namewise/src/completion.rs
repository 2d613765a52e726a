//! Seam between the handler and the completion service

use async_trait::async_trait;
use namewise_llm::{Client, Message, MessageRequest};

/// Something that can answer a message request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Run one completion.
    async fn complete(&self, request: MessageRequest) -> namewise_llm::Result<Message>;
}

#[async_trait]
impl CompletionService for Client {
    async fn complete(&self, request: MessageRequest) -> namewise_llm::Result<Message> {
        self.messages().create(request).await
    }
}
