use async_trait::async_trait;

use crate::error::LlmError;
use crate::types::ChatRequest;

/// A chat-completion backend. Implementations own their transport and
/// authentication; callers hand over a request and get the assistant's
/// text back.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Short human-readable name used in logs.
    fn name(&self) -> &'static str;

    /// Run one chat completion and return the assistant message content.
    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;

    /// Cheap reachability check run once before a batch. Backends with no
    /// meaningful probe succeed by default.
    async fn preflight(&self) -> Result<(), LlmError> {
        Ok(())
    }
}
