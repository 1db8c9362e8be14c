use reqwest::Client;
use tracing::debug;

use crate::error::LlmError;
use crate::traits::ChatBackend;
use crate::types::{ChatRequest, ChatResponse};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:1234";

/// Client for a local LM Studio server speaking the OpenAI-compatible
/// chat API. No authentication.
pub struct LmStudio {
    http: Client,
    base_url: String,
}

impl LmStudio {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!(
                "LM Studio API error {status}: {body}"
            )));
        }

        Ok(response.json::<ChatResponse>().await?)
    }
}

impl Default for LmStudio {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl ChatBackend for LmStudio {
    fn name(&self) -> &'static str {
        "lm-studio"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let response = self.chat(request).await?;
        response
            .content()
            .ok_or_else(|| LlmError::Api("No response content from LM Studio".to_string()))
    }

    /// LM Studio only answers once a model is loaded, so probe the model
    /// listing before committing to a batch.
    async fn preflight(&self) -> Result<(), LlmError> {
        let url = format!("{}/v1/models", self.base_url);
        debug!(%url, "Checking LM Studio connectivity");

        let response = self.http.get(&url).send().await.map_err(|e| {
            LlmError::Network(format!(
                "Cannot connect to LM Studio at {}: {e}",
                self.base_url
            ))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Api(format!(
                "LM Studio responded {status} at {url}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = LmStudio::new("http://127.0.0.1:1234/");
        assert_eq!(client.base_url(), "http://127.0.0.1:1234");
    }

    #[test]
    fn default_points_at_local_server() {
        let client = LmStudio::default();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }
}
