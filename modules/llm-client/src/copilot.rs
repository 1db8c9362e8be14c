use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;

use crate::error::LlmError;
use crate::traits::ChatBackend;
use crate::types::{ChatRequest, ChatResponse};

pub const DEFAULT_ENDPOINT: &str = "https://api.githubcopilot.com/chat/completions";

/// Client for the GitHub Copilot chat-completions API.
pub struct Copilot {
    api_key: String,
    http: Client,
    endpoint: String,
}

impl Copilot {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_env() -> Result<Self, LlmError> {
        let api_key = std::env::var("COPILOT_API_KEY").map_err(|_| {
            LlmError::Config("COPILOT_API_KEY environment variable not set".to_string())
        })?;
        let endpoint =
            std::env::var("COPILOT_API_URL").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        Ok(Self::with_endpoint(api_key, endpoint))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers(&self) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| LlmError::Config(format!("Invalid API key: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let response = self
            .http
            .post(&self.endpoint)
            .headers(self.headers()?)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("Copilot API error {status}: {body}")));
        }

        Ok(response.json::<ChatResponse>().await?)
    }
}

#[async_trait::async_trait]
impl ChatBackend for Copilot {
    fn name(&self) -> &'static str {
        "copilot"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let response = self.chat(request).await?;
        response
            .content()
            .ok_or_else(|| LlmError::Api("No response content from Copilot".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_default_endpoint() {
        let client = Copilot::new("test-key");
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }

    #[test]
    fn with_endpoint_overrides_default() {
        let client = Copilot::with_endpoint("test-key", "https://example.com/chat");
        assert_eq!(client.endpoint(), "https://example.com/chat");
    }

    #[test]
    fn headers_carry_bearer_auth() {
        let client = Copilot::new("test-key");
        let headers = client.headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer test-key");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }
}
