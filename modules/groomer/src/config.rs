use anyhow::Result;

/// Application configuration loaded from environment variables. Every
/// value has a default except the Copilot credential, which is only
/// required when the Copilot backend is selected.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Local model server
    pub lm_studio_url: String,
    pub lm_studio_model: String,

    // Copilot API
    pub copilot_api_url: String,
    pub copilot_api_key: Option<String>,
    pub copilot_model: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let lm_studio_url = std::env::var("LM_STUDIO_URL")
            .unwrap_or_else(|_| llm_client::lmstudio::DEFAULT_BASE_URL.to_string());
        // Accepts either the bare host or a full chat-completions URL.
        let lm_studio_url = lm_studio_url
            .trim_end_matches("/v1/chat/completions")
            .trim_end_matches('/')
            .to_string();

        let config = Self {
            lm_studio_url,
            lm_studio_model: std::env::var("LM_STUDIO_MODEL")
                .unwrap_or_else(|_| "local-model".to_string()),
            copilot_api_url: std::env::var("COPILOT_API_URL")
                .unwrap_or_else(|_| llm_client::copilot::DEFAULT_ENDPOINT.to_string()),
            copilot_api_key: std::env::var("COPILOT_API_KEY").ok(),
            copilot_model: std::env::var("COPILOT_MODEL").unwrap_or_else(|_| "gpt-4".to_string()),
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => {
                    let n = v.len().min(5);
                    format!("{}...({} chars)", &v[..n], v.len())
                }
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  LM_STUDIO_URL: {}", self.lm_studio_url);
        tracing::info!("  LM_STUDIO_MODEL: {}", self.lm_studio_model);
        tracing::info!("  COPILOT_API_URL: {}", self.copilot_api_url);
        tracing::info!("  COPILOT_API_KEY: {}", preview_opt(&self.copilot_api_key));
        tracing::info!("  COPILOT_MODEL: {}", self.copilot_model);
    }
}
