use crate::config::GeneratorConfig;
use crate::models::*;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// A text-completion backend: prompt in, free text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Whether credentials are present; checked before any call is attempted.
    fn is_configured(&self) -> bool {
        true
    }
}

pub struct GeminiService {
    client: Client,
    config: GeneratorConfig,
}

impl GeminiService {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.model_name,
            api_key
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiService {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("GEMINI_API_KEY environment variable not set"))?;

        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
            }),
        };

        log::info!("Sending request to Gemini model {}", self.config.model_name);

        let response = self.client
            .post(self.endpoint(api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Gemini API error ({}): {}", status, error_text);
            return Err(match status {
                StatusCode::NOT_FOUND => {
                    anyhow::anyhow!("Gemini model not available. Please check API configuration.")
                }
                StatusCode::FORBIDDEN => {
                    anyhow::anyhow!("Gemini API key invalid or quota exceeded.")
                }
                _ => anyhow::anyhow!("Gemini API error: {}", error_text),
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        gemini_response
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("Gemini returned no candidates"))
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}
