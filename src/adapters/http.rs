use crate::core::itinerary::{ItineraryRequest, SYSTEM_PROMPT};
use crate::domain::ports::{ConfigProvider, ItineraryGenerator};
use crate::utils::error::{PlannerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Chat-completions client for any OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiGenerator {
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

impl OpenAiGenerator {
    pub fn new(api_key: Option<String>, base_url: &str, model: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            temperature: 0.7,
            max_tokens: 1000,
            client: Client::new(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            api_key: config.api_key().map(str::to_string),
            base_url: config.api_endpoint().trim_end_matches('/').to_string(),
            model: config.model().to_string(),
            temperature: config.temperature(),
            max_tokens: config.max_tokens(),
            client: builder.build()?,
        })
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn credential(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| PlannerError::CredentialMissing {
                variable: API_KEY_VAR.to_string(),
            })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[async_trait]
impl ItineraryGenerator for OpenAiGenerator {
    async fn generate(&self, request: &ItineraryRequest) -> Result<String> {
        let api_key = self.credential()?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.prompt(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        tracing::debug!("Posting chat completion to {}", self.endpoint());
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| PlannerError::generation(format!("request failed: {}", e)))?;

        let status = response.status();
        tracing::debug!("Chat completion status: {}", status);
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            tracing::warn!("Itinerary API returned {}", status);
            return Err(PlannerError::generation(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| PlannerError::generation(format!("invalid response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| PlannerError::generation("response contained no choices"))
    }
}
