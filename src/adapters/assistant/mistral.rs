//! Mistral Assistant - free-form answers via the chat completions API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ports::{AssistantError, AssistantService};

/// System prompt keeping the assistant on the car-insurance workflow.
const SYSTEM_PROMPT: &str = "\
You are an intelligent, friendly, and professional car insurance assistant \
working inside a Telegram bot. Your main goal is to guide users through the \
process of purchasing car insurance in a smooth, polite, and helpful manner.

If the user asks about unrelated topics (like weather, sports, jokes, or \
politics), respond politely and redirect the conversation back to car \
insurance. Do not say you can't help with that; lightly acknowledge the \
question and transition back with friendly phrasing.

Be empathetic, concise, and helpful. Always assume the user may not be \
tech-savvy. Use short, clear messages. Never give legal or financial advice. \
If there's an error (e.g., image unreadable), explain kindly and ask the user \
to try again.

Always try to return the conversation to one of these goals: collect \
documents, confirm extracted data, finalize pricing, deliver the policy, or \
offer polite support.";

/// Configuration for the Mistral client.
#[derive(Debug, Clone)]
pub struct MistralConfig {
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl MistralConfig {
    /// Creates a configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "mistral-small-latest".to_string(),
            base_url: "https://api.mistral.ai/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Mistral implementation of [`AssistantService`].
pub struct MistralAssistant {
    config: MistralConfig,
    client: Client,
}

impl MistralAssistant {
    /// Creates a new client with the given configuration.
    pub fn new(config: MistralConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl AssistantService for MistralAssistant {
    async fn ask(&self, prompt: &str) -> Result<String, AssistantError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: 0.6,
            max_tokens: 512,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| AssistantError::Unavailable(e.to_string()))?;

        let status = response.status();
        debug!(status = %status, "mistral completion response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Rejected(format!("{}: {}", status, body)));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Unavailable(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AssistantError::EmptyAnswer)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
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
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}
