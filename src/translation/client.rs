use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

use crate::app_config::TranslationConfig;
use crate::errors::TranslationError;
use crate::language_utils::TargetLanguage;

/// Common trait for translation backends
///
/// This is the seam between the orchestrator and the network: production
/// uses the chat-completion client below, tests substitute mocks. Callers
/// needing retry or batching wrap this trait; the core stays single-flight.
#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate one text unit into the target language
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `target` - Target language
    ///
    /// # Returns
    /// * `Result<String, TranslationError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<String, TranslationError>;
}

/// Chat message object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system or user)
    pub role: String,
    /// Content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a message with the given role
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Chat-completion request body
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model name to use for generation
    model: String,
    /// Messages of the conversation
    messages: Vec<ChatMessage>,
    /// Maximum number of completion tokens
    max_tokens: u32,
    /// Temperature for generation
    temperature: f32,
}

/// Builder methods for ChatCompletionRequest - API surface for library consumers
#[allow(dead_code)]
impl ChatCompletionRequest {
    /// Create a new chat-completion request
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            max_tokens: 1000,
            temperature: 0.3,
        }
    }

    /// Append a message to the conversation
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage::new(role, content));
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the max completion tokens
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Chat-completion response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion choices; the first one carries the translation
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One completion choice
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatChoice {
    /// The generated message
    pub message: ChatResponseMessage,
}

/// Message part of a completion choice
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponseMessage {
    /// Role of the generated message, if reported
    #[serde(default)]
    pub role: Option<String>,
    /// Generated text content
    #[serde(default)]
    pub content: Option<String>,
}

/// Stateless chat-completion client issuing one request per text unit.
///
/// Deterministic low-temperature decoding keeps rerun variance down; there
/// is no caching, so identical text submitted twice issues two requests.
#[derive(Debug)]
pub struct ChatCompletionClient {
    /// Translation configuration (endpoint, key, model, decoding params)
    config: TranslationConfig,
    /// HTTP client for making requests
    client: Client,
}

impl ChatCompletionClient {
    /// Create a new client from explicit configuration
    pub fn new(config: TranslationConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();
        Self { config, client }
    }

    /// Render the system instruction for a target language
    fn system_prompt(&self, target: TargetLanguage) -> String {
        self.config
            .system_prompt
            .replace("{target_language}", target.display_name())
    }
}

#[async_trait]
impl Translator for ChatCompletionClient {
    async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<String, TranslationError> {
        // Blank input never goes over the wire
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        let request = ChatCompletionRequest::new(self.config.model.as_str())
            .add_message("system", self.system_prompt(target))
            .add_message("user", text)
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature);

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Translation API error ({}): {}", status, message);
            return Err(TranslationError::Api {
                status_code: status.as_u16(),
                message,
            });
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::MalformedResponse(e.to_string()))?;

        let choice = body.choices.into_iter().next().ok_or_else(|| {
            TranslationError::MalformedResponse("response contained no choices".to_string())
        })?;
        let content = choice.message.content.ok_or_else(|| {
            TranslationError::MalformedResponse("choice carried no message content".to_string())
        })?;

        debug!("Translated {} chars into {}", text.len(), target);
        Ok(content.trim().to_string())
    }
}
