use crate::ai::prompt::SYSTEM_PROMPT;
use crate::config::{AppConfig, API_KEY_VAR};
use crate::error::{FlashcardError, Result};
use async_trait::async_trait;
use openrouter_api::{
    models::provider_preferences::ProviderPreferences,
    models::provider_preferences::ProviderSort,
    types::chat::{ChatCompletionRequest, Message},
};
use std::time::Duration;

pub const DEFAULT_TEMPERATURE: f32 = 0.4;
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Anything that can turn a prompt into raw model text.
#[async_trait]
pub trait FlashcardGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;

    fn model(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl ModelConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: Some(DEFAULT_TEMPERATURE),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        }
    }
}

#[derive(Debug)]
pub struct OpenRouterClient {
    client: openrouter_api::OpenRouterClient<openrouter_api::Ready>,
    config: ModelConfig,
    timeout: Duration,
}

impl OpenRouterClient {
    /// Builds a client for the configured model using the credential held
    /// in `config`. Fails with an authentication error when there is none.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let Some(api_key) = config.api_key.as_deref() else {
            return Err(FlashcardError::Authentication(format!(
                "{} is not set",
                API_KEY_VAR
            )));
        };

        let client = openrouter_api::OpenRouterClient::from_api_key(api_key).map_err(|e| {
            FlashcardError::Authentication(format!("could not create OpenRouter client: {}", e))
        })?;

        Ok(Self {
            client,
            config: ModelConfig::new(config.model.clone()),
            timeout: config.timeout,
        })
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages = vec![
            Message::text("system", SYSTEM_PROMPT),
            Message::text("user", prompt),
        ];

        let provider = ProviderPreferences::new().with_sort(ProviderSort::Throughput);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            provider: Some(provider),
            stream: None,
            response_format: None,
            tools: None,
            tool_choice: None,
            models: None,
            transforms: None,
            route: None,
            user: None,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            top_p: None,
            top_k: None,
            frequency_penalty: None,
            presence_penalty: None,
            repetition_penalty: None,
            min_p: None,
            top_a: None,
            seed: None,
            stop: None,
            logit_bias: None,
            logprobs: None,
            top_logprobs: None,
            prediction: None,
            parallel_tool_calls: None,
            verbosity: None,
        };

        let response = self
            .client
            .chat()
            .map_err(|e| classify_api_error(&e.to_string()))?
            .chat_completion(request)
            .await
            .map_err(|e| classify_api_error(&e.to_string()))?;

        let Some(choice) = response.choices.first() else {
            return Err(FlashcardError::EmptyResponse);
        };

        let text = match &choice.message.content {
            openrouter_api::MessageContent::Text(text) => text.clone(),
            openrouter_api::MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|p| {
                    if let openrouter_api::ContentPart::Text(tc) = p {
                        Some(tc.text.clone())
                    } else {
                        None
                    }
                })
                .collect::<Vec<_>>()
                .join("\n"),
        };

        if text.trim().is_empty() {
            return Err(FlashcardError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl FlashcardGenerator for OpenRouterClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        tracing::debug!(
            "Requesting completion from {} ({} prompt chars)",
            self.config.model,
            prompt.len()
        );
        match tokio::time::timeout(self.timeout, self.complete(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(FlashcardError::Timeout(self.timeout.as_secs())),
        }
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

/// Maps a provider error message onto the error taxonomy. Rejected
/// credentials become authentication failures, everything else is a
/// generation failure.
pub fn classify_api_error(message: &str) -> FlashcardError {
    let lowered = message.to_ascii_lowercase();
    let auth_markers = [
        "401",
        "403",
        "unauthorized",
        "forbidden",
        "invalid api key",
        "no auth credentials",
    ];
    if auth_markers.iter().any(|m| lowered.contains(m)) {
        FlashcardError::Authentication(message.to_string())
    } else {
        FlashcardError::Generation(message.to_string())
    }
}

#[cfg(test)]
use std::sync::Mutex;

/// Scripted generator for tests: hands out queued results in order and
/// records every prompt it was given.
#[cfg(test)]
pub struct MockGenerator {
    responses: Mutex<std::collections::VecDeque<Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockGenerator {
    pub fn new(responses: Vec<Result<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![Ok(text.to_string())])
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl FlashcardGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(FlashcardError::EmptyResponse))
    }

    fn model(&self) -> &str {
        "mock/model"
    }
}
