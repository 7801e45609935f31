//! Text generation client used by the generative fallback tier
//!
//! The tier only needs "prompt in, prose out", so the provider sits behind
//! the [`TextGenerator`] trait and tests can substitute canned text.

use async_trait::async_trait;
use rig::client::CompletionClient;
use rig::completion::Prompt;
use rig::providers::gemini;

/// System preamble for every generation request
const GENERATION_PREAMBLE: &str = "You produce illustrative data for a public dashboard about \
women's safety in public transportation in India. Always answer with a single JSON object \
that matches the requested structure exactly. Do not add fields that were not requested.";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Failed to create generation client: {0}")]
    Client(String),

    #[error("Generation request failed: {0}")]
    Request(String),
}

/// Anything that turns a prompt into free text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Gemini-backed generator
#[derive(Clone)]
pub struct GeminiGenerator {
    client: gemini::Client,
    model: String,
}

impl GeminiGenerator {
    /// Create a new generator with the provided API key
    pub fn new(api_key: &str, model: impl Into<String>) -> Result<Self, GenerationError> {
        let client = gemini::Client::new(api_key)
            .map_err(|e| GenerationError::Client(format!("Failed to create Gemini client: {}", e)))?;

        Ok(Self {
            client,
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let start_time = std::time::Instant::now();

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Initiating Gemini API call"
        );

        let agent = self
            .client
            .agent(&self.model)
            .preamble(GENERATION_PREAMBLE)
            .temperature(0.4)
            .build();

        match agent.prompt(prompt).await {
            Ok(text) => {
                tracing::info!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    response_length = text.len(),
                    "Gemini API call completed successfully"
                );
                Ok(text)
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Gemini API call failed"
                );
                Err(GenerationError::Request(e.to_string()))
            }
        }
    }
}
