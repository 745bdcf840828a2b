use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during a generation call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Failed to reach generation endpoint: {0}")]
    Transport(String),

    #[error("Generation endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed generation response: {0}")]
    MalformedResponse(String),

    #[error("Generation response contained no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Transport(err.to_string())
    }
}

/// Fixed decoding configuration sent with every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 1,
            top_p: 1.0,
            max_output_tokens: 1024,
        }
    }
}

impl GenerationConfig {
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }
}

/// The seam between the interview flow and a text-generation service.
///
/// Implementations make exactly one attempt per call and keep no session
/// data between calls, so a single instance may serve many sessions.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Human-readable name of the backend (e.g., "Gemini")
    fn name(&self) -> &str;

    /// Send `prompt` and return the first candidate's text, unparsed
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}
