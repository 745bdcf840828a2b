//! Gemini `generateContent` client.
//!
//! Sends a single-turn prompt with a fixed decoding configuration and reads
//! back `candidates[0].content.parts[0].text`. Every failure mode (transport,
//! non-2xx status, unexpected body) is returned as a [`GenerationError`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::{GenerationConfig, GenerationError, Generator};

/// Longest error body kept in [`GenerationError::Status`]
const MAX_ERROR_BODY_CHARS: usize = 512;

// =============================================================================
// API Request/Response Types
// =============================================================================

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: RequestConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
    stop_sequences: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GenerateRequest {
    pub fn new(prompt: &str, config: &GenerationConfig) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: RequestConfig {
                temperature: config.temperature,
                top_k: config.top_k,
                top_p: config.top_p,
                max_output_tokens: config.max_output_tokens,
                stop_sequences: Vec::new(),
            },
        }
    }
}

/// Extract the first candidate's text from a raw response body
pub fn parse_response(body: &str) -> Result<String, GenerationError> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::MalformedResponse("no candidates".to_string()))?;

    let part = candidate
        .content
        .parts
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::MalformedResponse("candidate has no parts".to_string()))?;

    match part.text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(GenerationError::EmptyResponse),
        None => Err(GenerationError::MalformedResponse(
            "first part has no text".to_string(),
        )),
    }
}

// =============================================================================
// Client
// =============================================================================

/// Gemini text-generation client
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    config: GenerationConfig,
}

impl GeminiClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            config: GenerationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Endpoints written as `...?key=` get the key appended verbatim,
    /// anything else receives it as a `key` query parameter.
    fn request(&self) -> reqwest::RequestBuilder {
        if self.endpoint.ends_with("key=") {
            self.http.post(format!("{}{}", self.endpoint, self.api_key))
        } else {
            self.http
                .post(&self.endpoint)
                .query(&[("key", self.api_key.as_str())])
        }
    }
}

#[async_trait]
impl Generator for GeminiClient {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        debug!(
            backend = self.name(),
            prompt_len = prompt.len(),
            "Sending generation request"
        );

        let started = Instant::now();
        let body = GenerateRequest::new(prompt, &self.config);
        let response = self.request().json(&body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        debug!(
            status = status.as_u16(),
            duration_secs = started.elapsed().as_secs_f64(),
            "Generation response received"
        );

        if !status.is_success() {
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        parse_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let config = GenerationConfig::default();
        let request = GenerateRequest::new("List three Rust traits", &config);
        let wire = serde_json::to_string(&request).unwrap();
        let value: serde_json::Value = serde_json::from_str(&wire).unwrap();

        assert_eq!(
            value,
            json!({
                "contents": [{"parts": [{"text": "List three Rust traits"}]}],
                "generationConfig": {
                    "temperature": 0.7,
                    "topK": 1,
                    "topP": 1.0,
                    "maxOutputTokens": 1024,
                    "stopSequences": []
                }
            })
        );
    }

    #[test]
    fn test_parse_response_reads_first_candidate() {
        let body = r#"{"candidates":[
            {"content":{"parts":[{"text":"1. What is a closure?"},{"text":"ignored"}],"role":"model"}},
            {"content":{"parts":[{"text":"second candidate"}]}}
        ]}"#;

        assert_eq!(parse_response(body).unwrap(), "1. What is a closure?");
    }

    #[test]
    fn test_parse_response_rejects_missing_candidates() {
        let err = parse_response(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));

        let err = parse_response(r#"{"candidates":[]}"#).unwrap_err();
        assert_eq!(
            err,
            GenerationError::MalformedResponse("no candidates".to_string())
        );
    }

    #[test]
    fn test_parse_response_rejects_missing_text() {
        let err = parse_response(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));

        let err = parse_response(r#"{"candidates":[{"content":{"parts":[{"inlineData":{}}]}}]}"#)
            .unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));

        let err = parse_response("not json").unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn test_parse_response_blank_text() {
        let err = parse_response(r#"{"candidates":[{"content":{"parts":[{"text":"  \n"}]}}]}"#)
            .unwrap_err();
        assert_eq!(err, GenerationError::EmptyResponse);
    }

    #[test]
    fn test_error_messages_are_readable() {
        let err = GenerationError::Status {
            status: 429,
            body: "quota exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Generation endpoint returned 429: quota exceeded"
        );
    }
}
