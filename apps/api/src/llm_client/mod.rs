/// LLM Client — the model-inference collaborator used by the coach pipeline.
///
/// Callers depend only on the `TextGenerator` trait: `(prompt, max_new_tokens) -> text`.
/// The default backend is the Hugging Face Inference API; tests swap in a fake.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Model unavailable after {retries} retries")]
    Unavailable { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Text-generation capability the core depends on.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

/// The inference API answers with a list of generations, a single generation,
/// or an error object (e.g. while the model is loading).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Batch(Vec<Generation>),
    Single(Generation),
    Error { error: String },
}

/// Hugging Face Inference API client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    endpoint: String,
    api_token: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.inference_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!(
                "{}/{}",
                config.inference_base_url.trim_end_matches('/'),
                config.hf_model
            ),
            api_token: config.hf_api_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    /// Retries on 429 and 5xx (503 means the model is still loading) with exponential backoff.
    async fn generate(&self, prompt: &str, max_new_tokens: u32) -> Result<String, LlmError> {
        let request_body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens,
                return_full_text: false,
            },
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Inference attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_token)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 || status.is_server_error() {
                warn!("Inference API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: error_message(&body),
                });
                continue;
            }

            if !status.is_success() {
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: error_message(&body),
                });
            }

            let text = extract_generated_text(&body)?;
            debug!(
                "Inference call succeeded: prompt_chars={}, output_chars={}",
                prompt.len(),
                text.len()
            );
            return Ok(text);
        }

        Err(last_error.unwrap_or(LlmError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

/// Pulls the first generation out of a successful response body, trimmed.
fn extract_generated_text(body: &str) -> Result<String, LlmError> {
    let generated = match serde_json::from_str::<InferenceResponse>(body)? {
        InferenceResponse::Batch(generations) => generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or(LlmError::EmptyContent)?,
        InferenceResponse::Single(generation) => generation.generated_text,
        InferenceResponse::Error { error } => {
            return Err(LlmError::Api {
                status: 200,
                message: error,
            })
        }
    };

    let trimmed = generated.trim();
    if trimmed.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(trimmed.to_string())
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<InferenceResponse>(body) {
        Ok(InferenceResponse::Error { error }) => error,
        _ => body.to_string(),
    }
}
