//! nilAI API client implementation.
//!
//! Speaks the OpenAI-compatible `/chat/completions` wire format. Sampling
//! parameters are fixed constants: all three pipeline stages must see the
//! same decoding behavior, so they are part of the client rather than
//! per-call options.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::error::{classify_transport_error, ReasonerError, ReasonerErrorKind};
use super::{ChatMessage, LlmClient};

const TEMPERATURE: f64 = 0.2;
const TOP_P: f64 = 0.95;
const MAX_TOKENS: u64 = 2048;

/// nilAI chat-completions client. One outbound call per `complete`, no
/// retries, no caching.
pub struct NilaiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl NilaiClient {
    /// Create a new client.
    ///
    /// `base_url` is the API root; `/chat/completions` is appended per
    /// request. The timeout applies to the whole round-trip.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    fn build_request(&self, messages: &[ChatMessage]) -> NilaiRequest {
        NilaiRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_tokens: MAX_TOKENS,
            stream: false,
        }
    }
}

#[async_trait]
impl LlmClient for NilaiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, ReasonerError> {
        let request = self.build_request(messages);

        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            "Sending completion request to nilAI"
        );

        let response = self
            .client
            .post(self.completions_url())
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| match classify_transport_error(&e) {
                ReasonerErrorKind::Timeout => {
                    ReasonerError::timeout(format!("Request timeout: {}", e))
                }
                _ => ReasonerError::network(format!("Request failed: {}", e)),
            })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(ReasonerError::http(status.as_u16(), body));
        }

        let parsed: NilaiResponse = serde_json::from_str(&body).map_err(|e| {
            ReasonerError::malformed(format!("Failed to parse response: {}, body: {}", e, body))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ReasonerError::malformed("No completion content in response".to_string()))
    }
}

/// nilAI API request format (OpenAI-compatible).
#[derive(Debug, Serialize)]
struct NilaiRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    top_p: f64,
    max_tokens: u64,
    stream: bool,
}

/// nilAI API response format.
#[derive(Debug, Deserialize)]
struct NilaiResponse {
    choices: Vec<NilaiChoice>,
}

/// A choice in the nilAI response.
#[derive(Debug, Deserialize)]
struct NilaiChoice {
    message: NilaiMessage,
}

/// Message in a nilAI response choice.
#[derive(Debug, Deserialize)]
struct NilaiMessage {
    content: Option<String>,
}
