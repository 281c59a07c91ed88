//! Google Gemini `generateContent` client

use super::{LanguageModel, LlmError, LlmReply};
use crate::network::HttpClient;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Gemini model reached over the REST API
pub struct GeminiModel {
    client: HttpClient,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f64,
}

impl GeminiModel {
    pub fn new(
        client: HttpClient,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        temperature: f64,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
            temperature,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text parts of the first candidate, joined
    fn into_text(self) -> Option<String> {
        let parts = self.candidates.into_iter().next()?.content?.parts;
        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[async_trait]
impl LanguageModel for GeminiModel {
    fn name(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, prompt: &str) -> Result<LlmReply, LlmError> {
        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {"temperature": self.temperature}
        });

        debug!("Invoking {} with a {} byte prompt", self.model, prompt.len());

        let response = self
            .client
            .post_json(&self.url(), &[("x-goog-api-key", self.api_key.as_str())], &body)
            .await
            .map_err(|e| LlmError::Request(e.to_string()))?;

        if !response.is_success() {
            return Err(LlmError::Status {
                status: response.status,
                body: response.text,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| LlmError::Decode(e.to_string()))?;

        parsed.into_text().map(LlmReply::new).ok_or(LlmError::Empty)
    }
}
