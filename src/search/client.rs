//! Search provider client

use super::mock::mock_results;
use super::models::{SearchOptions, SearchRequest};
use crate::config::{SearchSettings, PLACEHOLDER_SEARCH_KEY};
use crate::network::HttpClient;
use serde_json::json;
use tracing::{error, info, warn};

/// Client for the web search provider.
///
/// `search` never fails: every path ends in a serialized result list,
/// either the provider's payload, canned results, or `{error, results: []}`.
#[derive(Clone)]
pub struct SearchClient {
    client: HttpClient,
    endpoint: String,
    api_key: String,
}

/// Why a provider call did not produce a payload
enum Failure {
    /// 429 or 5xx: serve canned results instead
    Degraded(String),
    /// Anything else: serve an empty result list
    Fatal(String),
}

impl SearchClient {
    /// Create a new search client
    pub fn new(client: HttpClient, settings: &SearchSettings) -> Self {
        Self {
            client,
            endpoint: settings.endpoint.clone(),
            api_key: settings.api_key.clone(),
        }
    }

    /// Whether the configured credential is the placeholder sentinel
    pub fn is_mock(&self) -> bool {
        self.api_key == PLACEHOLDER_SEARCH_KEY
    }

    /// Run one search and return the payload serialized as JSON text
    pub async fn search(&self, query: &str, options: &SearchOptions) -> String {
        info!("Searching for: {}", query);

        if self.is_mock() {
            warn!("Using placeholder search API key, returning mock results");
            return Self::mock_results(query);
        }

        match self.request(query, options).await {
            Ok(payload) => {
                let count = payload
                    .get("results")
                    .and_then(|r| r.as_array())
                    .map(|r| r.len())
                    .unwrap_or(0);
                info!("Search returned {} results", count);
                render(&payload)
            }
            Err(Failure::Degraded(message)) => {
                warn!("{}, using mock results as fallback", message);
                Self::mock_results(query)
            }
            Err(Failure::Fatal(message)) => {
                error!("{}", message);
                render(&json!({ "error": message, "results": [] }))
            }
        }
    }

    /// Canned payload for `query`, serialized
    pub fn mock_results(query: &str) -> String {
        render(&mock_results(query))
    }

    async fn request(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<serde_json::Value, Failure> {
        let body = serde_json::to_value(SearchRequest::new(query, options))
            .map_err(|e| Failure::Fatal(e.to_string()))?;

        let response = self
            .client
            .post_json(
                &self.endpoint,
                &[
                    ("content-type", "application/json"),
                    ("x-api-key", self.api_key.as_str()),
                ],
                &body,
            )
            .await
            .map_err(|e| Failure::Fatal(format!("Search request failed: {}", e)))?;

        if response.is_rate_limited() || response.is_server_error() {
            return Err(Failure::Degraded(format!(
                "Search API returned status {}",
                response.status
            )));
        }
        if !response.is_success() {
            return Err(Failure::Fatal(format!(
                "Search request failed: HTTP {}: {}",
                response.status, response.text
            )));
        }

        response
            .json()
            .map_err(|e| Failure::Fatal(format!("Invalid search response: {}", e)))
    }
}

fn render(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
