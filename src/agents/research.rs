//! Findings extraction: search results in, structured findings out

use super::extract::{extract_findings, findings_from_unparsed};
use super::prompts::research_prompt;
use super::AgentError;
use crate::llm::LanguageModel;
use crate::results::Finding;
use crate::search::{SearchClient, SearchOptions, SearchPayload};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Agent that gathers information for a query
pub struct ResearchAgent {
    search: SearchClient,
    options: SearchOptions,
    model: Arc<dyn LanguageModel>,
}

impl ResearchAgent {
    pub fn new(search: SearchClient, options: SearchOptions, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            search,
            options,
            model,
        }
    }

    /// Search for `query` and extract findings from the results
    pub async fn research(&self, query: &str) -> Result<Vec<Finding>, AgentError> {
        info!("Starting research on query: {}", query);
        let raw_results = self.search.search(query, &self.options).await;
        self.extract(query, &raw_results).await
    }

    /// Turn a serialized result list into findings.
    ///
    /// Parse problems never surface: they degrade to findings built from
    /// the search results or from the raw text. Only a failed model call is
    /// an error.
    pub async fn extract(&self, query: &str, raw_results: &str) -> Result<Vec<Finding>, AgentError> {
        let payload = match SearchPayload::parse(raw_results) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to parse search results: {}", e);
                return Ok(findings_from_unparsed(raw_results));
            }
        };

        if let Some(ref message) = payload.error {
            warn!("Search reported an error: {}", message);
        }

        let prompt = research_prompt(query, &payload.results);
        let reply = self.model.invoke(&prompt).await.map_err(|e| {
            error!("Error during research: {}", e);
            AgentError::ResearchFailed(e.to_string())
        })?;

        let (findings, source) = extract_findings(&reply.content, &payload.results);
        info!(
            "Research completed with {} findings from {} ({})",
            findings.len(),
            source,
            self.model.name()
        );
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchSettings;
    use crate::llm::{LlmError, LlmReply};
    use crate::network::HttpClient;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedModel {
        reply: Result<String, String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LanguageModel for FixedModel {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn invoke(&self, _prompt: &str) -> Result<LlmReply, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                Ok(text) => Ok(LlmReply::new(text.clone())),
                Err(message) => Err(LlmError::Request(message.clone())),
            }
        }
    }

    fn agent(reply: Result<&str, &str>) -> (ResearchAgent, Arc<FixedModel>) {
        let model = Arc::new(FixedModel {
            reply: reply.map(String::from).map_err(String::from),
            calls: AtomicUsize::new(0),
        });
        let search = SearchClient::new(HttpClient::new().unwrap(), &SearchSettings::default());
        (
            ResearchAgent::new(search, SearchOptions::default(), model.clone()),
            model,
        )
    }

    #[tokio::test]
    async fn test_research_with_mock_search_and_garbage_reply() {
        let (agent, model) = agent(Ok("no json here"));
        let findings = agent.research("volcanoes").await.unwrap();

        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert_eq!(findings.len(), 3);
        assert!(findings.iter().all(|f| f.content.contains("volcanoes")));
        assert_eq!(findings[0].source_url, "https://example.com/article1");
    }

    #[tokio::test]
    async fn test_malformed_results_skip_the_model() {
        let (agent, model) = agent(Ok(r#"{"findings": [{"content": "x"}]}"#));
        let findings = agent.extract("q", "<<not json>>").await.unwrap();

        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        assert_eq!(findings, vec![Finding::unparsed("<<not json>>")]);
    }

    #[tokio::test]
    async fn test_error_payload_still_asks_the_model() {
        let (agent, model) = agent(Ok("sorry"));
        let findings = agent
            .extract("q", r#"{"error": "Search request failed", "results": []}"#)
            .await
            .unwrap();

        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert!(findings.is_empty());
    }

    #[tokio::test]
    async fn test_model_failure_is_research_failed() {
        let (agent, _) = agent(Err("quota exhausted"));
        let err = agent.research("q").await.unwrap_err();

        assert!(matches!(err, AgentError::ResearchFailed(_)));
        assert!(err.to_string().starts_with("Research failed:"));
        assert!(err.to_string().contains("quota exhausted"));
    }

    #[tokio::test]
    async fn test_mistyped_results_still_ask_the_model() {
        let (agent, model) = agent(Ok("no json here"));
        let findings = agent
            .extract(
                "q",
                r#"{"results": [{"title": "A", "url": "https://a", "content": "c", "score": "0.9"}, 7]}"#,
            )
            .await
            .unwrap();

        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].title, "A");
        assert_eq!(findings[0].source_url, "https://a");
        assert_eq!(findings[0].content, "c");
    }

    #[tokio::test]
    async fn test_malformed_results_with_stray_object_keep_raw_text() {
        let raw = r#"upstream said {"message": "bad gateway"} please retry"#;
        let (agent, model) = agent(Ok("unused"));
        let findings = agent.extract("q", raw).await.unwrap();

        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
        assert_eq!(findings, vec![Finding::unparsed(raw)]);
    }
}
