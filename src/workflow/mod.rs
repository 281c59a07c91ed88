//! Research workflow orchestration
//!
//! Runs the research stage, then the drafting stage, one after the other.
//! Any failure ends the run as a single `WorkflowError`; partial results are
//! logged, never returned.

use crate::agents::{DraftingAgent, ResearchAgent};
use crate::config::Settings;
use crate::llm::{GeminiModel, LanguageModel};
use crate::network::HttpClient;
use crate::results::Finding;
use crate::search::{SearchClient, SearchOptions};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// The only error callers of the workflow see
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Research workflow failed: {0}")]
    Failed(String),
}

/// Findings plus the drafted answer
pub type WorkflowOutput = (Vec<Finding>, String);

/// Two-stage research pipeline
pub struct ResearchWorkflow {
    research: ResearchAgent,
    drafting: DraftingAgent,
}

impl ResearchWorkflow {
    pub fn new(research: ResearchAgent, drafting: DraftingAgent) -> Self {
        Self { research, drafting }
    }

    /// Build the workflow against the configured search provider and Gemini
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let client = HttpClient::with_settings(&settings.outgoing)?;
        let api_key = settings
            .llm
            .api_key
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Missing API keys: GOOGLE_API_KEY is not set"))?;

        let model = |name: &str| -> Arc<dyn LanguageModel> {
            Arc::new(GeminiModel::new(
                client.clone(),
                settings.llm.endpoint.clone(),
                name,
                api_key.clone(),
                settings.llm.temperature,
            ))
        };

        let search = SearchClient::new(client.clone(), &settings.search);
        let options = SearchOptions::new(&settings.search.depth, settings.search.max_results);

        Ok(Self::new(
            ResearchAgent::new(search, options, model(&settings.llm.research_model)),
            DraftingAgent::new(model(&settings.llm.drafting_model)),
        ))
    }

    /// Run the complete workflow for a query
    pub async fn run(&self, query: &str) -> Result<WorkflowOutput, WorkflowError> {
        info!("Starting research workflow for query: {}", query);

        info!("Executing research step");
        let findings = self.research.research(query).await.map_err(|e| {
            error!("Error in research workflow: {}", e);
            WorkflowError::Failed(e.to_string())
        })?;
        info!("Research step produced {} findings", findings.len());

        info!("Executing drafting step");
        let draft = self
            .drafting
            .synthesize(query, &findings)
            .await
            .map_err(|e| {
                error!(
                    "Error in research workflow after {} findings: {}",
                    findings.len(),
                    e
                );
                WorkflowError::Failed(e.to_string())
            })?;
        info!("Draft completed successfully");

        Ok((findings, draft))
    }
}

/// Workflows over mock search and scripted model replies
#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::SearchSettings;
    use crate::llm::{LlmError, LlmReply};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replies with the queued results in order and records every prompt
    pub(crate) struct ScriptedModel {
        replies: Mutex<VecDeque<Result<String, String>>>,
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        pub(crate) fn new(replies: Vec<Result<&str, &str>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(
                    replies
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
                prompts: Mutex::new(vec![]),
            })
        }
    }

    #[async_trait]
    impl LanguageModel for ScriptedModel {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn invoke(&self, prompt: &str) -> Result<LlmReply, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(content)) => Ok(LlmReply::new(content)),
                Some(Err(message)) => Err(LlmError::Request(message)),
                None => Err(LlmError::Empty),
            }
        }
    }

    /// Workflow whose search falls back to mock results and whose model
    /// answers from `replies`
    pub(crate) fn scripted_workflow(
        replies: Vec<Result<&str, &str>>,
    ) -> (ResearchWorkflow, Arc<ScriptedModel>) {
        let model = ScriptedModel::new(replies);
        let search = SearchClient::new(HttpClient::new().unwrap(), &SearchSettings::default());
        let workflow = ResearchWorkflow::new(
            ResearchAgent::new(search, SearchOptions::default(), model.clone()),
            DraftingAgent::new(model.clone()),
        );
        (workflow, model)
    }

    pub(crate) const CLIMATE_FINDINGS: &str = r#"Here is what I found:
{
  "findings": [
    {"title": "Rising temperatures", "content": "Global average temperature has risen about 1.1C.", "source_url": "https://example.com/article1", "source_title": "Information about climate change"},
    {"title": "Sea level", "content": "Sea levels are rising as ice sheets melt.", "source_url": "https://example.com/article2", "source_title": "climate change research and analysis"},
    {"title": "Mitigation", "content": "Cutting emissions limits further warming.", "source_url": "https://example.com/guide", "source_title": "Understanding climate change: A comprehensive guide"}
  ]
}"#;

    pub(crate) const CLIMATE_DRAFT: &str = "# Climate change\n\nTemperatures are rising [1].\n\n## References\n1. https://example.com/article1\n";
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_from_settings_requires_llm_key() {
        let settings = Settings::default();
        assert!(ResearchWorkflow::from_settings(&settings).is_err());

        let mut settings = Settings::default();
        settings.llm.api_key = Some("key".to_string());
        assert!(ResearchWorkflow::from_settings(&settings).is_ok());
    }

    #[test]
    fn test_error_message_keeps_cause() {
        let err = WorkflowError::Failed("Drafting failed: boom".to_string());
        assert_eq!(
            err.to_string(),
            "Research workflow failed: Drafting failed: boom"
        );
    }

    #[tokio::test]
    async fn test_climate_change_end_to_end() {
        let (workflow, model) = scripted_workflow(vec![Ok(CLIMATE_FINDINGS), Ok(CLIMATE_DRAFT)]);

        let (findings, draft) = workflow.run("climate change").await.unwrap();

        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].title, "Rising temperatures");
        assert_eq!(findings[2].source_url, "https://example.com/guide");
        assert_eq!(draft, CLIMATE_DRAFT);

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        // Research sees the mock results, drafting sees the findings
        assert!(prompts[0].contains("Information about climate change"));
        assert!(prompts[1].contains("Finding 1:"));
        assert!(prompts[1].contains("Rising temperatures"));
    }

    #[tokio::test]
    async fn test_unparseable_reply_uses_search_results() {
        let (workflow, _) = scripted_workflow(vec![Ok("no json here"), Ok("answer")]);

        let (findings, draft) = workflow.run("tides").await.unwrap();

        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].title, "Information about tides");
        assert_eq!(findings[0].source_url, "https://example.com/article1");
        assert_eq!(draft, "answer");
    }

    #[tokio::test]
    async fn test_drafting_failure_fails_workflow() {
        let (workflow, model) = scripted_workflow(vec![Ok(CLIMATE_FINDINGS), Err("quota exceeded")]);

        let err = workflow.run("climate change").await.unwrap_err();
        let message = err.to_string();

        assert!(message.starts_with("Research workflow failed: Drafting failed:"));
        assert!(message.contains("quota exceeded"));
        assert_eq!(model.prompts.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_research_failure_skips_drafting() {
        let (workflow, model) = scripted_workflow(vec![Err("unreachable")]);

        let err = workflow.run("climate change").await.unwrap_err();

        assert!(err.to_string().contains("Research failed:"));
        assert_eq!(model.prompts.lock().unwrap().len(), 1);
    }
}
