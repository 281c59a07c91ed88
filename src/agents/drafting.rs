//! Answer synthesis: findings in, Markdown answer out

use super::prompts::drafting_prompt;
use super::AgentError;
use crate::llm::LanguageModel;
use crate::results::Finding;
use std::sync::Arc;
use tracing::{error, info};

/// Agent that drafts the final answer
pub struct DraftingAgent {
    model: Arc<dyn LanguageModel>,
}

impl DraftingAgent {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Draft an answer to `query` from `findings`.
    ///
    /// The model's reply is returned verbatim.
    pub async fn synthesize(&self, query: &str, findings: &[Finding]) -> Result<String, AgentError> {
        info!("Drafting answer for query: {}", query);

        let prompt = drafting_prompt(query, findings);
        let reply = self.model.invoke(&prompt).await.map_err(|e| {
            error!("Error during drafting: {}", e);
            AgentError::DraftingFailed(e.to_string())
        })?;

        info!("Drafted answer with {} ({} bytes)", self.model.name(), reply.content.len());
        Ok(reply.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{LlmError, LlmReply};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingModel {
        reply: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LanguageModel for RecordingModel {
        fn name(&self) -> &str {
            "recording"
        }

        async fn invoke(&self, prompt: &str) -> Result<LlmReply, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply
                .clone()
                .map(LlmReply::new)
                .ok_or(LlmError::Status {
                    status: 500,
                    body: "backend exploded".to_string(),
                })
        }
    }

    #[tokio::test]
    async fn test_reply_is_returned_verbatim() {
        let answer = "  # Answer\n\nUnclosed *emphasis [1]\n";
        let model = Arc::new(RecordingModel {
            reply: Some(answer.to_string()),
            prompts: Mutex::new(vec![]),
        });
        let agent = DraftingAgent::new(model.clone());
        let findings = vec![Finding::unparsed("raw")];

        let drafted = agent.synthesize("what?", &findings).await.unwrap();
        assert_eq!(drafted, answer);

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Original Query: what?"));
        assert!(prompts[0].contains("Finding 1:\nTitle: Research Results"));
    }

    #[tokio::test]
    async fn test_model_failure_is_drafting_failed() {
        let agent = DraftingAgent::new(Arc::new(RecordingModel {
            reply: None,
            prompts: Mutex::new(vec![]),
        }));

        let err = agent.synthesize("what?", &[]).await.unwrap_err();
        assert!(matches!(err, AgentError::DraftingFailed(_)));
        assert!(err.to_string().contains("backend exploded"));
    }
}
