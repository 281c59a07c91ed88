//! The two model-backed stages of the workflow
//!
//! `ResearchAgent` turns search results into structured findings and
//! `DraftingAgent` turns findings into a cited Markdown answer.

pub mod extract;
mod drafting;
mod prompts;
mod research;

pub use drafting::DraftingAgent;
pub use extract::{extract_findings, FindingsSource};
pub use prompts::{drafting_prompt, format_findings, format_search_context, research_prompt};
pub use research::ResearchAgent;

use thiserror::Error;

/// Failure of a stage with no local fallback (the model call itself)
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Research failed: {0}")]
    ResearchFailed(String),
    #[error("Drafting failed: {0}")]
    DraftingFailed(String),
}
