//! Deep Research: a two-stage web research agent
//!
//! A query is sent to a web search provider, a language model extracts
//! structured findings from the results, and a second model call drafts a
//! cited Markdown answer from those findings. The same workflow is driven
//! from the command line and from a small web UI.

pub mod agents;
pub mod cli;
pub mod config;
pub mod llm;
pub mod logging;
pub mod network;
pub mod results;
pub mod search;
pub mod storage;
pub mod web;
pub mod workflow;

pub use agents::{AgentError, DraftingAgent, ResearchAgent};
pub use config::Settings;
pub use llm::{LanguageModel, LlmError, LlmReply};
pub use results::Finding;
pub use search::{SearchClient, SearchDepth, SearchOptions};
pub use workflow::{ResearchWorkflow, WorkflowError};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
