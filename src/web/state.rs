//! Application state shared across handlers

use super::session::SessionStore;
use crate::config::Settings;
use crate::storage::ResultsStore;
use crate::workflow::ResearchWorkflow;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Research pipeline
    pub workflow: Arc<ResearchWorkflow>,
    /// Output files
    pub store: Arc<ResultsStore>,
    /// Per-visitor last results
    pub sessions: Arc<SessionStore>,
    /// Template renderer
    pub templates: Arc<super::Templates>,
}

impl AppState {
    /// Create new application state. The results directories must already exist.
    pub fn new(settings: Settings, workflow: ResearchWorkflow) -> anyhow::Result<Self> {
        let store = Arc::new(ResultsStore::new(&settings.storage.results_dir));
        let sessions = Arc::new(SessionStore::new(
            settings.server.session_ttl,
            settings.server.session_capacity,
        ));
        let templates = Arc::new(super::Templates::new()?);

        Ok(Self {
            settings: Arc::new(settings),
            workflow: Arc::new(workflow),
            store,
            sessions,
            templates,
        })
    }

    /// Get application name
    pub fn app_name(&self) -> &str {
        &self.settings.general.app_name
    }

    /// Session lifetime in seconds
    pub fn session_ttl(&self) -> u64 {
        self.settings.server.session_ttl
    }
}
