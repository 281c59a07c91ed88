//! Settings structures for the research agent configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Search credential that switches the search client to canned results
pub const PLACEHOLDER_SEARCH_KEY: &str = "dummy_tavily_api_key";

/// Main settings structure matching research.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub search: SearchSettings,
    pub llm: LlmSettings,
    pub storage: StorageSettings,
    pub server: ServerSettings,
    pub outgoing: OutgoingSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("TAVILY_API_KEY") {
            if !val.trim().is_empty() {
                self.search.api_key = val;
            }
        }
        if let Ok(val) = std::env::var("GOOGLE_API_KEY") {
            if !val.trim().is_empty() {
                self.llm.api_key = Some(val);
            }
        }
        if let Ok(val) = std::env::var("RESEARCH_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("RESEARCH_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("RESEARCH_RESULTS_DIR") {
            self.storage.results_dir = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("RESEARCH_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("RESEARCH_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(val));
        }
    }

    /// Check that everything the workflow cannot run without is present.
    ///
    /// A missing search key is fine (mock results are served), a missing
    /// LLM key is not.
    pub fn validate(&self) -> Result<()> {
        match self.llm.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(()),
            _ => Err(anyhow::anyhow!(
                "Missing API keys: set GOOGLE_API_KEY or llm.api_key in research.yml"
            )),
        }
    }

    /// Whether searches will be answered with canned results
    pub fn uses_mock_search(&self) -> bool {
        self.search.api_key == PLACEHOLDER_SEARCH_KEY
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Name displayed in the UI and CLI banner
    pub app_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            app_name: "Deep Research AI Agent System".to_string(),
        }
    }
}

/// Search provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Provider credential, sent as `x-api-key`
    pub api_key: String,
    /// Search endpoint
    pub endpoint: String,
    /// Search depth: quick, moderate or comprehensive
    pub depth: String,
    /// Maximum number of results (1-10)
    pub max_results: i64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_SEARCH_KEY.to_string(),
            endpoint: "https://api.tavily.com/search".to_string(),
            depth: "moderate".to_string(),
            max_results: 5,
        }
    }
}

/// Language model settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Gemini API key
    pub api_key: Option<String>,
    /// REST base URL
    pub endpoint: String,
    /// Model used to extract findings
    pub research_model: String,
    /// Model used to draft the answer
    pub drafting_model: String,
    /// Sampling temperature for both models
    pub temperature: f64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            research_model: "gemini-1.5-flash".to_string(),
            drafting_model: "gemini-1.5-pro".to_string(),
            temperature: 0.2,
        }
    }
}

/// Output file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Root directory for saved findings and drafts
    pub results_dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Seconds a session keeps its last result
    pub session_ttl: u64,
    /// Maximum number of live sessions
    pub session_capacity: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 5000,
            bind_address: "127.0.0.1".to_string(),
            session_ttl: 3600,
            session_capacity: 10_000,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds (none = wait for the transport)
    pub request_timeout: Option<f64>,
    /// Pool max idle connections per host
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `deep_research=debug`
    pub level: String,
    /// Optional log file, written in addition to stdout
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
