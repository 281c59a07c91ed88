//! Search request and provider payload models

use crate::results::text_field;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// How hard the provider should search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    Quick,
    #[default]
    Moderate,
    Comprehensive,
}

impl SearchDepth {
    /// Parse a depth name; anything unknown becomes `Moderate`
    pub fn parse_lossy(value: &str) -> Self {
        match value {
            "quick" => Self::Quick,
            "moderate" => Self::Moderate,
            "comprehensive" => Self::Comprehensive,
            _ => Self::Moderate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Moderate => "moderate",
            Self::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sanitized search options.
///
/// Invalid input is coerced, never rejected: an unknown depth becomes
/// `moderate` and a result count outside 1..=10 becomes 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub depth: SearchDepth,
    pub max_results: u8,
}

impl SearchOptions {
    pub const DEFAULT_MAX_RESULTS: u8 = 5;
    pub const MAX_RESULTS_LIMIT: i64 = 10;

    pub fn new(depth: &str, max_results: i64) -> Self {
        let max_results = if (1..=Self::MAX_RESULTS_LIMIT).contains(&max_results) {
            max_results as u8
        } else {
            Self::DEFAULT_MAX_RESULTS
        };

        Self {
            depth: SearchDepth::parse_lossy(depth),
            max_results,
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            depth: SearchDepth::Moderate,
            max_results: Self::DEFAULT_MAX_RESULTS,
        }
    }
}

/// Body sent to the search provider
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub search_depth: SearchDepth,
    pub max_results: u8,
    pub include_domains: Vec<String>,
    pub exclude_domains: Vec<String>,
}

impl<'a> SearchRequest<'a> {
    pub fn new(query: &'a str, options: &SearchOptions) -> Self {
        Self {
            query,
            search_depth: options.depth,
            max_results: options.max_results,
            include_domains: vec![],
            exclude_domains: vec![],
        }
    }
}

/// One provider result. Every field is optional because the payload is
/// read leniently; consumers substitute their own defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    pub title: Option<String>,
    pub url: Option<String>,
    pub content: Option<String>,
    pub score: Option<f64>,
}

impl SearchResult {
    /// Read one element of a `results` array. Non-objects are skipped,
    /// scalar fields of the wrong type are rendered as text and a score
    /// that is not a number is dropped.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let score = match object.get("score") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };

        Some(Self {
            title: text_field(object, "title"),
            url: text_field(object, "url"),
            content: text_field(object, "content"),
            score,
        })
    }
}

/// The parts of a provider payload the research stage reads
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchPayload {
    pub query: Option<String>,
    pub results: Vec<SearchResult>,
    pub error: Option<String>,
}

impl SearchPayload {
    /// Parse a serialized result list. Only text that is not JSON at all
    /// is an error; any JSON document is read with `from_value`.
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        let document: Value = serde_json::from_str(raw)?;
        Ok(Self::from_value(&document))
    }

    /// Read the `query`, `results` and `error` fields of a document,
    /// ignoring anything with an unusable shape
    pub fn from_value(document: &Value) -> Self {
        let Some(object) = document.as_object() else {
            return Self::default();
        };

        let results = object
            .get("results")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(SearchResult::from_json).collect())
            .unwrap_or_default();

        Self {
            query: text_field(object, "query"),
            results,
            error: text_field(object, "error"),
        }
    }
}
