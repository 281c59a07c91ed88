//! Finding type definitions

use crate::search::SearchResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_FINDING_TITLE: &str = "Research Finding";
pub const DEFAULT_SOURCE_TITLE: &str = "Research Source";
pub const FALLBACK_RESULT_TITLE: &str = "Search Result";
pub const NO_CONTENT: &str = "No content available";

/// One atomic fact with its provenance.
///
/// Every `Finding` handed out by the crate has all four fields filled in;
/// the constructors below apply the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Short heading for the fact
    pub title: String,
    /// The fact itself
    pub content: String,
    /// Where the fact was found (may be empty)
    pub source_url: String,
    /// Title of the source page
    pub source_title: String,
}

impl Finding {
    /// Build a finding from one element of a model's `findings` array.
    ///
    /// Missing or null fields are backfilled: `title` becomes "Research
    /// Finding", `source_url` is taken from a `source` field when present,
    /// `source_title` falls back to the supplied title, then "Research
    /// Source". Returns `None` when the element is not a JSON object.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let title = text_field(object, "title");
        let source_url = text_field(object, "source_url")
            .or_else(|| text_field(object, "source"))
            .unwrap_or_default();
        let source_title = text_field(object, "source_title")
            .or_else(|| title.clone())
            .unwrap_or_else(|| DEFAULT_SOURCE_TITLE.to_string());

        Some(Self {
            title: title.unwrap_or_else(|| DEFAULT_FINDING_TITLE.to_string()),
            content: text_field(object, "content").unwrap_or_else(|| NO_CONTENT.to_string()),
            source_url,
            source_title,
        })
    }

    /// Build a finding straight from provider data, bypassing the model
    pub fn from_search_result(result: &SearchResult) -> Self {
        let title = result
            .title
            .clone()
            .unwrap_or_else(|| FALLBACK_RESULT_TITLE.to_string());

        Self {
            title: title.clone(),
            content: result
                .content
                .clone()
                .unwrap_or_else(|| NO_CONTENT.to_string()),
            source_url: result.url.clone().unwrap_or_default(),
            source_title: title,
        }
    }

    /// Single finding that carries text nothing else could make sense of
    pub fn unparsed(raw: &str) -> Self {
        Self {
            title: "Research Results".to_string(),
            content: raw.to_string(),
            source_url: String::new(),
            source_title: "Search Results".to_string(),
        }
    }
}

/// Read a field as text. Null counts as absent; numbers and booleans are
/// rendered as their JSON text.
pub(crate) fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complete_finding_is_kept() {
        let value = json!({
            "title": "Sea level",
            "content": "Sea level rose 20cm",
            "source_url": "https://example.org/sea",
            "source_title": "Ocean report"
        });
        let finding = Finding::from_json(&value).unwrap();

        assert_eq!(finding.title, "Sea level");
        assert_eq!(finding.content, "Sea level rose 20cm");
        assert_eq!(finding.source_url, "https://example.org/sea");
        assert_eq!(finding.source_title, "Ocean report");
    }

    #[test]
    fn test_backfill_defaults() {
        let finding = Finding::from_json(&json!({"content": "fact"})).unwrap();

        assert_eq!(finding.title, DEFAULT_FINDING_TITLE);
        assert_eq!(finding.source_url, "");
        assert_eq!(finding.source_title, DEFAULT_SOURCE_TITLE);
    }

    #[test]
    fn test_source_title_falls_back_to_title() {
        let finding = Finding::from_json(&json!({"content": "x", "title": "Heat"})).unwrap();
        assert_eq!(finding.source_title, "Heat");
    }

    #[test]
    fn test_source_alias_fills_source_url() {
        let finding =
            Finding::from_json(&json!({"content": "x", "source": "https://a.example"})).unwrap();
        assert_eq!(finding.source_url, "https://a.example");

        let finding = Finding::from_json(&json!({
            "content": "x",
            "source": "https://a.example",
            "source_url": "https://b.example"
        }))
        .unwrap();
        assert_eq!(finding.source_url, "https://b.example");
    }

    #[test]
    fn test_null_and_non_string_fields() {
        let finding =
            Finding::from_json(&json!({"content": 42, "title": null, "source_url": null})).unwrap();

        assert_eq!(finding.content, "42");
        assert_eq!(finding.title, DEFAULT_FINDING_TITLE);
        assert_eq!(finding.source_url, "");
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(Finding::from_json(&json!("just text")).is_none());
        assert!(Finding::from_json(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_from_search_result_defaults() {
        let result = SearchResult::default();
        let finding = Finding::from_search_result(&result);

        assert_eq!(finding.title, FALLBACK_RESULT_TITLE);
        assert_eq!(finding.source_title, FALLBACK_RESULT_TITLE);
        assert_eq!(finding.content, NO_CONTENT);
        assert_eq!(finding.source_url, "");
    }
}
