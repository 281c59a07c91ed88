//! Reading findings out of free-text model replies
//!
//! Models are asked for a bare `{"findings": [...]}` object but often wrap
//! it in prose or trail off with commentary. The reply is run through an
//! ordered list of parsers and the first one that yields a non-empty
//! `findings` array wins. When none does, findings are built straight from
//! the search results.

use crate::results::Finding;
use crate::search::{SearchPayload, SearchResult};
use serde_json::Value;
use std::fmt;

/// A way of pulling one JSON document out of text
pub trait ReplyParser: Send + Sync {
    /// Which tier this parser represents
    fn source(&self) -> FindingsSource;

    /// Return the JSON document this parser sees in `text`, if any
    fn parse(&self, text: &str) -> Option<Value>;
}

/// The span from the first `{` to the last `}`
pub struct EmbeddedObject;

impl ReplyParser for EmbeddedObject {
    fn source(&self) -> FindingsSource {
        FindingsSource::EmbeddedObject
    }

    fn parse(&self, text: &str) -> Option<Value> {
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        if end < start {
            return None;
        }
        serde_json::from_str(&text[start..=end]).ok()
    }
}

/// The reply itself as a JSON document.
///
/// Text after a complete leading document is ignored, which covers a bare
/// object followed by a remark that itself contains braces.
pub struct LeadingDocument;

impl ReplyParser for LeadingDocument {
    fn source(&self) -> FindingsSource {
        FindingsSource::LeadingDocument
    }

    fn parse(&self, text: &str) -> Option<Value> {
        serde_json::Deserializer::from_str(text.trim())
            .into_iter::<Value>()
            .next()?
            .ok()
    }
}

/// Parsers in the order they are tried
pub const REPLY_PARSERS: &[&dyn ReplyParser] = &[&EmbeddedObject, &LeadingDocument];

/// Which tier produced a list of findings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingsSource {
    EmbeddedObject,
    LeadingDocument,
    SearchResults,
}

impl fmt::Display for FindingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EmbeddedObject => "embedded JSON object",
            Self::LeadingDocument => "bare JSON reply",
            Self::SearchResults => "search results",
        };
        f.write_str(name)
    }
}

/// The non-empty `findings` array of a document, backfilled
pub fn findings_in(document: &Value) -> Option<Vec<Finding>> {
    let findings: Vec<Finding> = document
        .get("findings")?
        .as_array()?
        .iter()
        .filter_map(Finding::from_json)
        .collect();

    if findings.is_empty() {
        None
    } else {
        Some(findings)
    }
}

/// Findings found in a model reply by the first parser that succeeds
pub fn findings_from_reply(reply: &str) -> Option<(Vec<Finding>, FindingsSource)> {
    REPLY_PARSERS.iter().find_map(|parser| {
        let document = parser.parse(reply)?;
        findings_in(&document).map(|findings| (findings, parser.source()))
    })
}

/// One finding per search result, in order
pub fn findings_from_results(results: &[SearchResult]) -> Vec<Finding> {
    results.iter().map(Finding::from_search_result).collect()
}

/// Run the full chain: reply parsers first, then the search results
pub fn extract_findings(reply: &str, results: &[SearchResult]) -> (Vec<Finding>, FindingsSource) {
    findings_from_reply(reply)
        .unwrap_or_else(|| (findings_from_results(results), FindingsSource::SearchResults))
}

/// Findings for search output that is not JSON.
///
/// The reply parsers are reused to dig a payload with at least one result
/// out of the text; if that fails too, the raw text becomes a single
/// finding.
pub fn findings_from_unparsed(raw: &str) -> Vec<Finding> {
    let recovered = REPLY_PARSERS.iter().find_map(|parser| {
        let payload = SearchPayload::from_value(&parser.parse(raw)?);
        (!payload.results.is_empty()).then_some(payload)
    });

    match recovered {
        Some(payload) => findings_from_results(&payload.results),
        None => vec![Finding::unparsed(raw)],
    }
}
