//! Canned search results for running without a provider

use serde_json::json;

pub const MOCK_SEARCH_ID: &str = "mock-search-id";

/// Three deterministic results that mention the query
pub fn mock_results(query: &str) -> serde_json::Value {
    json!({
        "query": query,
        "results": [
            {
                "title": format!("Information about {}", query),
                "url": "https://example.com/article1",
                "content": format!(
                    "This is some mock content about {}. It stands in for live search results while the search API is unavailable.",
                    query
                ),
                "score": 0.95
            },
            {
                "title": format!("{} research and analysis", query),
                "url": "https://example.com/article2",
                "content": format!(
                    "Here is a detailed analysis of {}. This is mock content for development purposes only.",
                    query
                ),
                "score": 0.85
            },
            {
                "title": format!("Understanding {}: A comprehensive guide", query),
                "url": "https://example.com/guide",
                "content": format!(
                    "A comprehensive guide to understanding {} and its implications. This is mock content for development purposes.",
                    query
                ),
                "score": 0.75
            }
        ],
        "metadata": {
            "search_depth": "moderate",
            "max_results": 3,
            "search_id": MOCK_SEARCH_ID
        }
    })
}
