//! Web search module
//!
//! Issues one request to the search provider per query and always hands
//! back a well-formed serialized result list.

mod client;
mod mock;
mod models;

pub use client::SearchClient;
pub use mock::{mock_results, MOCK_SEARCH_ID};
pub use models::*;
