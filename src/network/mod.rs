//! HTTP networking module
//!
//! Provides the HTTP client used to reach the search and language model providers.

mod client;

pub use client::{HttpClient, HttpResponse};
