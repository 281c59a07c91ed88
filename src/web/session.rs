//! Server-side sessions holding each visitor's last research result

use crate::results::Finding;
use axum::http::{header, HeaderMap};
use moka::future::Cache;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Name of the cookie carrying the session id
pub const SESSION_COOKIE: &str = "research_session";

/// What the results page shows
#[derive(Debug, Clone, Serialize)]
pub struct LastResult {
    pub query: String,
    pub findings: Vec<Finding>,
    pub draft: String,
    pub research_file: Option<String>,
    pub draft_file: Option<String>,
}

/// Session id -> last result, expiring after a fixed time
pub struct SessionStore {
    cache: Cache<String, Arc<LastResult>>,
}

impl SessionStore {
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        Self { cache }
    }

    pub async fn get(&self, id: &str) -> Option<Arc<LastResult>> {
        self.cache.get(id).await
    }

    pub async fn set(&self, id: String, result: LastResult) {
        self.cache.insert(id, Arc::new(result)).await;
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(3600, 10_000)
    }
}

/// Generate a random session id
pub fn new_session_id() -> String {
    let mut rng = rand::thread_rng();
    (0..32)
        .map(|_| rng.sample(rand::distributions::Alphanumeric) as char)
        .collect()
}

/// Session id from the request's cookies
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value for a session id
pub fn session_cookie(id: &str, ttl_seconds: u64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, id, ttl_seconds
    )
}
