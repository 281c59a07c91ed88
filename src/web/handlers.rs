//! HTTP request handlers

use super::session::{new_session_id, session_cookie, session_id, LastResult};
use super::state::AppState;
use super::templates::markdown_to_html;
use crate::results::Finding;
use crate::storage::SavedPaths;
use axum::{
    body::Bytes,
    extract::{Form, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tera::Context;

/// Body of the research form and of the JSON API
#[derive(Debug, Default, Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub query: Option<String>,
}

impl ResearchRequest {
    /// The query, if it has any non-whitespace content
    fn query(&self) -> Option<&str> {
        self.query.as_deref().filter(|q| !q.trim().is_empty())
    }
}

/// JSON API response
#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub query: String,
    pub research_results: Vec<Finding>,
    pub draft: String,
    pub research_file: Option<String>,
    pub draft_file: Option<String>,
}

fn error_json(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn no_query() -> Response {
    error_json(StatusCode::BAD_REQUEST, "No query provided".to_string())
}

fn display_path(path: Option<PathBuf>) -> Option<String> {
    path.map(|p| p.display().to_string())
}

fn render(state: &AppState, template: &str, ctx: &Context) -> Response {
    match state.templates.render_with_context(template, ctx) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Run the workflow and save its output; failures become a 500 JSON body
async fn run_and_save(state: &AppState, query: &str) -> Result<LastResult, Response> {
    let (findings, draft) = state.workflow.run(query).await.map_err(|e| {
        tracing::error!("Error in research workflow: {}", e);
        error_json(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Research failed: {}", e),
        )
    })?;

    let SavedPaths {
        research_file,
        draft_file,
    } = state.store.save_run(query, &findings, &draft);

    Ok(LastResult {
        query: query.to_string(),
        findings,
        draft,
        research_file: display_path(research_file),
        draft_file: display_path(draft_file),
    })
}

/// Home page handler
pub async fn index(State(state): State<AppState>) -> Response {
    let mut ctx = Context::new();
    ctx.insert("app_name", state.app_name());
    render(&state, "index.html", &ctx)
}

/// Form submission: run, remember in the session, show the results page
pub async fn research(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ResearchRequest>,
) -> Response {
    let Some(query) = form.query() else {
        return no_query();
    };

    let result = match run_and_save(&state, query).await {
        Ok(result) => result,
        Err(response) => return response,
    };

    let id = session_id(&headers).unwrap_or_else(new_session_id);
    state.sessions.set(id.clone(), result).await;

    (
        [(header::SET_COOKIE, session_cookie(&id, state.session_ttl()))],
        Redirect::to("/results"),
    )
        .into_response()
}

/// Last result of the caller's session
pub async fn results(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let last = match session_id(&headers) {
        Some(id) => state.sessions.get(&id).await,
        None => None,
    };
    let Some(last) = last else {
        return Redirect::to("/").into_response();
    };

    let mut ctx = Context::new();
    ctx.insert("app_name", state.app_name());
    ctx.insert("query", &last.query);
    ctx.insert("findings", &last.findings);
    ctx.insert("draft_html", &markdown_to_html(&last.draft));
    ctx.insert("research_file", &last.research_file);
    ctx.insert("draft_file", &last.draft_file);
    render(&state, "results.html", &ctx)
}

/// Saved findings files
pub async fn history(State(state): State<AppState>) -> Response {
    let entries = match state.store.list_research() {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Cannot list saved research: {:#}", e);
            vec![]
        }
    };

    let mut ctx = Context::new();
    ctx.insert("app_name", state.app_name());
    ctx.insert("entries", &entries);
    render(&state, "history.html", &ctx)
}

/// JSON API: run and return findings, draft and file paths
pub async fn api_research(State(state): State<AppState>, body: Bytes) -> Response {
    let request: ResearchRequest = serde_json::from_slice(&body).unwrap_or_default();
    let Some(query) = request.query() else {
        return no_query();
    };

    match run_and_save(&state, query).await {
        Ok(result) => Json(ResearchResponse {
            query: result.query,
            research_results: result.findings,
            draft: result.draft,
            research_file: result.research_file,
            draft_file: result.draft_file,
        })
        .into_response(),
        Err(response) => response,
    }
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
