//! Knowledge read API — frontmatter metadata, search, topics, and the
//! change feed consumed by registered apps.

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::docs::{changes, metadata, search, topics};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChangesQuery {
    since: Option<String>,
}

/// Frontmatter metadata for every markdown document.
async fn get_metadata(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let files = metadata::collect(&state.store)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "count": files.len(),
        "files": files
    })))
}

/// Weighted search across filenames, tldrs, topics, and bodies.
async fn search_documents(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let q = query
        .q
        .as_deref()
        .ok_or_else(|| ApiError::InvalidInput("q parameter is required".to_string()))?;
    let results = search::search(&state.store, q)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "query": q,
        "count": results.len(),
        "results": results
    })))
}

/// All topics across the corpus.
async fn list_topics(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let topics = topics::all_topics(&state.store)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "count": topics.len(),
        "topics": topics
    })))
}

/// Documents tagged with one topic.
async fn get_topic(
    state: web::Data<AppState>,
    topic: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let files = topics::documents_for(&state.store, &topic)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "topic": topic.as_str(),
        "count": files.len(),
        "files": files
    })))
}

/// Documents updated strictly after the `since` cutoff.
async fn get_changes(
    state: web::Data<AppState>,
    query: web::Query<ChangesQuery>,
) -> Result<HttpResponse, ApiError> {
    let since = query.since.as_deref().ok_or_else(|| {
        ApiError::InvalidInput("since parameter required (YYYY-MM-DD)".to_string())
    })?;
    let changes = changes::changes_since(&state.store, since)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "changes": changes
    })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/metadata").route(web::get().to(get_metadata)));
    cfg.service(web::resource("/api/search").route(web::get().to(search_documents)));
    cfg.service(web::resource("/api/topics").route(web::get().to(list_topics)));
    cfg.service(web::resource("/api/topics/{topic}").route(web::get().to(get_topic)));
    cfg.service(web::resource("/api/changes").route(web::get().to(get_changes)));
}
