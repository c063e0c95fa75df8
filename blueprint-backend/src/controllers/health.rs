use actix_web::{web, HttpResponse, Responder};

use crate::error::ApiError;
use crate::AppState;

/// Version from Cargo.toml, available at compile time
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/health").route(web::get().to(health_check)));
    cfg.service(web::resource("/api/version").route(web::get().to(get_version)));
    cfg.service(web::resource("/api/endpoints").route(web::get().to(list_endpoints)));
    cfg.service(web::resource("/api/index").route(web::get().to(get_index)));
}

async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": VERSION
    }))
}

async fn get_version() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "version": VERSION
    }))
}

/// Self-describing catalog so automated clients can discover the API.
async fn list_endpoints() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "endpoints": [
            { "method": "GET", "path": "/api/health", "description": "Health check" },
            { "method": "GET", "path": "/api/endpoints", "description": "List all endpoints" },
            { "method": "GET", "path": "/api/index", "description": "Root index - start here" },
            { "method": "GET", "path": "/api/metadata", "description": "Frontmatter metadata for all documents" },
            { "method": "GET", "path": "/api/search?q=<term>", "description": "Full-text search with scoring" },
            { "method": "GET", "path": "/api/topics", "description": "List all topics" },
            { "method": "GET", "path": "/api/topics/{topic}", "description": "List documents for a topic" },
            { "method": "GET", "path": "/api/files", "description": "List all data files" },
            { "method": "GET", "path": "/api/files/{path}", "description": "Get a specific file or directory" },
            { "method": "POST", "path": "/api/files/{path}", "description": "Create or update a file" },
            { "method": "GET", "path": "/api/changes?since=YYYY-MM-DD", "description": "List files updated since date" },
            { "method": "GET", "path": "/api/apps", "description": "List registered apps" },
            { "method": "GET", "path": "/api/apps/{id}", "description": "Get app details" },
            { "method": "POST", "path": "/api/apps/{id}", "description": "Register or update an app" },
            { "method": "DELETE", "path": "/api/apps/{id}", "description": "Remove an app" },
            { "method": "POST", "path": "/api/apps/{id}/checked", "description": "Mark app as up to date" }
        ]
    }))
}

/// Serve the corpus root index.md as markdown.
async fn get_index(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let path = state.store.root().join("index.md");
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(HttpResponse::Ok()
            .content_type("text/markdown")
            .body(content)),
        Err(_) => Err(ApiError::NotFound("Index not found".to_string())),
    }
}
