//! Document file REST API — listing, reading, and writing corpus files.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::docs::file_ops::FileEntry;
use crate::docs::store::ReadOutcome;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
struct ListFilesResponse {
    files: Vec<FileEntry>,
}

#[derive(Debug, Deserialize)]
struct WriteFileRequest {
    content: Option<String>,
    source: Option<String>,
}

/// Recursive listing of the whole corpus.
async fn list_files(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let files = state.store.list()?;
    Ok(HttpResponse::Ok().json(ListFilesResponse { files }))
}

/// Read a file (raw text, or parsed for .json) or a directory (one-level
/// listing).
async fn read_file(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    match state.store.read(&path)? {
        ReadOutcome::Text(content) => Ok(HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(content)),
        ReadOutcome::Json(value) => Ok(HttpResponse::Ok().json(value)),
        ReadOutcome::Directory(files) => {
            Ok(HttpResponse::Ok().json(ListFilesResponse { files }))
        }
    }
}

/// Create or update a file. Intermediate directories are created as
/// needed; the response reports which of the two happened.
async fn write_file(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<WriteFileRequest>,
) -> Result<HttpResponse, ApiError> {
    let content = body
        .content
        .as_deref()
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ApiError::InvalidInput("content is required".to_string()))?;

    let action = state.store.write(&path, content)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "action": action.as_str(),
        "path": path.as_str(),
        "source": body.source.as_deref().unwrap_or("unknown")
    })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/files").route(web::get().to(list_files)));
    cfg.service(
        web::resource("/api/files/{path:.*}")
            .route(web::get().to(read_file))
            .route(web::post().to(write_file)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_write_then_read_round_trip() {
        let (_dir, state) = test_state();
        let app =
            test::init_service(App::new().app_data(state).configure(config)).await;

        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/files/a/b.md")
                .set_json(serde_json::json!({"content": "hello", "source": "test-suite"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp["success"], true);
        assert_eq!(resp["action"], "created");
        assert_eq!(resp["path"], "a/b.md");
        assert_eq!(resp["source"], "test-suite");

        let read = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/files/a/b.md").to_request(),
        )
        .await;
        assert!(read.status().is_success());
        assert_eq!(test::read_body(read).await, "hello");

        // Second write with different content reports an update
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/files/a/b.md")
                .set_json(serde_json::json!({"content": "changed"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp["action"], "updated");
        assert_eq!(resp["source"], "unknown");
    }

    #[actix_web::test]
    async fn test_write_without_content_is_400() {
        let (_dir, state) = test_state();
        let app =
            test::init_service(App::new().app_data(state).configure(config)).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/files/x.md")
                .set_json(serde_json::json!({"source": "nobody"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_read_missing_is_404() {
        let (_dir, state) = test_state();
        let app =
            test::init_service(App::new().app_data(state).configure(config)).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/files/ghost.md").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_json_file_returned_parsed() {
        let (_dir, state) = test_state();
        state
            .store
            .write("config/flags.json", r#"{"beta": true}"#)
            .unwrap();
        let app =
            test::init_service(App::new().app_data(state).configure(config)).await;

        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get()
                .uri("/api/files/config/flags.json")
                .to_request(),
        )
        .await;
        assert_eq!(resp["beta"], true);
    }

    #[actix_web::test]
    async fn test_directory_read_lists_children() {
        let (_dir, state) = test_state();
        state.store.write("guides/auth.md", "x").unwrap();
        state.store.write("guides/deep/more.md", "y").unwrap();
        let app =
            test::init_service(App::new().app_data(state).configure(config)).await;

        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/files/guides").to_request(),
        )
        .await;
        let files = resp["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f["path"] == "guides/deep" && f["type"] == "dir"));
    }

    #[actix_web::test]
    async fn test_traversal_rejected() {
        let (_dir, state) = test_state();
        let app =
            test::init_service(App::new().app_data(state).configure(config)).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/files/../escape.md")
                .set_json(serde_json::json!({"content": "nope"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn test_listing_is_preorder() {
        let (_dir, state) = test_state();
        state.store.write("guides/auth.md", "x").unwrap();
        let app =
            test::init_service(App::new().app_data(state).configure(config)).await;

        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/files").to_request(),
        )
        .await;
        let files = resp["files"].as_array().unwrap();
        let dir_pos = files.iter().position(|f| f["path"] == "guides").unwrap();
        let child_pos = files
            .iter()
            .position(|f| f["path"] == "guides/auth.md")
            .unwrap();
        assert!(dir_pos < child_pos);
    }
}
