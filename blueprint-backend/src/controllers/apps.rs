//! App registry REST API — registration, lookup, and sync bookkeeping
//! for the external apps that consume this blueprint.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::apps::registry::{AppFields, AppRecord};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RegisterAppRequest {
    display_name: Option<String>,
    github: Option<String>,
    convex: Option<String>,
    vercel: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Serialize)]
struct AppDetail {
    id: String,
    #[serde(flatten)]
    record: AppRecord,
}

/// The whole registry.
async fn list_apps(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let apps = state.registry.list()?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "apps": apps })))
}

async fn get_app(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let record = state.registry.get(&id)?;
    Ok(HttpResponse::Ok().json(AppDetail {
        id: id.into_inner(),
        record,
    }))
}

/// Register a new app or update an existing one. Missing body fields
/// keep their existing values; `last_checked` never moves here.
async fn register_app(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: Option<web::Json<RegisterAppRequest>>,
) -> Result<HttpResponse, ApiError> {
    let body = body.map(|b| b.into_inner()).unwrap_or_default();
    let (action, app) = state.registry.upsert(
        &id,
        AppFields {
            display_name: body.display_name,
            github: body.github,
            convex: body.convex,
            vercel: body.vercel,
            url: body.url,
        },
    )?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "action": action.as_str(),
        "app": app
    })))
}

async fn delete_app(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state.registry.delete(&id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "deleted": id.as_str()
    })))
}

/// Advance the app's `last_checked` to today.
async fn mark_checked(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let last_checked = state.registry.mark_checked(&id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "last_checked": last_checked
    })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/apps").route(web::get().to(list_apps)));
    cfg.service(
        web::resource("/api/apps/{id}")
            .route(web::get().to(get_app))
            .route(web::post().to(register_app))
            .route(web::delete().to(delete_app)),
    );
    cfg.service(web::resource("/api/apps/{id}/checked").route(web::post().to(mark_checked)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_state;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_register_get_and_flattened_detail() {
        let (_dir, state) = test_state();
        let app =
            test::init_service(App::new().app_data(state).configure(config)).await;

        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/apps/crm")
                .set_json(serde_json::json!({"displayName": "Customer CRM", "github": "org/crm"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp["success"], true);
        assert_eq!(resp["action"], "created");
        assert_eq!(resp["app"]["name"], "Customer CRM");

        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/apps/crm").to_request(),
        )
        .await;
        assert_eq!(resp["id"], "crm");
        assert_eq!(resp["name"], "Customer CRM");
        assert_eq!(resp["github"], "org/crm");
    }

    #[actix_web::test]
    async fn test_reregistration_preserves_last_checked() {
        let (_dir, state) = test_state();
        let app =
            test::init_service(App::new().app_data(state).configure(config)).await;

        let first: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/apps/crm")
                .set_json(serde_json::json!({"displayName": "CRM"}))
                .to_request(),
        )
        .await;

        let second: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/apps/crm")
                .set_json(serde_json::json!({"url": "https://crm.example.com"}))
                .to_request(),
        )
        .await;
        assert_eq!(second["action"], "updated");
        assert_eq!(second["app"]["name"], "CRM");
        assert_eq!(second["app"]["last_checked"], first["app"]["last_checked"]);
    }

    #[actix_web::test]
    async fn test_mark_checked_and_missing_app() {
        let (_dir, state) = test_state();
        let app =
            test::init_service(App::new().app_data(state).configure(config)).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/apps/ghost/checked").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);

        test::call_service(
            &app,
            test::TestRequest::post().uri("/api/apps/crm").to_request(),
        )
        .await;
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post().uri("/api/apps/crm/checked").to_request(),
        )
        .await;
        assert_eq!(resp["success"], true);
        assert!(resp["last_checked"].as_str().unwrap().len() == 10);
    }

    #[actix_web::test]
    async fn test_delete_semantics() {
        let (_dir, state) = test_state();
        let app =
            test::init_service(App::new().app_data(state).configure(config)).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::delete().uri("/api/apps/ghost").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);

        test::call_service(
            &app,
            test::TestRequest::post().uri("/api/apps/doomed").to_request(),
        )
        .await;
        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::delete().uri("/api/apps/doomed").to_request(),
        )
        .await;
        assert_eq!(resp["deleted"], "doomed");

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/apps/doomed").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 404);
    }

    #[actix_web::test]
    async fn test_list_apps_mapping() {
        let (_dir, state) = test_state();
        let app =
            test::init_service(App::new().app_data(state).configure(config)).await;

        test::call_service(
            &app,
            test::TestRequest::post().uri("/api/apps/one").to_request(),
        )
        .await;
        test::call_service(
            &app,
            test::TestRequest::post().uri("/api/apps/two").to_request(),
        )
        .await;

        let resp: serde_json::Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/api/apps").to_request(),
        )
        .await;
        let apps = resp["apps"].as_object().unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps["one"]["name"], "one");
    }
}
