//! API error taxonomy shared by the document store, app registry, and
//! controllers. Every handler returns `Result<_, ApiError>` and the
//! `ResponseError` impl maps variants onto HTTP status codes.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed caller input (400)
    #[error("{0}")]
    InvalidInput(String),

    /// Missing file, directory, or app record (404)
    #[error("{0}")]
    NotFound(String),

    /// Unexpected filesystem failure (500)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected serialization failure (500)
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Io(_) | ApiError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string()
        }))
    }
}
