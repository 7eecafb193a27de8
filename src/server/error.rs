use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::error::CrawlError;

/// Failures reported to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: Invalid API key")]
    Unauthorized,

    #[error("Missing url query parameter")]
    MissingUrl,

    #[error("Invalid url query parameter")]
    InvalidUrl(String),

    #[error("Invalid query string")]
    InvalidQuery(String),

    #[error("Scraper failed")]
    ScraperFailed(String),
}

impl From<CrawlError> for ApiError {
    fn from(err: CrawlError) -> Self {
        match err {
            CrawlError::InvalidSeed { reason, .. } => ApiError::InvalidUrl(reason),
            other => ApiError::ScraperFailed(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.to_string();
        let (status, body) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, json!({ "error": error })),
            ApiError::MissingUrl => (StatusCode::BAD_REQUEST, json!({ "error": error })),
            ApiError::InvalidUrl(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": error, "details": details }),
            ),
            ApiError::InvalidQuery(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": error, "details": details }),
            ),
            ApiError::ScraperFailed(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": error, "details": details }),
            ),
        };
        (status, Json(body)).into_response()
    }
}
