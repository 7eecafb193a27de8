//! Endpoint handlers.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use super::error::ApiError;
use crate::crawlers;
use crate::results::CrawlReport;

pub const WELCOME_MESSAGE: &str = "Welcome to the site-render scraper API!";

/// Health check endpoint for container orchestration.
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

pub async fn index() -> impl IntoResponse {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

/// Scraper query parameters.
#[derive(Debug, Deserialize)]
pub struct ScraperParams {
    pub url: Option<String>,
}

/// Crawls the site behind `url` and returns every rendered page.
pub async fn scraper(
    State(state): State<AppState>,
    query: Result<Query<ScraperParams>, QueryRejection>,
) -> Result<Json<CrawlReport>, ApiError> {
    let Query(params) =
        query.map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))?;
    let seed = params
        .url
        .filter(|url| !url.trim().is_empty())
        .ok_or(ApiError::MissingUrl)?;

    let report = crawlers::crawl(state.renderer.clone(), &state.crawl_config, &seed).await?;
    Ok(Json(report))
}
