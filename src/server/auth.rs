//! Shared-secret check for protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::AppState;
use super::error::ApiError;
use crate::utils::mask_secret;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects requests whose `x-api-key` does not match the configured secret.
///
/// With no secret configured every request is rejected.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    if let Some(key) = presented {
        ::log::info!("API key used: {}", mask_secret(key));
    }

    let authorized = matches!(
        (presented, state.api_key.as_deref()),
        (Some(presented), Some(expected)) if presented == expected
    );
    if authorized {
        return next.run(request).await;
    }

    ::log::warn!("Rejected {} request: invalid API key", request.uri().path());
    ApiError::Unauthorized.into_response()
}
