use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::SizeParams;
use crate::services::SignedUrlService;

/// Request body for URL signing
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignUrlRequest {
    /// Resource path relative to the CDN storage root (e.g. "/folder/file.webp")
    #[serde(default)]
    pub path: Option<String>,
    /// Display width in pixels
    #[serde(default)]
    pub width: Option<u32>,
    /// Display height in pixels
    #[serde(default)]
    pub height: Option<u32>,
}

/// Response from URL signing
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUrlResponse {
    /// Complete CDN URL with token and expiry
    pub signed_url: String,
}

/// Sign a CDN media URL
///
/// Returns a time-limited URL for private media. Repeat requests for the
/// same path and size are served from cache until the cached URL lapses.
#[utoipa::path(
    post,
    path = "/api/sign-url",
    request_body = SignUrlRequest,
    responses(
        (status = 200, description = "Signed URL generated", body = SignUrlResponse),
        (status = 400, description = "Missing or invalid path"),
        (status = 500, description = "Failed to generate signed URL"),
    ),
    tag = "Media"
)]
pub async fn handle_sign_url(
    State(signer): State<Arc<SignedUrlService>>,
    body: Result<Json<SignUrlRequest>, JsonRejection>,
) -> Result<Json<SignUrlResponse>, ApiError> {
    let Json(request) =
        body.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;

    let path = match request.path.as_deref() {
        Some(path) if !path.is_empty() => path,
        _ => return Err(ApiError::MissingPath),
    };

    tracing::debug!(
        path = path,
        width = ?request.width,
        height = ?request.height,
        "Sign URL request received"
    );

    let signed_url = signer.signed_url(path, &SizeParams::new(request.width, request.height))?;

    Ok(Json(SignUrlResponse { signed_url }))
}
