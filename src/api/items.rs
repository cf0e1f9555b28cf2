use axum::{extract::State, response::Json};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::MediaItem;
use crate::services::{resolve_items, Catalog, SignedUrlService};

/// List portfolio items with their media URLs
///
/// Thumbnails and panorama tiles are public; all other media comes back
/// as signed URLs.
#[utoipa::path(
    get,
    path = "/api/items",
    responses(
        (status = 200, description = "Portfolio items", body = [MediaItem]),
        (status = 500, description = "Failed to load items"),
    ),
    tag = "Media"
)]
pub async fn handle_items(
    State(catalog): State<Arc<dyn Catalog>>,
    State(signer): State<Arc<SignedUrlService>>,
) -> Result<Json<Vec<MediaItem>>, ApiError> {
    let items = catalog.list_items().await?;
    let resolved = resolve_items(&signer, &items)?;

    tracing::info!(items = resolved.len(), "Listed portfolio items");

    Ok(Json(resolved))
}
