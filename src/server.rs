//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{Catalog, InMemoryCatalog, SignedUrlService, YamlCatalog};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub signer: Arc<SignedUrlService>,
    pub catalog: Arc<dyn Catalog>,
}

impl AppState {
    pub fn new(signer: SignedUrlService, catalog: Arc<dyn Catalog>) -> Self {
        Self {
            signer: Arc::new(signer),
            catalog,
        }
    }
}

/// Create application state from validated configuration.
pub fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let signer = SignedUrlService::new(config.signer.clone());

    let catalog: Arc<dyn Catalog> = match &config.catalog_file {
        Some(path) => {
            if !path.exists() {
                tracing::warn!(
                    path = %path.display(),
                    "Catalog file not found; item listing will fail until it exists"
                );
            }
            Arc::new(YamlCatalog::new(path.clone()))
        }
        None => {
            tracing::info!("No CATALOG_FILE configured, serving an empty catalog");
            Arc::new(InMemoryCatalog::default())
        }
    };

    Ok(AppState::new(signer, catalog))
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/sign-url", post(handle_sign_url))
        .route("/api/items", get(handle_items))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_sign_url(
    axum::extract::State(state): axum::extract::State<AppState>,
    body: Result<axum::Json<api::SignUrlRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<axum::Json<api::SignUrlResponse>, ApiError> {
    api::handle_sign_url(axum::extract::State(state.signer), body).await
}

async fn handle_items(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<axum::Json<Vec<crate::models::MediaItem>>, ApiError> {
    api::handle_items(
        axum::extract::State(state.catalog),
        axum::extract::State(state.signer),
    )
    .await
}
