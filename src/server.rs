//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{
    DirectoryGallery, GalleryItem, GalleryStore, GeneratorService, PaletteInfo, PaletteStore,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub palettes: Arc<PaletteStore>,
    pub gallery: Arc<dyn GalleryStore>,
    pub generator: Arc<GeneratorService>,
}

/// Create application state from an asset loader.
///
/// Configuration comes from the loader; generated images go to `gallery_dir`.
pub fn create_app_state(
    asset_loader: Arc<AssetLoader>,
    gallery_dir: impl Into<PathBuf>,
) -> anyhow::Result<AppState> {
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    create_app_state_with_config(config, asset_loader, gallery_dir)
}

/// Create application state with an explicit configuration (used by tests).
pub fn create_app_state_with_config(
    config: Arc<AppConfig>,
    asset_loader: Arc<AssetLoader>,
    gallery_dir: impl Into<PathBuf>,
) -> anyhow::Result<AppState> {
    let gallery_dir = gallery_dir.into();
    std::fs::create_dir_all(&gallery_dir).map_err(|e| {
        anyhow::anyhow!(
            "Failed to create gallery directory {}: {e}",
            gallery_dir.display()
        )
    })?;

    let palettes = Arc::new(PaletteStore::new(asset_loader, config.clone()));
    let gallery: Arc<dyn GalleryStore> = Arc::new(DirectoryGallery::new(gallery_dir));
    let generator = Arc::new(GeneratorService::new(
        config.clone(),
        palettes.clone(),
        gallery.clone(),
    ));

    Ok(AppState {
        config,
        palettes,
        gallery,
        generator,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Control panel
        .route("/", get(api::handle_panel))
        // Generation
        .route("/generate", post(handle_generate))
        .route("/generate_random", post(handle_generate_random))
        // Gallery
        .route("/gallery", get(handle_gallery))
        .route("/generated/:filename", get(handle_generated_image))
        // Panel options
        .route("/palettes", get(handle_palettes))
        .route("/wave-types", get(api::handle_wave_types))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<api::GenerateRequest>, JsonRejection>,
) -> Result<Json<api::GenerateResponse>, ApiError> {
    api::handle_generate(State(state.generator), payload).await
}

async fn handle_generate_random(
    State(state): State<AppState>,
) -> Result<Json<api::GenerateResponse>, ApiError> {
    api::handle_generate_random(State(state.generator)).await
}

async fn handle_gallery(
    State(state): State<AppState>,
) -> Result<Json<Vec<GalleryItem>>, ApiError> {
    api::handle_gallery(State(state.gallery)).await
}

async fn handle_generated_image(
    State(state): State<AppState>,
    path: Path<String>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_generated_image(State(state.gallery), path).await
}

async fn handle_palettes(State(state): State<AppState>) -> Json<Vec<PaletteInfo>> {
    api::handle_palettes(State(state.palettes)).await
}
