use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::{GalleryItem, GalleryStore};

/// List generated images, newest first
#[utoipa::path(
    get,
    path = "/gallery",
    responses(
        (status = 200, description = "Generated images", body = Vec<GalleryItem>),
        (status = 500, description = "Gallery directory unreadable"),
    ),
    tag = "Gallery"
)]
pub async fn handle_gallery(
    State(gallery): State<Arc<dyn GalleryStore>>,
) -> Result<Json<Vec<GalleryItem>>, ApiError> {
    let items = gallery.list().await?;
    tracing::debug!(count = items.len(), "Listed gallery");
    Ok(Json(items))
}

/// Serve a generated PNG
#[utoipa::path(
    get,
    path = "/generated/{filename}",
    responses(
        (status = 200, description = "PNG image", content_type = "image/png"),
        (status = 400, description = "Invalid filename"),
        (status = 404, description = "Image not found"),
    ),
    params(
        ("filename" = String, Path, description = "File name returned by /generate"),
    ),
    tag = "Gallery"
)]
pub async fn handle_generated_image(
    State(gallery): State<Arc<dyn GalleryStore>>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = gallery.read(&filename).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        bytes,
    )
        .into_response())
}
