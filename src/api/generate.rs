use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::{GrainEffect, WaveType};
use crate::services::{Generated, GenerationParameters, GenerationRequest, GeneratorService};

/// Request body for /generate
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Wave type code (`0.0`, `1A`..`1D`, `2A`..`2E`, `3A`..`3D`, `4A`, `4B`)
    #[serde(default = "default_wave_type")]
    #[schema(example = "4A")]
    pub wave_type: String,
    /// Palette name as listed by /palettes
    #[schema(example = "purple_to_orange")]
    pub palette: String,
    /// `none`, `dithering` or `white_grain`
    #[serde(default = "default_grain_effect")]
    #[schema(example = "none")]
    pub grain_effect: String,
    /// Number of bands (server default if omitted)
    #[serde(default)]
    pub bands: Option<usize>,
    /// Seed for reproducible grain
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_wave_type() -> String {
    "4A".to_string()
}

fn default_grain_effect() -> String {
    "none".to_string()
}

impl GenerateRequest {
    fn into_generation_request(self) -> Result<GenerationRequest, ApiError> {
        let wave_type = self
            .wave_type
            .parse::<WaveType>()
            .map_err(ApiError::BadRequest)?;
        let grain_effect = self
            .grain_effect
            .parse::<GrainEffect>()
            .map_err(ApiError::BadRequest)?;
        Ok(GenerationRequest {
            wave_type,
            palette: self.palette,
            grain_effect,
            bands: self.bands,
            seed: self.seed,
        })
    }
}

/// Response from /generate and /generate_random
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateResponse {
    pub success: bool,
    /// Name of the stored PNG
    pub filename: String,
    /// URL the PNG is served from
    pub image_url: String,
    pub parameters: GenerationParameters,
}

impl From<Generated> for GenerateResponse {
    fn from(generated: Generated) -> Self {
        Self {
            success: true,
            filename: generated.filename,
            image_url: generated.image_url,
            parameters: generated.parameters,
        }
    }
}

/// Generate a gradient from a wave type preset and a named palette
///
/// The image is rendered with the server's canvas defaults, stored in the
/// gallery and returned by URL.
#[utoipa::path(
    post,
    path = "/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Image generated", body = GenerateResponse),
        (status = 400, description = "Unknown palette, wave type or grain effect, or invalid parameters"),
        (status = 500, description = "Rendering or storage failed"),
    ),
    tag = "Generate"
)]
pub async fn handle_generate(
    State(generator): State<Arc<GeneratorService>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let request = request.into_generation_request()?;

    let generated = generator.generate(request).await?;
    tracing::info!(filename = %generated.filename, "Generated image");

    Ok(Json(generated.into()))
}

/// Generate a gradient with a random wave type, palette and grain effect
#[utoipa::path(
    post,
    path = "/generate_random",
    responses(
        (status = 200, description = "Image generated", body = GenerateResponse),
        (status = 500, description = "Rendering or storage failed"),
    ),
    tag = "Generate"
)]
pub async fn handle_generate_random(
    State(generator): State<Arc<GeneratorService>>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let generated = generator.generate_random().await?;
    tracing::info!(
        filename = %generated.filename,
        wave_type = %generated.parameters.wave_type,
        palette = %generated.parameters.palette,
        "Generated random image"
    );

    Ok(Json(generated.into()))
}
