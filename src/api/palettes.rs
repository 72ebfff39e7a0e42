use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::models::{GrainEffect, WaveType};
use crate::services::{PaletteInfo, PaletteStore};

/// A selectable option in the control panel
#[derive(Debug, Serialize, ToSchema)]
pub struct OptionInfo {
    /// Value to send in /generate
    pub value: String,
    pub description: String,
}

/// Wave types and grain effects accepted by /generate
#[derive(Debug, Serialize, ToSchema)]
pub struct WaveTypesResponse {
    pub wave_types: Vec<OptionInfo>,
    pub grain_effects: Vec<OptionInfo>,
}

/// List palettes available for generation
#[utoipa::path(
    get,
    path = "/palettes",
    responses(
        (status = 200, description = "Available palettes", body = Vec<PaletteInfo>),
    ),
    tag = "Palettes"
)]
pub async fn handle_palettes(State(palettes): State<Arc<PaletteStore>>) -> Json<Vec<PaletteInfo>> {
    Json(palettes.list())
}

/// List wave types and grain effects
#[utoipa::path(
    get,
    path = "/wave-types",
    responses(
        (status = 200, description = "Wave types and grain effects", body = WaveTypesResponse),
    ),
    tag = "Palettes"
)]
pub async fn handle_wave_types() -> Json<WaveTypesResponse> {
    Json(WaveTypesResponse {
        wave_types: WaveType::ALL
            .into_iter()
            .map(|t| OptionInfo {
                value: t.as_str().to_string(),
                description: t.description().to_string(),
            })
            .collect(),
        grain_effects: GrainEffect::ALL
            .into_iter()
            .map(|g| OptionInfo {
                value: g.as_str().to_string(),
                description: g.display_name().to_string(),
            })
            .collect(),
    })
}
