use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use wave_gradient::{Jitter, Renderer, WaveParameters};

use crate::error::{ApiError, RenderError};
use crate::models::{AppConfig, GrainEffect, WaveType};
use crate::rendering::encode_png;
use crate::services::{GalleryStore, PaletteStore};

/// Upper bound on bands per request.
pub const MAX_BANDS: usize = 1000;

/// A fully resolved generation request
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub wave_type: WaveType,
    pub palette: String,
    pub grain_effect: GrainEffect,
    /// Band count, config default if `None`
    pub bands: Option<usize>,
    /// Seed for grain and jitter, clock-derived if `None`
    pub seed: Option<u64>,
}

/// Parameters actually used for a generated image
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenerationParameters {
    pub wave_type: String,
    pub palette: String,
    pub grain_effect: GrainEffect,
    pub bands: usize,
    pub width: u32,
    pub height: u32,
    /// Peak offset in band units
    pub amplitude: f64,
    pub frequency: f64,
    pub flip: bool,
    /// Organic jitter in band units, randomized generations only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jitter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Result of a generation
#[derive(Debug, Clone)]
pub struct Generated {
    pub filename: String,
    pub image_url: String,
    pub parameters: GenerationParameters,
}

/// Renders gradients from named palettes and stores them in the gallery
pub struct GeneratorService {
    config: Arc<AppConfig>,
    palettes: Arc<PaletteStore>,
    gallery: Arc<dyn GalleryStore>,
}

impl GeneratorService {
    pub fn new(
        config: Arc<AppConfig>,
        palettes: Arc<PaletteStore>,
        gallery: Arc<dyn GalleryStore>,
    ) -> Self {
        Self {
            config,
            palettes,
            gallery,
        }
    }

    /// Render a preset wave type and store it
    pub async fn generate(&self, request: GenerationRequest) -> Result<Generated, ApiError> {
        let bands = self.resolve_bands(request.bands)?;
        let wave = request.wave_type.preset().parameters(bands);
        self.render_and_store("wave", request, bands, wave).await
    }

    /// Render a randomly chosen wave type, palette and grain with organic
    /// variation of the preset
    pub async fn generate_random(&self) -> Result<Generated, ApiError> {
        let names = self.palettes.names();
        let (request, wave) = {
            let mut rng = rand::thread_rng();
            let palette = names
                .choose(&mut rng)
                .cloned()
                .ok_or_else(|| ApiError::Internal("No palettes available".to_string()))?;
            let bands = self.config.render.bands;
            let request = GenerationRequest {
                wave_type: *WaveType::ALL.choose(&mut rng).unwrap_or(&WaveType::T4A),
                palette,
                grain_effect: *GrainEffect::ALL.choose(&mut rng).unwrap_or(&GrainEffect::None),
                bands: Some(bands),
                seed: Some(rng.gen_range(1..1_000_000)),
            };
            let wave = randomize_wave(&mut rng, request.wave_type, bands);
            (request, wave)
        };

        let bands = self.resolve_bands(request.bands)?;
        self.render_and_store("random", request, bands, wave)
            .await
    }

    fn resolve_bands(&self, bands: Option<usize>) -> Result<usize, ApiError> {
        let bands = bands.unwrap_or(self.config.render.bands);
        if bands > MAX_BANDS {
            return Err(ApiError::BadRequest(format!(
                "Too many bands: {bands} (maximum {MAX_BANDS})"
            )));
        }
        Ok(bands)
    }

    async fn render_and_store(
        &self,
        prefix: &str,
        request: GenerationRequest,
        bands: usize,
        wave: WaveParameters,
    ) -> Result<Generated, ApiError> {
        let palette = self.palettes.load(&request.palette)?;
        let render = &self.config.render;

        let parameters = GenerationParameters {
            wave_type: request.wave_type.as_str().to_string(),
            palette: request.palette.clone(),
            grain_effect: request.grain_effect,
            bands,
            width: render.width,
            height: render.height,
            amplitude: wave.amplitude,
            frequency: wave.frequency,
            flip: wave.flip,
            jitter: wave.jitter.map(|j| j.amount),
            seed: request.seed,
        };

        let mut renderer = Renderer::new(palette)
            .size(render.width, render.height)
            .steps(bands)
            .wave(wave);
        if let Some(border) = render.border_spec() {
            renderer = renderer.border(border);
        }
        if let Some(grain) = request.grain_effect.spec(request.seed) {
            renderer = renderer.grain(grain);
        }

        tracing::info!(
            wave_type = %request.wave_type,
            palette = %request.palette,
            grain = %request.grain_effect,
            bands,
            "Generating gradient"
        );

        let png = self
            .render_in_blocking_context(renderer, render.optimize)
            .await?;

        let filename = build_filename(
            prefix,
            request.wave_type,
            &request.palette,
            request.grain_effect,
        );
        let item = self.gallery.save(&filename, &png).await?;

        Ok(Generated {
            filename: item.filename,
            image_url: item.image_url,
            parameters,
        })
    }

    /// Execute CPU-intensive rendering in a blocking context
    async fn render_in_blocking_context(
        &self,
        renderer: Renderer,
        optimize: bool,
    ) -> Result<Vec<u8>, ApiError> {
        // Validate up front so parameter errors surface as 400s
        renderer.validate()?;

        tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ApiError> {
            let canvas = renderer.render()?;
            Ok(encode_png(&canvas, optimize)?)
        })
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
    }
}

/// Organic variant of a preset.
///
/// Bell and valley types get a random height and jitter; the others keep
/// their shape with the height scaled by 0.3..1.5.
fn randomize_wave(rng: &mut impl Rng, wave_type: WaveType, bands: usize) -> WaveParameters {
    let mut preset = wave_type.preset();
    if wave_type.is_organic() {
        preset.height_fraction = rng.gen_range(0.02..0.3);
        let jitter = rng.gen_range(0.0..0.05) * bands as f64;
        preset
            .parameters(bands)
            .jitter(Jitter::new(jitter, rng.gen_range(1..1_000_000)))
    } else {
        preset.height_fraction *= rng.gen_range(0.3..1.5);
        preset.parameters(bands)
    }
}

/// `wave_4A_purple_to_orange_none_20250101_120000_1a2b3c4d.png`
fn build_filename(
    prefix: &str,
    wave_type: WaveType,
    palette: &str,
    grain: GrainEffect,
) -> String {
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let id: [u8; 4] = rand::thread_rng().gen();
    format!(
        "{prefix}_{wave_type}_{palette}_{grain}_{timestamp}_{}.png",
        hex::encode(id)
    )
}
