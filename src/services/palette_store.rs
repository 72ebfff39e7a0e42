use regex::Regex;
use serde::Serialize;
use std::sync::{Arc, OnceLock};
use utoipa::ToSchema;
use wave_gradient::{parse_palette, Palette};

use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;

/// Palette names are plain file stems; anything else could escape the
/// palettes directory.
fn is_valid_palette_name(name: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(name))
}

/// Summary of an available palette
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaletteInfo {
    /// File stem used in requests (e.g. `purple_to_orange`)
    pub name: String,
    /// Human-readable name (e.g. `Purple To Orange`)
    pub display_name: String,
    /// Number of colors in the palette
    pub colors: usize,
    /// Colors as `#rrggbb`
    pub hex: Vec<String>,
}

/// Named palettes from the asset loader, filtered by the config allow-list
pub struct PaletteStore {
    loader: Arc<AssetLoader>,
    config: Arc<AppConfig>,
}

impl PaletteStore {
    pub fn new(loader: Arc<AssetLoader>, config: Arc<AppConfig>) -> Self {
        Self { loader, config }
    }

    /// Names of all offered palettes, sorted
    pub fn names(&self) -> Vec<String> {
        self.loader
            .list_palettes()
            .into_iter()
            .filter(|name| self.config.allows_palette(name))
            .collect()
    }

    /// All offered palettes that parse; broken files are logged and skipped
    pub fn list(&self) -> Vec<PaletteInfo> {
        self.names()
            .into_iter()
            .filter_map(|name| match self.load(&name) {
                Ok(palette) => Some(PaletteInfo {
                    display_name: display_name(&name),
                    colors: palette.len(),
                    hex: palette.to_hex_strings(),
                    name,
                }),
                Err(e) => {
                    tracing::warn!(palette = %name, error = %e, "Skipping unreadable palette");
                    None
                }
            })
            .collect()
    }

    /// Load and parse a palette by name
    pub fn load(&self, name: &str) -> Result<Palette, ApiError> {
        if !is_valid_palette_name(name) {
            return Err(ApiError::BadRequest(format!("Invalid palette name: {name}")));
        }
        if !self.config.allows_palette(name) {
            return Err(ApiError::BadRequest(format!("Palette not found: {name}")));
        }

        let content = self.loader.read_palette_string(name).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ApiError::BadRequest(format!("Palette not found: {name}"))
            } else {
                ApiError::Internal(format!("Failed to read palette {name}: {e}"))
            }
        })?;

        let palette = parse_palette(&content)?;
        tracing::debug!(palette = %name, colors = palette.len(), "Loaded palette");
        Ok(palette)
    }
}

/// `pink_to_black_to_cyan` -> `Pink To Black To Cyan`
pub fn display_name(name: &str) -> String {
    name.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
