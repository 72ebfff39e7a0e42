use crate::assets::AssetLoader;
use serde::Deserialize;
use wave_gradient::{BorderSpec, Rgb};

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Canvas defaults for images produced by the HTTP server
    #[serde(default)]
    pub render: RenderDefaults,

    /// Palettes offered by the control panel (all available palettes if unset)
    #[serde(default)]
    pub palettes: Option<Vec<String>>,
}

/// Render settings applied to every server-side generation
#[derive(Debug, Deserialize, Clone)]
pub struct RenderDefaults {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Border width in pixels (0 disables the border)
    #[serde(default = "default_border")]
    pub border: u32,

    #[serde(default = "default_border_color")]
    pub border_color: String,

    /// Band count when a request does not specify one
    #[serde(default = "default_bands")]
    pub bands: usize,

    /// Re-compress generated PNGs with oxipng
    #[serde(default)]
    pub optimize: bool,
}

fn default_width() -> u32 {
    2000
}

fn default_height() -> u32 {
    3000
}

fn default_border() -> u32 {
    100
}

fn default_border_color() -> String {
    "#FFFFFF".to_string()
}

fn default_bands() -> usize {
    20
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            border: default_border(),
            border_color: default_border_color(),
            bands: default_bands(),
            optimize: false,
        }
    }
}

impl RenderDefaults {
    /// Border to draw, or `None` when the width is 0.
    ///
    /// An unparsable color falls back to white.
    pub fn border_spec(&self) -> Option<BorderSpec> {
        if self.border == 0 {
            return None;
        }
        let color = self.border_color.parse::<Rgb>().unwrap_or_else(|e| {
            tracing::warn!(color = %self.border_color, %e, "Invalid border color, using white");
            Rgb::WHITE
        });
        Some(BorderSpec::new(self.border, color))
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => Self::from_yaml(&content),
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration, falling back to defaults on malformed YAML
    pub fn from_yaml(content: &str) -> Self {
        match serde_yaml::from_str::<Self>(content) {
            Ok(config) => {
                tracing::info!(
                    width = config.render.width,
                    height = config.render.height,
                    bands = config.render.bands,
                    palettes = ?config.palettes.as_ref().map(Vec::len),
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to parse config, using defaults");
                Self::default()
            }
        }
    }

    /// Whether a palette is offered, given the optional allow-list
    pub fn allows_palette(&self, name: &str) -> bool {
        self.palettes
            .as_ref()
            .map_or(true, |names| names.iter().any(|n| n == name))
    }
}
