//! Test fixtures and constants.

use bandwave::models::AppConfig;

/// Built-in palettes shipped in `palettes/`
pub mod palettes {
    pub const PURPLE_TO_ORANGE: &str = "purple_to_orange";
    pub const ORANGE_TO_TEAL: &str = "orange_to_teal";
}

/// Canvas size used by the test app
pub const WIDTH: u32 = 60;
pub const HEIGHT: u32 = 90;
pub const BORDER: u32 = 5;

/// Configuration with a canvas small enough to render instantly
pub fn small_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.render.width = WIDTH;
    config.render.height = HEIGHT;
    config.render.border = BORDER;
    config.render.bands = 6;
    config
}

/// A two-color palette file body
pub const BLACK_WHITE: &str = "#000000\n#ffffff\n";
