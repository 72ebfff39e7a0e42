//! Error type for the wave-gradient public API.
//!
//! Every variant is a validation failure detected before any pixel work
//! starts. Once a render, extraction or expansion begins, it cannot fail.

use thiserror::Error;

/// Unified error type for palette handling and rendering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GradientError {
    /// Canvas width or height is zero
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// No colors provided
    #[error("palette cannot be empty")]
    EmptyPalette,

    /// Band count is zero
    #[error("invalid step count: {0} (must be at least 1)")]
    InvalidStepCount(usize),

    /// A non-blank palette file line is not a `#RRGGBB` color
    #[error("invalid palette file: line {line} is not a #RRGGBB color: {content:?}")]
    InvalidPaletteFile { line: usize, content: String },

    /// Source image could not be decoded
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Requested extraction color count is zero
    #[error("invalid color count: {0} (must be at least 1)")]
    InvalidColorCount(usize),

    /// Expansion target is smaller than the input palette
    #[error("invalid target size: {target} is smaller than the palette ({len} colors)")]
    InvalidTargetSize { target: usize, len: usize },

    /// Border leaves no interior to draw bands in
    #[error("border of {border}px leaves no room inside a {width}x{height} canvas")]
    BorderTooLarge { border: u32, width: u32, height: u32 },

    /// Hex color string could not be parsed
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GradientError::InvalidDimension {
                width: 0,
                height: 10
            }
            .to_string(),
            "invalid dimensions: 0x10"
        );
        assert_eq!(
            GradientError::EmptyPalette.to_string(),
            "palette cannot be empty"
        );
        assert_eq!(
            GradientError::InvalidPaletteFile {
                line: 3,
                content: "blue".to_string()
            }
            .to_string(),
            "invalid palette file: line 3 is not a #RRGGBB color: \"blue\""
        );
        assert_eq!(
            GradientError::InvalidTargetSize { target: 2, len: 5 }.to_string(),
            "invalid target size: 2 is smaller than the palette (5 colors)"
        );
        assert_eq!(
            GradientError::BorderTooLarge {
                border: 60,
                width: 100,
                height: 200
            }
            .to_string(),
            "border of 60px leaves no room inside a 100x200 canvas"
        );
    }
}
