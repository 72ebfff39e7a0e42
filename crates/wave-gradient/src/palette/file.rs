//! Flat text palette format.
//!
//! One `#RRGGBB` color per line, in gradient order. Blank lines are skipped
//! and surrounding whitespace is trimmed; anything else is an error carrying
//! the 1-based line number.
//!
//! ```text
//! #0b1d51
//! #725cad
//!
//! #8ccdeb
//! ```

use crate::color::Rgb;
use crate::error::GradientError;

use super::Palette;

/// Parse palette file contents.
///
/// # Errors
///
/// - [`GradientError::InvalidPaletteFile`] for a non-blank line that is not
///   exactly `#` followed by six hex digits
/// - [`GradientError::EmptyPalette`] if no colors remain
///
/// # Example
///
/// ```
/// use wave_gradient::{parse_palette, Rgb};
///
/// let palette = parse_palette("#000000\n\n#FFFFFF\n").unwrap();
/// assert_eq!(palette.colors(), &[Rgb::BLACK, Rgb::WHITE]);
/// ```
pub fn parse_palette(text: &str) -> Result<Palette, GradientError> {
    let mut colors = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        colors.push(parse_line(line).ok_or_else(|| GradientError::InvalidPaletteFile {
            line: idx + 1,
            content: line.to_string(),
        })?);
    }

    Palette::new(colors)
}

/// Render a palette in the file format: lowercase `#rrggbb`, one per line,
/// with a trailing newline.
pub fn format_palette(palette: &Palette) -> String {
    let mut out = String::with_capacity(palette.len() * 8);
    for color in palette.iter() {
        out.push_str(&color.to_hex());
        out.push('\n');
    }
    out
}

// Stricter than `Rgb::from_str`: the file format has no shorthand and the
// leading '#' is mandatory.
fn parse_line(line: &str) -> Option<Rgb> {
    let hex = line.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    hex.parse().ok()
}
