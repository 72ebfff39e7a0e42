//! Ordered, non-empty color palette.
//!
//! Order is meaningful: the first color is the top (or leftmost) band of a
//! gradient, the last color the bottom (or rightmost) one.

use std::ops::Index;

use crate::color::Rgb;
use crate::error::GradientError;

/// How band colors are derived when the band count differs from the
/// palette length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BandSampling {
    /// Pick the palette entry at the evenly spaced position nearest to the
    /// band. With `steps == len` every band gets its own palette color.
    #[default]
    Nearest,
    /// Average the slice of the palette that falls into the band.
    ///
    /// Useful for condensing long palettes into few bands; produces colors
    /// that are not necessarily palette members.
    Average,
}

impl BandSampling {
    pub fn as_str(self) -> &'static str {
        match self {
            BandSampling::Nearest => "nearest",
            BandSampling::Average => "average",
        }
    }
}

impl std::str::FromStr for BandSampling {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(BandSampling::Nearest),
            "average" => Ok(BandSampling::Average),
            other => Err(format!(
                "unknown sampling '{other}' (expected nearest or average)"
            )),
        }
    }
}

/// An ordered sequence of at least one color.
///
/// # Example
///
/// ```
/// use wave_gradient::{Palette, Rgb};
///
/// let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.first(), Rgb::BLACK);
/// assert_eq!(palette.last(), Rgb::WHITE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from an ordered list of colors.
    ///
    /// # Errors
    ///
    /// [`GradientError::EmptyPalette`] if `colors` is empty.
    pub fn new(colors: Vec<Rgb>) -> Result<Self, GradientError> {
        if colors.is_empty() {
            return Err(GradientError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Parse each string as a hex color.
    ///
    /// ```
    /// use wave_gradient::Palette;
    ///
    /// let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
    /// assert_eq!(palette.len(), 2);
    /// ```
    pub fn from_hex<S: AsRef<str>>(hex: &[S]) -> Result<Self, GradientError> {
        let colors = hex
            .iter()
            .map(|s| s.as_ref().parse::<Rgb>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Number of colors (always >= 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; provided for API symmetry with collections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn first(&self) -> Rgb {
        self.colors[0]
    }

    #[inline]
    pub fn last(&self) -> Rgb {
        self.colors[self.colors.len() - 1]
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.colors.iter().copied()
    }

    pub fn into_colors(self) -> Vec<Rgb> {
        self.colors
    }

    /// Lowercase hex strings, in order.
    pub fn to_hex_strings(&self) -> Vec<String> {
        self.colors.iter().map(|c| c.to_hex()).collect()
    }

    /// Derive one color per band for a gradient with `steps` bands.
    ///
    /// `steps` must be at least 1; callers validate this before rendering.
    /// Allocates `steps` entries, so prefer [`band_color`](Self::band_color)
    /// when the band count is unbounded.
    pub fn band_colors(&self, steps: usize, sampling: BandSampling) -> Vec<Rgb> {
        (0..steps).map(|i| self.band_color(i, steps, sampling)).collect()
    }

    /// Color of band `i` out of `steps`.
    ///
    /// `i` is clamped to the last band.
    pub fn band_color(&self, i: usize, steps: usize, sampling: BandSampling) -> Rgb {
        debug_assert!(steps > 0, "band_color requires at least one step");
        let i = i.min(steps.saturating_sub(1));
        match sampling {
            BandSampling::Nearest => self.nearest_for_band(i, steps),
            BandSampling::Average => self.average_for_band(i, steps),
        }
    }

    /// Palette entry at the evenly spaced position nearest to band `i`.
    fn nearest_for_band(&self, i: usize, steps: usize) -> Rgb {
        let last = self.colors.len() - 1;
        if steps == 1 || last == 0 {
            return self.colors[0];
        }
        let pos = i as f64 * last as f64 / (steps - 1) as f64;
        self.colors[(pos.round() as usize).min(last)]
    }

    /// Integer mean of the palette slice covering band `i`.
    fn average_for_band(&self, i: usize, steps: usize) -> Rgb {
        let per_step = self.colors.len() as f64 / steps as f64;
        let start = ((i as f64 * per_step) as usize).min(self.colors.len() - 1);
        let end = (((i as f64 + 1.0) * per_step) as usize)
            .max(start + 1)
            .min(self.colors.len());
        let slice = &self.colors[start..end];

        let (r, g, b) = slice.iter().fold((0u32, 0u32, 0u32), |(r, g, b), c| {
            (r + c.r as u32, g + c.g as u32, b + c.b as u32)
        });
        let n = slice.len() as u32;
        Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
    }
}

impl Index<usize> for Palette {
    type Output = Rgb;

    fn index(&self, index: usize) -> &Self::Output {
        &self.colors[index]
    }
}

impl TryFrom<Vec<Rgb>> for Palette {
    type Error = GradientError;

    fn try_from(colors: Vec<Rgb>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Rgb;
    type IntoIter = std::slice::Iter<'a, Rgb>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}
