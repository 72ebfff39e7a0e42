//! 8-bit RGB color type
//!
//! Gradients are built and stored as plain 8-bit sRGB triples. Blending is
//! a per-channel linear interpolation on the encoded values, which is what
//! palette files and PNG output both speak.

use std::fmt;
use std::str::FromStr;

use crate::error::GradientError;

/// A color with three 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Linear blend between two colors, rounded to the nearest integer.
    ///
    /// `t = 0.0` returns `a`, `t = 1.0` returns `b`. `t` is clamped to
    /// `0.0..=1.0`.
    ///
    /// # Example
    /// ```
    /// use wave_gradient::Rgb;
    /// let mid = Rgb::lerp(Rgb::BLACK, Rgb::WHITE, 0.5);
    /// assert_eq!(mid, Rgb::new(128, 128, 128));
    /// ```
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| -> u8 {
            let v = x as f64 + (y as f64 - x as f64) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Self::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
    }

    /// Perceived brightness using Rec. 601 weights (0.0..=255.0).
    #[inline]
    pub fn luminance(self) -> f64 {
        0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Add a signed delta to each channel, clamping to 0..=255.
    #[inline]
    pub(crate) fn offset(self, dr: f64, dg: f64, db: f64) -> Self {
        let apply = |c: u8, d: f64| (c as f64 + d).round().clamp(0.0, 255.0) as u8;
        Self::new(apply(self.r, dr), apply(self.g, dg), apply(self.b, db))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = GradientError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// with surrounding whitespace trimmed.
    ///
    /// ```
    /// use wave_gradient::Rgb;
    ///
    /// let teal: Rgb = "#008080".parse().unwrap();
    /// assert_eq!(teal, Rgb::new(0, 128, 128));
    ///
    /// let red: Rgb = "f00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || GradientError::InvalidColor(trimmed.to_string());

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            3 => {
                // Shorthand: 0xF -> 0xFF
                let digit = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::new(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let pair =
                    |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
                Ok(Self::new(pair(0)?, pair(2)?, pair(4)?))
            }
            _ => Err(invalid()),
        }
    }
}
