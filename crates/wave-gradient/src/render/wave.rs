//! Wave displacement parameters.
//!
//! The driving axis is the one the sine runs along: x for horizontal bands,
//! y for vertical bands. Offsets are expressed in band units so the same
//! parameters look alike at any resolution and band count.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Band layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Horizontal bands stacked top to bottom, displaced vertically.
    #[default]
    Horizontal,
    /// Vertical bands laid out left to right, displaced horizontally.
    Vertical,
}

impl Orientation {
    pub fn as_str(self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" => Ok(Orientation::Horizontal),
            "vertical" => Ok(Orientation::Vertical),
            other => Err(format!(
                "unknown orientation '{other}' (expected horizontal or vertical)"
            )),
        }
    }
}

/// Amplitude envelope along the driving axis.
///
/// `envelope(xn)` scales the sine at normalized position `xn` in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaveProfile {
    /// Full amplitude everywhere.
    #[default]
    Uniform,
    /// No displacement; straight bands.
    Flat,
    /// Strong in the center, calm at both edges.
    Bell,
    /// Calm in the center, strong at both edges.
    Valley,
    /// Wave on the left 30%, fading out to straight bands.
    FadeOutLeft,
    /// Straight bands, fading into a wave on the right 30%.
    FadeInRight,
    /// Straight left half, wave rising over the right half.
    RiseRight,
    /// Wave over the left half, falling to straight on the right half.
    FallLeft,
    /// A single falling wave confined to the middle half.
    Center,
    /// `FadeOutLeft` on the left half, `RiseRight` on the right half.
    Edges,
}

impl WaveProfile {
    pub const ALL: [WaveProfile; 10] = [
        WaveProfile::Uniform,
        WaveProfile::Flat,
        WaveProfile::Bell,
        WaveProfile::Valley,
        WaveProfile::FadeOutLeft,
        WaveProfile::FadeInRight,
        WaveProfile::RiseRight,
        WaveProfile::FallLeft,
        WaveProfile::Center,
        WaveProfile::Edges,
    ];

    /// Amplitude multiplier at normalized position `xn`.
    pub fn envelope(self, xn: f64) -> f64 {
        match self {
            WaveProfile::Uniform => 1.0,
            WaveProfile::Flat => 0.0,
            WaveProfile::Bell => (1.0 - (2.0 * xn - 1.0).abs()).powi(2),
            WaveProfile::Valley => (2.0 * xn - 1.0).abs().powi(2),
            WaveProfile::FadeOutLeft => {
                if xn < 0.3 {
                    1.0 - xn / 0.3
                } else {
                    0.0
                }
            }
            WaveProfile::FadeInRight => {
                if xn > 0.7 {
                    (xn - 0.7) / 0.3
                } else {
                    0.0
                }
            }
            WaveProfile::RiseRight => {
                if xn >= 0.5 {
                    (xn - 0.5) / 0.5
                } else {
                    0.0
                }
            }
            WaveProfile::FallLeft => {
                if xn < 0.5 {
                    1.0 - xn / 0.5
                } else {
                    0.0
                }
            }
            WaveProfile::Center => {
                if (0.25..=0.75).contains(&xn) {
                    1.0 - (xn - 0.25) / 0.5
                } else {
                    0.0
                }
            }
            WaveProfile::Edges => {
                if xn < 0.5 {
                    WaveProfile::FadeOutLeft.envelope(xn)
                } else {
                    WaveProfile::RiseRight.envelope(xn)
                }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WaveProfile::Uniform => "uniform",
            WaveProfile::Flat => "flat",
            WaveProfile::Bell => "bell",
            WaveProfile::Valley => "valley",
            WaveProfile::FadeOutLeft => "fade-out-left",
            WaveProfile::FadeInRight => "fade-in-right",
            WaveProfile::RiseRight => "rise-right",
            WaveProfile::FallLeft => "fall-left",
            WaveProfile::Center => "center",
            WaveProfile::Edges => "edges",
        }
    }
}

impl fmt::Display for WaveProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaveProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase().replace('_', "-");
        WaveProfile::ALL
            .into_iter()
            .find(|p| p.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = WaveProfile::ALL.iter().map(|p| p.as_str()).collect();
                format!("unknown wave profile '{s}' (expected one of: {})", names.join(", "))
            })
    }
}

/// Knot spacing of the jitter curve in pixels.
const JITTER_KNOT_SPACING: u32 = 80;

/// Organic low-frequency displacement added on top of the sine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    /// Peak displacement as a fraction of the band size.
    pub amount: f64,
    pub seed: u64,
}

impl Jitter {
    pub fn new(amount: f64, seed: u64) -> Self {
        Self { amount, seed }
    }

    /// Smoothed noise in `[-1, 1]`, one value per position along the
    /// driving axis.
    ///
    /// Random knot values are placed every ~80 px, linearly interpolated and
    /// then softened with a `[0.25, 0.5, 0.25]` kernel.
    pub(crate) fn curve(&self, extent: u32) -> Vec<f64> {
        if extent < 2 {
            return vec![0.0; extent as usize];
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let knots = (extent / JITTER_KNOT_SPACING).max(2) as usize;
        let values: Vec<f64> = (0..knots).map(|_| rng.gen_range(-1.0..=1.0)).collect();
        let spacing = (extent - 1) as f64 / (knots - 1) as f64;

        let raw: Vec<f64> = (0..extent)
            .map(|x| {
                let pos = x as f64 / spacing;
                let k = (pos.floor() as usize).min(knots - 2);
                let t = pos - k as f64;
                values[k] + (values[k + 1] - values[k]) * t
            })
            .collect();

        // Zero padding at the ends, matching a same-size convolution.
        let n = raw.len();
        (0..n)
            .map(|i| {
                let left = if i > 0 { raw[i - 1] } else { 0.0 };
                let right = if i + 1 < n { raw[i + 1] } else { 0.0 };
                0.25 * left + 0.5 * raw[i] + 0.25 * right
            })
            .collect()
    }
}

/// Sine displacement of the band boundaries.
///
/// # Example
///
/// ```
/// use wave_gradient::{Orientation, WaveParameters, WaveProfile};
///
/// let wave = WaveParameters::new(0.5, 3.0, Orientation::Horizontal)
///     .profile(WaveProfile::Bell)
///     .flip(true);
/// assert_eq!(wave.amplitude, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParameters {
    /// Peak offset as a fraction of the band size.
    pub amplitude: f64,
    /// Full sine cycles across the driving axis.
    pub frequency: f64,
    pub orientation: Orientation,
    pub profile: WaveProfile,
    /// Negate the offset (mirror the wave across the band axis).
    pub flip: bool,
    pub jitter: Option<Jitter>,
}

impl Default for WaveParameters {
    fn default() -> Self {
        Self::new(0.08, 2.5, Orientation::Horizontal)
    }
}

impl WaveParameters {
    pub fn new(amplitude: f64, frequency: f64, orientation: Orientation) -> Self {
        Self {
            amplitude,
            frequency,
            orientation,
            profile: WaveProfile::Uniform,
            flip: false,
            jitter: None,
        }
    }

    /// Straight, undistorted bands.
    pub fn flat(orientation: Orientation) -> Self {
        Self::new(0.0, 0.0, orientation)
    }

    #[inline]
    pub fn profile(mut self, profile: WaveProfile) -> Self {
        self.profile = profile;
        self
    }

    #[inline]
    pub fn flip(mut self, flip: bool) -> Self {
        self.flip = flip;
        self
    }

    #[inline]
    pub fn jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = Some(jitter);
        self
    }

    /// True when no position can be displaced.
    pub fn is_flat(&self) -> bool {
        let jitter_off = self.jitter.map_or(true, |j| j.amount == 0.0);
        jitter_off
            && (self.amplitude == 0.0
                || self.frequency == 0.0
                || self.profile == WaveProfile::Flat)
    }

    /// Offset in pixels for every position along a driving axis of
    /// `extent` pixels, with bands `band_size` pixels deep.
    pub(crate) fn offsets(&self, extent: u32, band_size: f64) -> Vec<f64> {
        if self.is_flat() {
            return vec![0.0; extent as usize];
        }

        let jitter = self
            .jitter
            .filter(|j| j.amount != 0.0)
            .map(|j| (j.amount, j.curve(extent)));
        let sign = if self.flip { -1.0 } else { 1.0 };

        (0..extent)
            .map(|x| {
                let xn = x as f64 / extent as f64;
                let mut offset = self.amplitude
                    * self.profile.envelope(xn)
                    * band_size
                    * (TAU * self.frequency * xn).sin();
                if let Some((amount, curve)) = &jitter {
                    offset += amount * curve[x as usize] * band_size;
                }
                sign * offset
            })
            .collect()
    }
}
