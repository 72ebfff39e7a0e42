//! Named wave presets and grain effects offered by the control panel.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use wave_gradient::{GrainSpec, Orientation, WaveParameters, WaveProfile};

/// Preset shape behind a wave type.
///
/// `height_fraction` is the peak offset as a fraction of the interior
/// height; [`WavePreset::parameters`] converts it to band units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavePreset {
    pub profile: WaveProfile,
    pub height_fraction: f64,
    pub frequency: f64,
    pub flip: bool,
}

impl WavePreset {
    const fn new(profile: WaveProfile, height_fraction: f64, frequency: f64, flip: bool) -> Self {
        Self {
            profile,
            height_fraction,
            frequency,
            flip,
        }
    }

    /// Wave parameters for a gradient with `bands` bands.
    pub fn parameters(&self, bands: usize) -> WaveParameters {
        WaveParameters::new(
            self.height_fraction * bands as f64,
            self.frequency,
            Orientation::Horizontal,
        )
        .profile(self.profile)
        .flip(self.flip)
    }
}

/// Wave type codes: `0.0` is a straight gradient, the lettered families
/// differ in where along the width the wave is strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveType {
    Straight,
    T1A,
    T1B,
    T1C,
    T1D,
    T2A,
    T2B,
    T2C,
    T2D,
    T2E,
    T3A,
    T3B,
    T3C,
    T3D,
    T4A,
    T4B,
    T5A,
    T5B,
    T5C,
    T5D,
}

impl WaveType {
    pub const ALL: [WaveType; 20] = [
        WaveType::Straight,
        WaveType::T1A,
        WaveType::T1B,
        WaveType::T1C,
        WaveType::T1D,
        WaveType::T2A,
        WaveType::T2B,
        WaveType::T2C,
        WaveType::T2D,
        WaveType::T2E,
        WaveType::T3A,
        WaveType::T3B,
        WaveType::T3C,
        WaveType::T3D,
        WaveType::T4A,
        WaveType::T4B,
        WaveType::T5A,
        WaveType::T5B,
        WaveType::T5C,
        WaveType::T5D,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WaveType::Straight => "0.0",
            WaveType::T1A => "1A",
            WaveType::T1B => "1B",
            WaveType::T1C => "1C",
            WaveType::T1D => "1D",
            WaveType::T2A => "2A",
            WaveType::T2B => "2B",
            WaveType::T2C => "2C",
            WaveType::T2D => "2D",
            WaveType::T2E => "2E",
            WaveType::T3A => "3A",
            WaveType::T3B => "3B",
            WaveType::T3C => "3C",
            WaveType::T3D => "3D",
            WaveType::T4A => "4A",
            WaveType::T4B => "4B",
            WaveType::T5A => "5A",
            WaveType::T5B => "5B",
            WaveType::T5C => "5C",
            WaveType::T5D => "5D",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WaveType::Straight => "Straight gradient",
            WaveType::T1A => "Wave fading out to the left",
            WaveType::T1B => "Wave fading in on the right",
            WaveType::T1C => "Wave fading out to the left, flipped",
            WaveType::T1D => "Wave fading in on the right, flipped",
            WaveType::T2A => "Wave rising to the right",
            WaveType::T2B => "Wave falling to the left",
            WaveType::T2C => "Wave rising to the right, flipped",
            WaveType::T2D => "Wave falling to the left, flipped",
            WaveType::T2E => "Wave in the center",
            WaveType::T3A => "Waves on both edges",
            WaveType::T3B => "Waves on both edges, flipped",
            WaveType::T3C => "Faster waves on both edges",
            WaveType::T3D => "Faster waves on both edges, flipped",
            WaveType::T4A => "Bell-shaped wave",
            WaveType::T4B => "Valley-shaped wave",
            WaveType::T5A | WaveType::T5B | WaveType::T5C | WaveType::T5D => {
                "Straight bands, organic drift when randomized"
            }
        }
    }

    /// `flip` is set on the types whose bands sample below the pixel, so
    /// the wave's crest pushes the bands up.
    pub fn preset(self) -> WavePreset {
        use WaveProfile::*;
        match self {
            WaveType::Straight => WavePreset::new(Flat, 0.0, 1.0, false),
            WaveType::T1A => WavePreset::new(FadeOutLeft, 0.25, 1.5, true),
            WaveType::T1B => WavePreset::new(FadeInRight, 0.25, 1.5, true),
            WaveType::T1C => WavePreset::new(FadeOutLeft, 0.25, 1.5, false),
            WaveType::T1D => WavePreset::new(FadeInRight, 0.25, 1.5, false),
            WaveType::T2A => WavePreset::new(RiseRight, 0.2, 1.0, true),
            WaveType::T2B => WavePreset::new(FallLeft, 0.2, 1.0, true),
            WaveType::T2C => WavePreset::new(RiseRight, 0.2, 1.0, false),
            WaveType::T2D => WavePreset::new(FallLeft, 0.2, 1.0, false),
            WaveType::T2E => WavePreset::new(Center, 0.2, 1.0, true),
            WaveType::T3A => WavePreset::new(Edges, 0.2, 1.0, true),
            WaveType::T3B => WavePreset::new(Edges, 0.2, 1.0, false),
            WaveType::T3C => WavePreset::new(Edges, 0.2, 1.5, true),
            WaveType::T3D => WavePreset::new(Edges, 0.2, 1.5, false),
            WaveType::T4A => WavePreset::new(Bell, 0.2, 1.0, true),
            WaveType::T4B => WavePreset::new(Valley, 0.2, 1.0, true),
            WaveType::T5A | WaveType::T5B | WaveType::T5C | WaveType::T5D => {
                WavePreset::new(Flat, 0.0, 1.0, true)
            }
        }
    }

    /// Types whose randomized variant also gets organic jitter.
    pub fn is_organic(self) -> bool {
        matches!(
            self,
            WaveType::T4A
                | WaveType::T4B
                | WaveType::T5A
                | WaveType::T5B
                | WaveType::T5C
                | WaveType::T5D
        )
    }
}

impl fmt::Display for WaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WaveType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        WaveType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown wave type: {s}"))
    }
}

/// Post-process applied on top of the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum GrainEffect {
    #[default]
    None,
    Dithering,
    WhiteGrain,
}

impl GrainEffect {
    pub const ALL: [GrainEffect; 3] = [
        GrainEffect::None,
        GrainEffect::Dithering,
        GrainEffect::WhiteGrain,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GrainEffect::None => "none",
            GrainEffect::Dithering => "dithering",
            GrainEffect::WhiteGrain => "white_grain",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            GrainEffect::None => "No Grain",
            GrainEffect::Dithering => "Dithering",
            GrainEffect::WhiteGrain => "White Grain",
        }
    }

    /// Grain settings for this effect, `None` for [`GrainEffect::None`].
    pub fn spec(self, seed: Option<u64>) -> Option<GrainSpec> {
        let spec = match self {
            GrainEffect::None => return None,
            GrainEffect::Dithering => GrainSpec::new(0.15).scale(1),
            GrainEffect::WhiteGrain => GrainSpec::speckle(0.01, 0.2, 0.3),
        };
        Some(match seed {
            Some(seed) => spec.seed(seed),
            None => spec,
        })
    }
}

impl fmt::Display for GrainEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrainEffect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(GrainEffect::None),
            "dithering" => Ok(GrainEffect::Dithering),
            "white_grain" | "white-grain" => Ok(GrainEffect::WhiteGrain),
            other => Err(format!("Unknown grain effect: {other}")),
        }
    }
}
