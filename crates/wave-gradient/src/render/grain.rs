//! Film-grain noise overlay.
//!
//! Gaussian noise is drawn from a seeded [`StdRng`] so a given seed always
//! produces the same pattern. Noise is generated per block (one sample per
//! `scale x scale` square) in row-major block order.
//!
//! Speckle grain is the sparse alternative: a few pixels are hit, each hit
//! stamps a small square of added white.

use std::f64::consts::TAU;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::Rgb;

use super::wave::Orientation;

/// Spatial weighting of the grain strength.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GrainFalloff {
    /// Same strength everywhere.
    #[default]
    Uniform,
    /// Strongest in the center, fading towards the edges but never below
    /// `floor` (an absolute intensity, like [`GrainSpec::intensity`]).
    Centered { floor: f64 },
    /// Ramps linearly from `min` (absolute) at the top or left edge to the
    /// full intensity at the bottom or right edge. `Vertical` ramps down the
    /// rows, `Horizontal` across the columns.
    Linear { direction: Orientation, min: f64 },
}

/// Kind of noise laid over the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GrainMode {
    /// Dense Gaussian noise, `intensity` is the standard deviation.
    #[default]
    Gaussian,
    /// Sparse white speckles.
    ///
    /// Every pixel fires with `probability * density * size`, where both
    /// factors are drawn uniformly from `1 +/- variation`. A hit stamps a
    /// square of `max(1, floor(2 * size))` pixels, each brightened by a
    /// random amount in `50..=255`.
    Speckle {
        probability: f64,
        density_variation: f64,
        size_variation: f64,
    },
}

/// Grain settings.
///
/// # Example
///
/// ```
/// use wave_gradient::{GrainFalloff, GrainSpec};
///
/// let grain = GrainSpec::new(0.15).scale(2).monochrome(true).seed(7);
/// assert_eq!(grain.falloff, GrainFalloff::Uniform);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrainSpec {
    /// Noise standard deviation as a fraction of full scale (0.0..=1.0).
    /// Ignored by [`GrainMode::Speckle`].
    pub intensity: f64,
    pub mode: GrainMode,
    /// Block size in pixels; 1 means independent per-pixel noise.
    pub scale: u32,
    pub falloff: GrainFalloff,
    /// Apply the same delta to all three channels.
    pub monochrome: bool,
    /// Fold deltas to positive values so grain only brightens.
    pub lighten: bool,
    /// `None` seeds from the system clock.
    pub seed: Option<u64>,
}

impl GrainSpec {
    pub fn new(intensity: f64) -> Self {
        Self {
            intensity,
            mode: GrainMode::Gaussian,
            scale: 1,
            falloff: GrainFalloff::Uniform,
            monochrome: false,
            lighten: false,
            seed: None,
        }
    }

    /// Centered grain: `intensity` at the center, no weaker than `floor`.
    pub fn centered(intensity: f64, floor: f64) -> Self {
        Self::new(intensity).falloff(GrainFalloff::Centered { floor })
    }

    /// Grain whose strength ramps from `min` to `max` along `direction`.
    pub fn linear(max: f64, min: f64, direction: Orientation) -> Self {
        Self::new(max).falloff(GrainFalloff::Linear { direction, min })
    }

    /// Sparse white speckles, see [`GrainMode::Speckle`].
    pub fn speckle(probability: f64, density_variation: f64, size_variation: f64) -> Self {
        Self::new(probability).mode(GrainMode::Speckle {
            probability,
            density_variation,
            size_variation,
        })
    }

    #[inline]
    pub fn mode(mut self, mode: GrainMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    #[inline]
    pub fn falloff(mut self, falloff: GrainFalloff) -> Self {
        self.falloff = falloff;
        self
    }

    #[inline]
    pub fn monochrome(mut self, monochrome: bool) -> Self {
        self.monochrome = monochrome;
        self
    }

    #[inline]
    pub fn lighten(mut self, lighten: bool) -> Self {
        self.lighten = lighten;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Perturb a `width x height` region of `pixels` (row stride `stride`)
    /// starting at `(x0, y0)`.
    pub(crate) fn apply(
        &self,
        pixels: &mut [Rgb],
        stride: u32,
        origin: (u32, u32),
        size: (u32, u32),
    ) {
        if size.0 == 0 || size.1 == 0 {
            return;
        }
        match self.mode {
            GrainMode::Gaussian => self.apply_gaussian(pixels, stride, origin, size),
            GrainMode::Speckle {
                probability,
                density_variation,
                size_variation,
            } => {
                if probability <= 0.0 {
                    return;
                }
                let overlay = self.speckle_overlay(
                    size,
                    probability,
                    density_variation,
                    size_variation,
                );
                for_each_in_region(pixels, stride, origin, size, |x, y, px| {
                    let v = overlay[y * size.0 as usize + x];
                    if v > 0 {
                        let v = v as f64;
                        *px = px.offset(v, v, v);
                    }
                });
            }
        }
    }

    fn apply_gaussian(
        &self,
        pixels: &mut [Rgb],
        stride: u32,
        origin: (u32, u32),
        (width, height): (u32, u32),
    ) {
        if self.intensity <= 0.0 {
            return;
        }

        let scale = self.scale.max(1) as usize;
        let blocks_x = (width as usize).div_ceil(scale);
        let blocks_y = (height as usize).div_ceil(scale);
        let noise = self.block_noise(blocks_x * blocks_y);

        let sigma = self.intensity * 255.0;
        let weight = Weight::new(self.falloff, self.intensity, width, height);
        let fold = |n: f64| if self.lighten { n.abs() } else { n };

        for_each_in_region(pixels, stride, origin, (width, height), |x, y, px| {
            let [nr, ng, nb] = noise[(y / scale) * blocks_x + x / scale];
            let amp = sigma * weight.at(x as u32, y as u32);
            *px = px.offset(fold(nr) * amp, fold(ng) * amp, fold(nb) * amp);
        });
    }

    /// Brightness added per region pixel, row-major. Later stamps overwrite
    /// earlier ones.
    fn speckle_overlay(
        &self,
        (width, height): (u32, u32),
        probability: f64,
        density_variation: f64,
        size_variation: f64,
    ) -> Vec<u8> {
        let (w, h) = (width as usize, height as usize);
        let mut rng = StdRng::seed_from_u64(self.seed.unwrap_or_else(clock_seed));
        let mut overlay = vec![0u8; w * h];
        let factor = |variation: f64, rng: &mut StdRng| {
            1.0 + variation * (rng.gen::<f64>() - 0.5) * 2.0
        };

        for y in 0..h {
            for x in 0..w {
                let density = factor(density_variation, &mut rng);
                let size = factor(size_variation, &mut rng);
                if rng.gen::<f64>() >= probability * density * size {
                    continue;
                }
                let dot = ((size * 2.0) as usize).max(1);
                for dy in 0..dot {
                    for dx in 0..dot {
                        let (gx, gy) = ((x + dx).min(w - 1), (y + dy).min(h - 1));
                        overlay[gy * w + gx] = rng.gen_range(50.0..=255.0_f64) as u8;
                    }
                }
            }
        }
        overlay
    }

    fn block_noise(&self, blocks: usize) -> Vec<[f64; 3]> {
        let mut rng = StdRng::seed_from_u64(self.seed.unwrap_or_else(clock_seed));
        (0..blocks)
            .map(|_| {
                if self.monochrome {
                    let n = standard_normal(&mut rng);
                    [n, n, n]
                } else {
                    [
                        standard_normal(&mut rng),
                        standard_normal(&mut rng),
                        standard_normal(&mut rng),
                    ]
                }
            })
            .collect()
    }
}

/// Visit every pixel of a region with region-local coordinates.
fn for_each_in_region(
    pixels: &mut [Rgb],
    stride: u32,
    (x0, y0): (u32, u32),
    (width, height): (u32, u32),
    mut f: impl FnMut(usize, usize, &mut Rgb),
) {
    let (stride, x0, y0) = (stride as usize, x0 as usize, y0 as usize);
    for y in 0..height as usize {
        let row = (y0 + y) * stride + x0;
        for x in 0..width as usize {
            f(x, y, &mut pixels[row + x]);
        }
    }
}

/// Falloff weight in `[min, 1]` for region-local coordinates.
enum Weight {
    Uniform,
    Centered { min: f64, cx: f64, cy: f64 },
    Linear { vertical: bool, min: f64, extent: u32 },
}

impl Weight {
    fn new(falloff: GrainFalloff, intensity: f64, width: u32, height: u32) -> Self {
        let relative = |floor: f64| (floor / intensity).clamp(0.0, 1.0);
        match falloff {
            GrainFalloff::Uniform => Weight::Uniform,
            GrainFalloff::Centered { floor } => Weight::Centered {
                min: relative(floor),
                cx: (width / 2) as f64,
                cy: (height / 2) as f64,
            },
            GrainFalloff::Linear { direction, min } => {
                let vertical = direction == Orientation::Vertical;
                Weight::Linear {
                    vertical,
                    min: relative(min),
                    extent: if vertical { height } else { width },
                }
            }
        }
    }

    #[inline]
    fn at(&self, x: u32, y: u32) -> f64 {
        match *self {
            Weight::Uniform => 1.0,
            Weight::Centered { min, cx, cy } => {
                let norm = |v: u32, c: f64| if c > 0.0 { (v as f64 - c) / c } else { 0.0 };
                let d = (norm(x, cx).powi(2) + norm(y, cy).powi(2)).sqrt();
                (1.0 - d).clamp(min, 1.0)
            }
            Weight::Linear {
                vertical,
                min,
                extent,
            } => {
                if extent < 2 {
                    return 1.0;
                }
                let pos = if vertical { y } else { x };
                let t = pos as f64 / (extent - 1) as f64;
                min + (1.0 - min) * t
            }
        }
    }
}

/// Box-Muller transform over two uniform samples.
fn standard_normal(rng: &mut StdRng) -> f64 {
    // 1 - u keeps the log argument in (0, 1].
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
