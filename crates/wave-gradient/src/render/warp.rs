//! Coordinate-remap distortions applied to the finished gradient.
//!
//! Each warp maps a destination pixel `(x, y)` to a source pixel computed
//! from normalized coordinates `xn = x / width`, `yn = y / height`. Source
//! coordinates are truncated towards zero and clamped to the region, so a
//! warp never reads outside it.

use std::f64::consts::{PI, TAU};
use std::fmt;

use crate::color::Rgb;

/// A distortion of the rendered interior.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Warp {
    /// Gentle rolling displacement.
    ///
    /// `dy = a * sin(2 pi f xn) * height`, `dx = 0.3 * a * cos(2 pi f yn) * width`.
    Rolling { amplitude: f64, frequency: f64 },
    /// Pulls pixels towards `(0.5, center_y)`, harder near the bottom.
    Pooling { strength: f64, center_y: f64 },
    /// Two overlapping sine/cosine ripple fields.
    Rippling { amplitude: f64, frequency: f64 },
    /// Rotation around a center that is strongest at the center.
    Swirling {
        strength: f64,
        center_x: f64,
        center_y: f64,
    },
}

impl Warp {
    pub fn name(&self) -> &'static str {
        match self {
            Warp::Rolling { .. } => "rolling",
            Warp::Pooling { .. } => "pooling",
            Warp::Rippling { .. } => "rippling",
            Warp::Swirling { .. } => "swirling",
        }
    }

    /// Source position (fractional, unclamped) for destination `(xn, yn)`,
    /// both in pixels of a `width x height` region.
    fn source(&self, x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
        let (xn, yn) = (x / width, y / height);
        match *self {
            Warp::Rolling {
                amplitude,
                frequency,
            } => {
                let dy = amplitude * (TAU * frequency * xn).sin() * height;
                let dx = amplitude * (TAU * frequency * yn).cos() * width * 0.3;
                (x + dx, y + dy)
            }
            Warp::Pooling { strength, center_y } => {
                let distance = ((xn - 0.5).powi(2) + (yn - center_y).powi(2)).sqrt();
                let pull = (strength * (1.0 - distance) * (1.0 - yn)).clamp(0.0, 1.0);
                let dx = (0.5 - xn) * pull * width * 0.5;
                let dy = (center_y - yn) * pull * height * 0.3;
                (x + dx, y + dy)
            }
            Warp::Rippling {
                amplitude,
                frequency,
            } => {
                let fast = frequency * 1.5;
                let ripple = amplitude * (TAU * frequency * xn).sin() * (TAU * frequency * yn).cos()
                    + amplitude * 0.5 * (TAU * fast * xn).sin() * (TAU * fast * yn).sin();
                (x + ripple * width * 0.2, y + ripple * height)
            }
            Warp::Swirling {
                strength,
                center_x,
                center_y,
            } => {
                let (dx, dy) = (xn - center_x, yn - center_y);
                let distance = (dx * dx + dy * dy).sqrt();
                let twist = (strength * (1.0 - distance)).clamp(0.0, 1.0) * PI * 2.0;
                let angle = dy.atan2(dx) + twist;
                (
                    (center_x + distance * angle.cos()) * width,
                    (center_y + distance * angle.sin()) * height,
                )
            }
        }
    }

    /// Remap a `width x height` region of `pixels` (row stride `stride`)
    /// starting at `(x0, y0)`. Pixels outside the region are untouched.
    pub(crate) fn apply(
        &self,
        pixels: &mut [Rgb],
        stride: u32,
        (x0, y0): (u32, u32),
        (width, height): (u32, u32),
    ) {
        if width == 0 || height == 0 {
            return;
        }
        let (stride, x0, y0) = (stride as usize, x0 as usize, y0 as usize);
        let (w, h) = (width as usize, height as usize);

        let mut source = Vec::with_capacity(w * h);
        for y in 0..h {
            let row = (y0 + y) * stride + x0;
            source.extend_from_slice(&pixels[row..row + w]);
        }

        let clamp = |v: f64, max: usize| (v as i64).clamp(0, max as i64 - 1) as usize;
        for y in 0..h {
            let row = (y0 + y) * stride + x0;
            for x in 0..w {
                let (sx, sy) = self.source(x as f64, y as f64, w as f64, h as f64);
                pixels[row + x] = source[clamp(sy, h) * w + clamp(sx, w)];
            }
        }
    }
}

impl fmt::Display for Warp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
