//! Renderer builder and the free render functions.
//!
//! [`Renderer`] wraps the band layout, wave displacement, grain and border
//! passes behind a fluent builder. [`render`] and [`render_chunky`] are thin
//! wrappers for one-shot calls.

use crate::color::Rgb;
use crate::error::GradientError;
use crate::output::Canvas;
use crate::palette::{BandSampling, Palette};

use super::grain::GrainSpec;
use super::warp::Warp;
use super::wave::{Orientation, WaveParameters};

/// A solid frame drawn around the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderSpec {
    /// Frame thickness in pixels on each side.
    pub width: u32,
    pub color: Rgb,
}

impl BorderSpec {
    pub fn new(width: u32, color: Rgb) -> Self {
        Self { width, color }
    }
}

/// Wave gradient builder.
///
/// - Constructor requires a [`Palette`] (never empty)
/// - Configuration methods consume and return `self`
/// - [`render()`](Self::render) takes `&self`, so one builder can render
///   repeatedly (grain without a seed differs between calls)
///
/// Defaults: 2000x3000, one band per palette color, [`WaveParameters::default`],
/// no border, no grain, no warp, [`BandSampling::Nearest`].
///
/// # Example
///
/// ```
/// use wave_gradient::{BorderSpec, Palette, Renderer, Rgb, WaveParameters, Orientation};
///
/// let palette = Palette::from_hex(&["#0b1d51", "#725cad", "#8ccdeb", "#ffe3a9"]).unwrap();
/// let canvas = Renderer::new(palette)
///     .size(200, 300)
///     .steps(8)
///     .wave(WaveParameters::new(0.5, 2.0, Orientation::Horizontal))
///     .border(BorderSpec::new(10, Rgb::WHITE))
///     .render()
///     .unwrap();
///
/// assert_eq!(canvas.get(0, 0), Some(Rgb::WHITE));
/// ```
#[derive(Debug, Clone)]
pub struct Renderer {
    palette: Palette,
    width: u32,
    height: u32,
    steps: usize,
    wave: WaveParameters,
    border: Option<BorderSpec>,
    grain: Option<GrainSpec>,
    warp: Option<Warp>,
    sampling: BandSampling,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        let steps = palette.len();
        Self {
            palette,
            width: 2000,
            height: 3000,
            steps,
            wave: WaveParameters::default(),
            border: None,
            grain: None,
            warp: None,
            sampling: BandSampling::default(),
        }
    }

    /// Set output dimensions in pixels, border included.
    #[inline]
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of bands.
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    #[inline]
    pub fn wave(mut self, wave: WaveParameters) -> Self {
        self.wave = wave;
        self
    }

    #[inline]
    pub fn border(mut self, border: BorderSpec) -> Self {
        self.border = Some(border);
        self
    }

    #[inline]
    pub fn grain(mut self, grain: GrainSpec) -> Self {
        self.grain = Some(grain);
        self
    }

    /// Distort the interior after grain.
    #[inline]
    pub fn warp(mut self, warp: Warp) -> Self {
        self.warp = Some(warp);
        self
    }

    #[inline]
    pub fn sampling(mut self, sampling: BandSampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Check dimensions, band count and border before any pixel work.
    ///
    /// # Errors
    ///
    /// In order: [`GradientError::InvalidDimension`],
    /// [`GradientError::InvalidStepCount`], [`GradientError::BorderTooLarge`].
    pub fn validate(&self) -> Result<(), GradientError> {
        if self.width == 0 || self.height == 0 {
            return Err(GradientError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.steps == 0 {
            return Err(GradientError::InvalidStepCount(self.steps));
        }
        if let Some(border) = &self.border {
            let twice = border.width as u64 * 2;
            if twice >= self.width as u64 || twice >= self.height as u64 {
                return Err(GradientError::BorderTooLarge {
                    border: border.width,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }

    /// Render the gradient.
    ///
    /// Fails only on validation; once pixels are being written nothing can
    /// go wrong.
    pub fn render(&self) -> Result<Canvas, GradientError> {
        self.validate()?;

        let b = self.border.map_or(0, |border| border.width);
        let frame = self.border.map_or(self.palette.first(), |border| border.color);
        let (iw, ih) = (self.width - 2 * b, self.height - 2 * b);

        // Band space: `drive` runs along the sine, `depth` across the bands.
        let (drive, depth) = match self.wave.orientation {
            Orientation::Horizontal => (iw, ih),
            Orientation::Vertical => (ih, iw),
        };
        let band_size = depth as f64 / self.steps as f64;
        let offsets = self.wave.offsets(drive, band_size);
        let (top, bottom) = (self.palette.first(), self.palette.last());
        let last_band = self.steps - 1;

        let color_at = |d: u32, p: u32| -> Rgb {
            let shifted = p as f64 - offsets[d as usize];
            if shifted < 0.0 {
                top
            } else if shifted >= depth as f64 {
                bottom
            } else {
                let band = ((shifted / band_size) as usize).min(last_band);
                self.palette.band_color(band, self.steps, self.sampling)
            }
        };

        let mut canvas = Canvas::filled(self.width, self.height, frame);
        for y in 0..ih {
            for x in 0..iw {
                let color = match self.wave.orientation {
                    Orientation::Horizontal => color_at(x, y),
                    Orientation::Vertical => color_at(y, x),
                };
                canvas.set(b + x, b + y, color);
            }
        }

        if let Some(grain) = &self.grain {
            grain.apply(canvas.pixels_mut(), self.width, (b, b), (iw, ih));
        }
        if let Some(warp) = &self.warp {
            warp.apply(canvas.pixels_mut(), self.width, (b, b), (iw, ih));
        }

        Ok(canvas)
    }
}

/// Render a wave gradient.
///
/// `steps` bands are laid out inside the area left by `border`, displaced by
/// `wave` and optionally overlaid with `grain`.
///
/// # Example
///
/// ```
/// use wave_gradient::{render, Orientation, Palette, Rgb, WaveParameters};
///
/// let palette = Palette::from_hex(&["#000000", "#ffffff"]).unwrap();
/// let wave = WaveParameters::flat(Orientation::Horizontal);
/// let canvas = render(&palette, 100, 100, 2, &wave, None, None).unwrap();
///
/// assert_eq!(canvas.get(50, 49), Some(Rgb::BLACK));
/// assert_eq!(canvas.get(50, 50), Some(Rgb::WHITE));
/// ```
pub fn render(
    palette: &Palette,
    width: u32,
    height: u32,
    steps: usize,
    wave: &WaveParameters,
    border: Option<&BorderSpec>,
    grain: Option<&GrainSpec>,
) -> Result<Canvas, GradientError> {
    let mut renderer = Renderer::new(palette.clone())
        .size(width, height)
        .steps(steps)
        .wave(*wave);
    if let Some(border) = border {
        renderer = renderer.border(*border);
    }
    if let Some(grain) = grain {
        renderer = renderer.grain(*grain);
    }
    renderer.render()
}

/// Render straight, undisplaced bands.
pub fn render_chunky(
    palette: &Palette,
    width: u32,
    height: u32,
    steps: usize,
    orientation: Orientation,
    border: Option<&BorderSpec>,
    grain: Option<&GrainSpec>,
) -> Result<Canvas, GradientError> {
    render(
        palette,
        width,
        height,
        steps,
        &WaveParameters::flat(orientation),
        border,
        grain,
    )
}
