//! Rendered pixel grid.

use image::RgbImage;

use crate::color::Rgb;

/// The output of a render: `width x height` colors in row-major order.
///
/// A canvas is only mutated while the renderer fills it; callers receive an
/// owned value with read-only accessors.
///
/// # Example
///
/// ```
/// use wave_gradient::{render_chunky, Orientation, Palette, Rgb};
///
/// let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
/// let canvas = render_chunky(&palette, 4, 4, 2, Orientation::Horizontal, None, None).unwrap();
///
/// assert_eq!(canvas.get(0, 0), Some(Rgb::BLACK));
/// assert_eq!(canvas.get(0, 3), Some(Rgb::WHITE));
/// assert_eq!(canvas.get(4, 0), None);
/// assert_eq!(canvas.to_rgb8().len(), 4 * 4 * 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl Canvas {
    /// A canvas of one color. Dimensions are validated by the renderer.
    pub(crate) fn filled(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> Option<&[Rgb]> {
        if y >= self.height {
            return None;
        }
        let start = self.index(0, y);
        Some(&self.pixels[start..start + self.width as usize])
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }

    /// Packed `R, G, B` bytes, row-major, ready for an 8-bit RGB encoder.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.to_bytes()).collect()
    }

    /// Copy into an [`image::RgbImage`].
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            image::Rgb(self.pixels[self.index(x, y)].to_bytes())
        })
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub(crate) fn set(&mut self, x: u32, y: u32, color: Rgb) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }
}
