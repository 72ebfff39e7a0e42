//! Palette extraction from raster images.
//!
//! All methods return colors in spatial order along the read axis, never in
//! frequency order, so an extracted palette re-renders with the same visual
//! flow as its source.

use std::collections::HashMap;

use image::RgbImage;

use crate::color::Rgb;
use crate::error::GradientError;
use crate::render::Orientation;

use super::Palette;

/// How colors are pulled out of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractMethod {
    /// One pixel at each of `n` evenly spaced positions along the axis, taken
    /// on the center line of the cross axis.
    #[default]
    Sample,
    /// Mean of each of `n` equal slabs along the axis.
    BandAverage,
    /// 5-bit-per-channel quantization; the `n` most populous buckets ordered
    /// by where their pixels sit along the axis.
    Quantize,
}

impl ExtractMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtractMethod::Sample => "sample",
            ExtractMethod::BandAverage => "band-average",
            ExtractMethod::Quantize => "quantize",
        }
    }
}

impl std::str::FromStr for ExtractMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sample" => Ok(ExtractMethod::Sample),
            "band-average" | "band_average" | "average" => Ok(ExtractMethod::BandAverage),
            "quantize" => Ok(ExtractMethod::Quantize),
            other => Err(format!(
                "unknown extract method '{other}' (expected sample, band-average or quantize)"
            )),
        }
    }
}

/// Decode an encoded image (PNG, JPEG, GIF, WebP, BMP) into RGB8.
///
/// # Errors
///
/// [`GradientError::InvalidImage`] if the bytes cannot be decoded or the
/// image has no pixels.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, GradientError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| GradientError::InvalidImage(e.to_string()))?
        .to_rgb8();
    ensure_not_empty(&decoded)?;
    Ok(decoded)
}

/// Extract `num_colors` colors along `orientation` using [`ExtractMethod::Sample`].
///
/// `Orientation::Vertical` reads top-to-bottom, `Orientation::Horizontal`
/// reads left-to-right.
///
/// # Example
///
/// ```
/// use image::{Rgb as Px, RgbImage};
/// use wave_gradient::{extract, Orientation, Rgb};
///
/// let img = RgbImage::from_fn(2, 100, |_, y| if y < 50 { Px([0, 0, 0]) } else { Px([255, 255, 255]) });
/// let palette = extract(&img, 2, Orientation::Vertical).unwrap();
/// assert_eq!(palette.colors(), &[Rgb::BLACK, Rgb::WHITE]);
/// ```
pub fn extract(
    image: &RgbImage,
    num_colors: usize,
    orientation: Orientation,
) -> Result<Palette, GradientError> {
    extract_with(image, num_colors, orientation, ExtractMethod::Sample)
}

/// Decode `bytes` and extract with [`ExtractMethod::Sample`].
pub fn extract_from_bytes(
    bytes: &[u8],
    num_colors: usize,
    orientation: Orientation,
) -> Result<Palette, GradientError> {
    if num_colors == 0 {
        return Err(GradientError::InvalidColorCount(num_colors));
    }
    let image = decode_image(bytes)?;
    extract(&image, num_colors, orientation)
}

/// Extract `num_colors` colors along `orientation` with an explicit method.
///
/// # Errors
///
/// - [`GradientError::InvalidColorCount`] if `num_colors == 0`
/// - [`GradientError::InvalidImage`] if the image has zero width or height
pub fn extract_with(
    image: &RgbImage,
    num_colors: usize,
    orientation: Orientation,
    method: ExtractMethod,
) -> Result<Palette, GradientError> {
    if num_colors == 0 {
        return Err(GradientError::InvalidColorCount(num_colors));
    }
    ensure_not_empty(image)?;

    let axis = Axis::new(image, orientation);
    let colors = match method {
        ExtractMethod::Sample => sample(image, &axis, num_colors),
        ExtractMethod::BandAverage => band_average(image, &axis, num_colors),
        ExtractMethod::Quantize => quantize(image, &axis, num_colors),
    };
    Palette::new(colors)
}

fn ensure_not_empty(image: &RgbImage) -> Result<(), GradientError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(GradientError::InvalidImage(format!(
            "image has no pixels ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(())
}

/// Maps (position along the read axis, position across it) to image
/// coordinates.
struct Axis {
    vertical: bool,
    extent: u32,
    cross: u32,
}

impl Axis {
    fn new(image: &RgbImage, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Vertical => Self {
                vertical: true,
                extent: image.height(),
                cross: image.width(),
            },
            Orientation::Horizontal => Self {
                vertical: false,
                extent: image.width(),
                cross: image.height(),
            },
        }
    }

    #[inline]
    fn pixel(&self, image: &RgbImage, along: u32, across: u32) -> Rgb {
        let (x, y) = if self.vertical {
            (across, along)
        } else {
            (along, across)
        };
        Rgb::from_bytes(image.get_pixel(x, y).0)
    }

    #[inline]
    fn along(&self, x: u32, y: u32) -> u32 {
        if self.vertical {
            y
        } else {
            x
        }
    }

    /// Slab `[start, end)` covering slot `i` of `n`; never empty.
    fn slab(&self, i: usize, n: usize) -> (u32, u32) {
        let extent = self.extent as u64;
        let start = ((i as u64 * extent) / n as u64).min(extent - 1) as u32;
        let end = (((i as u64 + 1) * extent) / n as u64) as u32;
        (start, end.max(start + 1).min(self.extent))
    }
}

fn sample(image: &RgbImage, axis: &Axis, n: usize) -> Vec<Rgb> {
    let center = axis.cross / 2;
    (0..n)
        .map(|i| {
            let pos = ((i as f64 + 0.5) * axis.extent as f64 / n as f64) as u32;
            axis.pixel(image, pos.min(axis.extent - 1), center)
        })
        .collect()
}

fn band_average(image: &RgbImage, axis: &Axis, n: usize) -> Vec<Rgb> {
    (0..n)
        .map(|i| {
            let (start, end) = axis.slab(i, n);
            let mut sum = [0u64; 3];
            for along in start..end {
                for across in 0..axis.cross {
                    let c = axis.pixel(image, along, across);
                    sum[0] += c.r as u64;
                    sum[1] += c.g as u64;
                    sum[2] += c.b as u64;
                }
            }
            let count = (end - start) as u64 * axis.cross as u64;
            mean_color(sum, count)
        })
        .collect()
}

#[derive(Default)]
struct Bucket {
    count: u64,
    sum: [u64; 3],
    position: u64,
}

fn quantize(image: &RgbImage, axis: &Axis, n: usize) -> Vec<Rgb> {
    let mut buckets: HashMap<[u8; 3], Bucket> = HashMap::new();

    for (x, y, px) in image.enumerate_pixels() {
        let [r, g, b] = px.0;
        let bucket = buckets.entry([r >> 3, g >> 3, b >> 3]).or_default();
        bucket.count += 1;
        bucket.sum[0] += r as u64;
        bucket.sum[1] += g as u64;
        bucket.sum[2] += b as u64;
        bucket.position += axis.along(x, y) as u64;
    }

    let mut ranked: Vec<([u8; 3], Bucket)> = buckets.into_iter().collect();
    // Most populous first; the key breaks ties so output is stable across
    // HashMap iteration orders.
    ranked.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.0.cmp(&b.0)));
    ranked.truncate(n);

    let mut picked: Vec<(f64, Rgb)> = ranked
        .into_iter()
        .map(|(_, bucket)| {
            let mean_pos = bucket.position as f64 / bucket.count as f64;
            (mean_pos, mean_color(bucket.sum, bucket.count))
        })
        .collect();

    picked.sort_by(|a, b| {
        a.0.total_cmp(&b.0)
            .then_with(|| a.1.luminance().total_cmp(&b.1.luminance()))
    });
    picked.into_iter().map(|(_, color)| color).collect()
}

fn mean_color(sum: [u64; 3], count: u64) -> Rgb {
    let channel = |s: u64| ((s as f64 / count as f64).round()).min(255.0) as u8;
    Rgb::new(channel(sum[0]), channel(sum[1]), channel(sum[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb as Px;

    fn vertical_ramp(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |_, y| {
            let v = (y * 255 / (height - 1)) as u8;
            Px([v, v, v])
        })
    }

    fn stripes(colors: &[[u8; 3]], width: u32, rows_each: u32) -> RgbImage {
        RgbImage::from_fn(width, rows_each * colors.len() as u32, |_, y| {
            Px(colors[(y / rows_each) as usize])
        })
    }

    #[test]
    fn test_zero_colors_rejected() {
        let img = vertical_ramp(2, 10);
        for method in [
            ExtractMethod::Sample,
            ExtractMethod::BandAverage,
            ExtractMethod::Quantize,
        ] {
            assert_eq!(
                extract_with(&img, 0, Orientation::Vertical, method),
                Err(GradientError::InvalidColorCount(0))
            );
        }
    }

    #[test]
    fn test_empty_image_rejected() {
        let img = RgbImage::new(0, 10);
        assert!(matches!(
            extract(&img, 2, Orientation::Vertical),
            Err(GradientError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        assert!(matches!(
            extract_from_bytes(b"definitely not an image", 3, Orientation::Vertical),
            Err(GradientError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_sample_ramp_is_dark_to_light() {
        let img = vertical_ramp(2, 100);
        let palette = extract(&img, 2, Orientation::Vertical).unwrap();
        assert!(palette.first().luminance() < palette.last().luminance());
    }

    #[test]
    fn test_sample_positions() {
        let img = stripes(&[[255, 0, 0], [0, 255, 0], [0, 0, 255]], 5, 10);
        let palette = extract(&img, 3, Orientation::Vertical).unwrap();
        assert_eq!(
            palette.colors(),
            &[
                Rgb::new(255, 0, 0),
                Rgb::new(0, 255, 0),
                Rgb::new(0, 0, 255)
            ]
        );
    }

    #[test]
    fn test_horizontal_reads_left_to_right() {
        let img = RgbImage::from_fn(100, 3, |x, _| {
            if x < 50 {
                Px([10, 20, 30])
            } else {
                Px([200, 210, 220])
            }
        });
        let palette = extract(&img, 2, Orientation::Horizontal).unwrap();
        assert_eq!(
            palette.colors(),
            &[Rgb::new(10, 20, 30), Rgb::new(200, 210, 220)]
        );
    }

    #[test]
    fn test_more_colors_than_pixels_repeats_positions() {
        let img = stripes(&[[0, 0, 0], [255, 255, 255]], 1, 1);
        let palette = extract(&img, 5, Orientation::Vertical).unwrap();
        assert_eq!(palette.len(), 5);
        assert_eq!(palette.first(), Rgb::BLACK);
        assert_eq!(palette.last(), Rgb::WHITE);

        let averaged =
            extract_with(&img, 5, Orientation::Vertical, ExtractMethod::BandAverage).unwrap();
        assert_eq!(averaged.len(), 5);
    }

    #[test]
    fn test_band_average() {
        // rows 0..2 are 0 and 100, rows 2..4 are 200 and 250
        let values = [0u8, 100, 200, 250];
        let img = RgbImage::from_fn(3, 4, |_, y| {
            let v = values[y as usize];
            Px([v, v, v])
        });
        let palette =
            extract_with(&img, 2, Orientation::Vertical, ExtractMethod::BandAverage).unwrap();
        assert_eq!(
            palette.colors(),
            &[Rgb::new(50, 50, 50), Rgb::new(225, 225, 225)]
        );
    }

    #[test]
    fn test_quantize_orders_by_position_not_frequency() {
        // white dominates by area but sits at the bottom
        let mut img = RgbImage::from_pixel(4, 40, Px([255, 255, 255]));
        for y in 0..5 {
            for x in 0..4 {
                img.put_pixel(x, y, Px([8, 8, 8]));
            }
        }
        let palette =
            extract_with(&img, 2, Orientation::Vertical, ExtractMethod::Quantize).unwrap();
        assert_eq!(
            palette.colors(),
            &[Rgb::new(8, 8, 8), Rgb::new(255, 255, 255)]
        );
    }

    #[test]
    fn test_quantize_returns_fewer_when_image_has_fewer_buckets() {
        let img = stripes(&[[0, 0, 0], [255, 255, 255]], 2, 5);
        let palette =
            extract_with(&img, 8, Orientation::Vertical, ExtractMethod::Quantize).unwrap();
        assert_eq!(palette.colors(), &[Rgb::BLACK, Rgb::WHITE]);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(
            "band-average".parse::<ExtractMethod>(),
            Ok(ExtractMethod::BandAverage)
        );
        assert_eq!("Quantize".parse::<ExtractMethod>(), Ok(ExtractMethod::Quantize));
        assert!("kmeans".parse::<ExtractMethod>().is_err());
        assert_eq!(ExtractMethod::Sample.as_str(), "sample");
    }
}
