use std::io::Cursor;
use wave_gradient::Canvas;

use crate::error::RenderError;

/// Encode a canvas as an 8-bit RGB PNG.
///
/// With `optimize` the fast-encoded stream is re-compressed by oxipng; if
/// oxipng fails the unoptimized bytes are returned.
pub fn encode_png(canvas: &Canvas, optimize: bool) -> Result<Vec<u8>, RenderError> {
    let data = canvas.to_rgb8();

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, canvas.width(), canvas.height());
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        if optimize {
            // oxipng picks filters and compression afterwards
            encoder.set_compression(png::Compression::Fast);
            encoder.set_filter(png::FilterType::NoFilter);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(&data)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    if !optimize {
        return Ok(png_bytes);
    }

    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}
