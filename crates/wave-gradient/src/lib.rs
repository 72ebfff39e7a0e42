//! wave-gradient: wave-distorted band gradients from color palettes
//!
//! This library maps an ordered palette onto a raster as a stack of bands
//! whose boundaries follow a sine wave, and provides the palette plumbing
//! around it: a flat text file format, extraction from images and expansion
//! by interpolation.
//!
//! # Quick Start
//!
//! The [`Renderer`] builder is the primary entry point:
//!
//! ```
//! use wave_gradient::{Orientation, Palette, Renderer, WaveParameters};
//!
//! let palette = Palette::from_hex(&["#0b1d51", "#725cad", "#8ccdeb", "#ffe3a9"]).unwrap();
//! let canvas = Renderer::new(palette)
//!     .size(400, 600)
//!     .wave(WaveParameters::new(0.3, 2.5, Orientation::Horizontal))
//!     .render()
//!     .unwrap();
//!
//! assert_eq!(canvas.width(), 400);
//! assert_eq!(canvas.height(), 600);
//! ```
//!
//! # Palettes
//!
//! - [`parse_palette`] / [`format_palette`]: one `#RRGGBB` per line
//! - [`extract`] / [`extract_with`]: pull colors out of an image in spatial
//!   order along an axis
//! - [`expand`]: grow a palette by interpolating between its colors
//!
//! ```
//! use wave_gradient::{expand, parse_palette};
//!
//! let palette = parse_palette("#000000\n#ffffff\n").unwrap();
//! let expanded = expand(&palette, 5).unwrap();
//! assert_eq!(expanded.len(), 5);
//! assert_eq!(expanded.first(), palette.first());
//! assert_eq!(expanded.last(), palette.last());
//! ```
//!
//! # Purity
//!
//! Nothing in this crate logs, touches the filesystem or keeps global state.
//! Every error is a validation failure reported before any pixel is written.
//! Grain is the only source of randomness and is reproducible when seeded.

pub mod color;
pub mod error;
pub mod output;
pub mod palette;
pub mod render;

#[cfg(test)]
mod domain_tests;

pub use color::Rgb;
pub use error::GradientError;
pub use output::Canvas;
pub use palette::{
    decode_image, expand, extract, extract_from_bytes, extract_with, format_palette,
    parse_palette, BandSampling, ExtractMethod, Palette,
};
pub use render::{
    render, render_chunky, BorderSpec, GrainFalloff, GrainMode, GrainSpec, Jitter, Orientation,
    Renderer, Warp, WaveParameters, WaveProfile,
};
