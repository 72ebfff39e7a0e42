//! Palette types and utilities
//!
//! This module provides the [`Palette`] type along with the text file format,
//! extraction from images and expansion by interpolation.

mod expand;
mod extract;
mod file;
mod palette;

pub use expand::expand;
pub use extract::{decode_image, extract, extract_from_bytes, extract_with, ExtractMethod};
pub use file::{format_palette, parse_palette};
pub use palette::{BandSampling, Palette};
