//! Output types for the rendering pipeline.
//!
//! [`Canvas`] is the only thing a render hands back. Encoding to a file
//! format is left to the caller; [`Canvas::to_rgb8`] gives packed bytes for
//! any 8-bit RGB encoder.

mod canvas;

pub use canvas::Canvas;
