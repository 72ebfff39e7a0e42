//! Gradient rendering
//!
//! Bands are laid out inside the area left free by the border, displaced by
//! a sine along the driving axis and filled per pixel. Where the
//! displacement pulls a pixel outside the band stack, the gap takes the
//! first palette color above and the last palette color below.
//!
//! ```text
//!   offset(x) = amplitude * envelope(x / extent) * band_size * sin(2 pi f x / extent)
//!   y'        = y - offset(x)
//!   y' < 0          -> first color
//!   y' >= depth     -> last color
//!   otherwise       -> band floor(y' / band_size)
//! ```
//!
//! Grain and the optional [`Warp`] are applied to the interior only, in that
//! order, so border pixels always equal the border color exactly.

mod grain;
mod renderer;
mod warp;
mod wave;

pub use grain::{GrainFalloff, GrainMode, GrainSpec};
pub use renderer::{render, render_chunky, BorderSpec, Renderer};
pub use warp::Warp;
pub use wave::{Jitter, Orientation, WaveParameters, WaveProfile};
