//! Color type
//!
//! All gradient math works on 8-bit RGB triples. Interpolation is linear per
//! channel on the stored values; no color-space conversion is applied.
//!
//! # Example
//!
//! ```
//! use wave_gradient::Rgb;
//!
//! let purple: Rgb = "#6a0dad".parse().unwrap();
//! let halfway = Rgb::lerp(purple, Rgb::WHITE, 0.5);
//! assert_eq!(halfway.to_hex(), "#b586d6");
//! ```

mod rgb;

pub use rgb::Rgb;
