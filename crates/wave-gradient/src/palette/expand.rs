//! Palette expansion by linear interpolation.

use crate::color::Rgb;
use crate::error::GradientError;

use super::Palette;

/// Grow a palette to `target_size` colors.
///
/// The input colors are kept as exact anchors in their original order. The
/// `target_size - len` new colors are spread over the gaps between adjacent
/// anchors as evenly as possible, earlier gaps taking the remainder. A gap
/// with `k` new colors gets `lerp(a, b, j / (k + 1))` for `j` in `1..=k`.
///
/// A single-color palette has no gaps and is repeated.
///
/// # Errors
///
/// [`GradientError::InvalidTargetSize`] if `target_size < palette.len()`.
///
/// # Example
///
/// ```
/// use wave_gradient::{expand, Palette, Rgb};
///
/// let palette = Palette::new(vec![Rgb::BLACK, Rgb::WHITE]).unwrap();
/// let expanded = expand(&palette, 3).unwrap();
/// assert_eq!(expanded.colors(), &[Rgb::BLACK, Rgb::new(128, 128, 128), Rgb::WHITE]);
/// ```
pub fn expand(palette: &Palette, target_size: usize) -> Result<Palette, GradientError> {
    let len = palette.len();
    if target_size < len {
        return Err(GradientError::InvalidTargetSize {
            target: target_size,
            len,
        });
    }
    if target_size == len {
        return Ok(palette.clone());
    }
    if len == 1 {
        return Palette::new(vec![palette.first(); target_size]);
    }

    let gaps = len - 1;
    let extra = target_size - len;
    let per_gap = extra / gaps;
    let remainder = extra % gaps;

    let mut colors = Vec::with_capacity(target_size);
    for (i, pair) in palette.colors().windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let k = per_gap + usize::from(i < remainder);

        colors.push(a);
        for j in 1..=k {
            colors.push(Rgb::lerp(a, b, j as f64 / (k + 1) as f64));
        }
    }
    colors.push(palette.last());

    debug_assert_eq!(colors.len(), target_size);
    Palette::new(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bw() -> Palette {
        Palette::new(vec![Rgb::BLACK, Rgb::WHITE]).unwrap()
    }

    #[test]
    fn test_target_smaller_than_palette() {
        let palette = Palette::from_hex(&["#000000", "#111111", "#222222"]).unwrap();
        assert_eq!(
            expand(&palette, 2),
            Err(GradientError::InvalidTargetSize { target: 2, len: 3 })
        );
    }

    #[test]
    fn test_same_size_is_identity() {
        let palette = Palette::from_hex(&["#0b1d51", "#725cad", "#8ccdeb"]).unwrap();
        assert_eq!(expand(&palette, 3).unwrap(), palette);
    }

    #[test]
    fn test_single_color_repeats() {
        let palette = Palette::new(vec![Rgb::new(1, 2, 3)]).unwrap();
        let expanded = expand(&palette, 4).unwrap();
        assert_eq!(expanded.colors(), &[Rgb::new(1, 2, 3); 4]);
    }

    #[test]
    fn test_black_white_to_five() {
        let expanded = expand(&bw(), 5).unwrap();
        assert_eq!(
            expanded.colors(),
            &[
                Rgb::BLACK,
                Rgb::new(64, 64, 64),
                Rgb::new(128, 128, 128),
                Rgb::new(191, 191, 191),
                Rgb::WHITE,
            ]
        );
    }

    #[test]
    fn test_remainder_goes_to_earlier_gaps() {
        let palette = Palette::from_hex(&["#000000", "#640000", "#c80000"]).unwrap();
        // 3 extra over 2 gaps: first gap gets 2, second gets 1
        let expanded = expand(&palette, 6).unwrap();
        assert_eq!(expanded.len(), 6);
        assert_eq!(expanded[0], palette[0]);
        assert_eq!(expanded[3], palette[1]);
        assert_eq!(expanded[5], palette[2]);
        assert_eq!(expanded[4], Rgb::new(150, 0, 0));
    }

    #[test]
    fn test_anchors_keep_relative_order() {
        let palette = Palette::from_hex(&["#ff0000", "#00ff00", "#0000ff", "#ffffff"]).unwrap();
        let expanded = expand(&palette, 11).unwrap();
        assert_eq!(expanded.len(), 11);

        let mut next = 0;
        for color in expanded.iter() {
            if next < palette.len() && color == palette[next] {
                next += 1;
            }
        }
        assert_eq!(next, palette.len(), "all anchors must appear in order");
    }
}
