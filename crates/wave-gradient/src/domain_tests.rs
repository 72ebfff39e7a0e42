//! Domain-critical regression tests for wave-gradient.
//!
//! These tests pin the observable contract of the renderer and palette
//! tools end to end. Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use std::collections::HashSet;

    use image::{Rgb as Px, RgbImage};

    use crate::color::Rgb;
    use crate::error::GradientError;
    use crate::palette::{expand, extract, extract_with, BandSampling, ExtractMethod, Palette};
    use crate::render::{
        render, render_chunky, BorderSpec, GrainFalloff, GrainSpec, Jitter, Orientation,
        Renderer, WaveParameters, WaveProfile,
    };

    fn bw() -> Palette {
        Palette::new(vec![Rgb::BLACK, Rgb::WHITE]).unwrap()
    }

    fn sunset() -> Palette {
        Palette::from_hex(&[
            "#0b1d51", "#725cad", "#8ccdeb", "#ffe3a9", "#f9a03f", "#d45113", "#813405",
        ])
        .unwrap()
    }

    // ========================================================================
    // Flat bands
    // ========================================================================

    /// If this breaks, it means: the band layout no longer divides the height
    /// into `steps` equal contiguous bands in palette order.
    #[test]
    fn test_flat_bands_in_order() {
        let palette = sunset();
        let steps = palette.len();
        let (w, h) = (35u32, 140u32);
        let canvas =
            render_chunky(&palette, w, h, steps, Orientation::Horizontal, None, None).unwrap();

        let band = h as usize / steps;
        for y in 0..h {
            let expected = palette[y as usize / band];
            for x in 0..w {
                assert_eq!(
                    canvas.get(x, y),
                    Some(expected),
                    "REGRESSION: pixel ({x}, {y}) is not band {}",
                    y as usize / band
                );
            }
        }
    }

    /// If this breaks, it means: the canonical 100x100 black/white scenario
    /// no longer splits exactly at row 50.
    #[test]
    fn test_black_white_split_scenario() {
        let palette = Palette::from_hex(&["#000000", "#FFFFFF"]).unwrap();
        let wave = WaveParameters::new(0.0, 2.5, Orientation::Horizontal);
        let canvas = render(&palette, 100, 100, 2, &wave, None, None).unwrap();

        for y in 0..100 {
            let expected = if y < 50 { Rgb::BLACK } else { Rgb::WHITE };
            assert!(canvas.row(y).unwrap().iter().all(|&c| c == expected));
        }
    }

    // ========================================================================
    // Palette membership
    // ========================================================================

    /// If this breaks, it means: some pixel got a color that is not in the
    /// palette (interpolated, default-initialized or out-of-range index).
    #[test]
    fn test_wave_pixels_are_palette_members() {
        let palette = sunset();
        let allowed: HashSet<Rgb> = palette.iter().collect();

        for amplitude in [0.0, 0.3, 1.0, 4.0, 25.0] {
            for orientation in [Orientation::Horizontal, Orientation::Vertical] {
                let wave = WaveParameters::new(amplitude, 3.7, orientation)
                    .jitter(Jitter::new(0.4, 9));
                for steps in [1, 3, 7, 19] {
                    let canvas = render(&palette, 61, 83, steps, &wave, None, None).unwrap();
                    assert!(
                        canvas.pixels().iter().all(|c| allowed.contains(c)),
                        "REGRESSION: foreign color at amplitude {amplitude}, steps {steps}"
                    );
                }
            }
        }
    }

    /// If this breaks, it means: more bands than colors started cycling
    /// through the palette instead of resampling it.
    #[test]
    fn test_more_steps_than_colors_resamples() {
        let palette = Palette::from_hex(&["#ff0000", "#00ff00", "#0000ff"]).unwrap();
        let canvas =
            render_chunky(&palette, 1, 90, 9, Orientation::Horizontal, None, None).unwrap();
        let column: Vec<Rgb> = (0..90).step_by(10).map(|y| canvas.get(0, y).unwrap()).collect();

        // red never reappears after green
        let first_green = column.iter().position(|&c| c == palette[1]).unwrap();
        assert!(column[first_green..].iter().all(|&c| c != palette[0]));
        assert_eq!(column[0], palette.first());
        assert_eq!(column[8], palette.last());
    }

    /// If this breaks, it means: averaged band sampling no longer condenses
    /// long palettes slice by slice.
    #[test]
    fn test_average_sampling_condenses() {
        let palette = Palette::from_hex(&["#000000", "#141414", "#c8c8c8", "#dcdcdc"]).unwrap();
        let canvas = Renderer::new(palette)
            .size(2, 20)
            .steps(2)
            .wave(WaveParameters::flat(Orientation::Horizontal))
            .sampling(BandSampling::Average)
            .render()
            .unwrap();
        assert_eq!(canvas.get(0, 0), Some(Rgb::new(10, 10, 10)));
        assert_eq!(canvas.get(0, 19), Some(Rgb::new(210, 210, 210)));
    }

    // ========================================================================
    // Gap fill
    // ========================================================================

    /// If this breaks, it means: when the wave pushes the band stack down, the
    /// exposed top gap is no longer filled with the FIRST palette color.
    #[test]
    fn test_top_gap_uses_first_color() {
        let wave = WaveParameters::new(2.0, 1.0, Orientation::Horizontal);
        let canvas = render(&bw(), 100, 100, 2, &wave, None, None).unwrap();

        // offset(25) = 2 * 50 * sin(pi / 2) = 100: row 0 maps to y' = -100
        assert_eq!(canvas.get(25, 0), Some(Rgb::BLACK));
    }

    /// If this breaks, it means: the exposed bottom gap is no longer filled
    /// with the LAST palette color.
    #[test]
    fn test_bottom_gap_uses_last_color() {
        let wave = WaveParameters::new(2.0, 1.0, Orientation::Horizontal);
        let canvas = render(&bw(), 100, 100, 2, &wave, None, None).unwrap();

        // offset(75) = -100: the whole column is shifted past the stack
        assert_eq!(canvas.get(75, 99), Some(Rgb::WHITE));
        assert_eq!(canvas.get(75, 0), Some(Rgb::WHITE));
    }

    /// If this breaks, it means: gap fill picked band colors instead of the
    /// palette endpoints when sampling does not hit them.
    #[test]
    fn test_gap_fill_uses_palette_endpoints_with_average_sampling() {
        let palette = Palette::from_hex(&["#000000", "#141414", "#c8c8c8", "#dcdcdc"]).unwrap();
        let canvas = Renderer::new(palette.clone())
            .size(100, 100)
            .steps(2)
            .wave(WaveParameters::new(2.0, 1.0, Orientation::Horizontal))
            .sampling(BandSampling::Average)
            .render()
            .unwrap();
        assert_eq!(canvas.get(25, 0), Some(palette.first()));
        assert_eq!(canvas.get(75, 99), Some(palette.last()));
    }

    // ========================================================================
    // Orientation
    // ========================================================================

    /// If this breaks, it means: vertical rendering is no longer the exact
    /// transpose of horizontal rendering with swapped dimensions.
    #[test]
    fn test_vertical_is_transposed_horizontal() {
        let palette = sunset();
        let horizontal = WaveParameters::new(0.7, 2.2, Orientation::Horizontal)
            .profile(WaveProfile::Bell)
            .jitter(Jitter::new(0.2, 5));
        let vertical = WaveParameters {
            orientation: Orientation::Vertical,
            ..horizontal
        };

        let h = render(&palette, 48, 90, 7, &horizontal, None, None).unwrap();
        let v = render(&palette, 90, 48, 7, &vertical, None, None).unwrap();

        for y in 0..90 {
            for x in 0..48 {
                assert_eq!(h.get(x, y), v.get(y, x), "mismatch at ({x}, {y})");
            }
        }
    }

    // ========================================================================
    // Border
    // ========================================================================

    /// If this breaks, it means: grain or band content leaks into the border
    /// frame.
    #[test]
    fn test_border_frame_is_exact() {
        let border = BorderSpec::new(7, Rgb::new(250, 240, 230));
        let grain = GrainSpec::new(0.5).scale(3).seed(17);
        let wave = WaveParameters::new(3.0, 4.0, Orientation::Horizontal);
        let (w, h) = (80u32, 64u32);
        let canvas = render(&sunset(), w, h, 5, &wave, Some(&border), Some(&grain)).unwrap();

        for y in 0..h {
            for x in 0..w {
                let on_frame = x < 7 || x >= w - 7 || y < 7 || y >= h - 7;
                if on_frame {
                    assert_eq!(canvas.get(x, y), Some(border.color), "({x}, {y})");
                }
            }
        }
    }

    /// If this breaks, it means: the border shifts or squeezes the band
    /// layout instead of framing an interior of (W - 2B) x (H - 2B).
    #[test]
    fn test_border_interior_layout() {
        let border = BorderSpec::new(10, Rgb::WHITE);
        let canvas = render_chunky(
            &bw(),
            60,
            120,
            2,
            Orientation::Horizontal,
            Some(&border),
            None,
        )
        .unwrap();
        // interior rows 10..110, split at 60
        assert_eq!(canvas.get(30, 10), Some(Rgb::BLACK));
        assert_eq!(canvas.get(30, 59), Some(Rgb::BLACK));
        assert_eq!(canvas.get(30, 60), Some(Rgb::WHITE));
        assert_eq!(canvas.get(30, 109), Some(Rgb::WHITE));
        assert_eq!(canvas.get(30, 110), Some(Rgb::WHITE));
    }

    // ========================================================================
    // Grain
    // ========================================================================

    /// If this breaks, it means: seeded grain is no longer reproducible, or
    /// the seed is ignored.
    #[test]
    fn test_grain_seed_reproducibility() {
        let wave = WaveParameters::default();
        let grain = |seed| GrainSpec::centered(0.2, 0.05).scale(2).seed(seed);

        let a = render(&sunset(), 64, 96, 7, &wave, None, Some(&grain(1))).unwrap();
        let b = render(&sunset(), 64, 96, 7, &wave, None, Some(&grain(1))).unwrap();
        let c = render(&sunset(), 64, 96, 7, &wave, None, Some(&grain(2))).unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    /// If this breaks, it means: grain perturbs far more than its intensity
    /// allows (e.g. sigma no longer scaled by intensity).
    #[test]
    fn test_grain_stays_near_source() {
        let grain = GrainSpec::new(0.02).falloff(GrainFalloff::Uniform).seed(3);
        let palette = Palette::new(vec![Rgb::new(128, 128, 128)]).unwrap();
        let canvas = render_chunky(
            &palette,
            50,
            50,
            1,
            Orientation::Horizontal,
            None,
            Some(&grain),
        )
        .unwrap();

        let mean = canvas.pixels().iter().map(|c| c.r as f64).sum::<f64>() / 2500.0;
        assert!((mean - 128.0).abs() < 1.0, "mean drifted to {mean}");
        // sigma ~5.1; 6 sigma is ~31
        assert!(canvas.pixels().iter().all(|c| c.r.abs_diff(128) < 32));
    }

    // ========================================================================
    // Expansion
    // ========================================================================

    /// If this breaks, it means: expansion dropped or moved an anchor color,
    /// or produced the wrong length.
    #[test]
    fn test_expand_anchors() {
        let palette = sunset();
        assert_eq!(expand(&palette, palette.len()).unwrap(), palette);

        for n in palette.len()..40 {
            let expanded = expand(&palette, n).unwrap();
            assert_eq!(expanded.len(), n);
            assert_eq!(expanded[0], palette[0]);
            assert_eq!(expanded[n - 1], palette[palette.len() - 1]);
        }
    }

    #[test]
    fn test_expand_rejects_shrinking() {
        assert_eq!(
            expand(&sunset(), 3),
            Err(GradientError::InvalidTargetSize { target: 3, len: 7 })
        );
    }

    // ========================================================================
    // Extraction
    // ========================================================================

    /// If this breaks, it means: extraction returns frequency order or reads
    /// bottom-to-top, so a black-to-white image yields [white, black].
    #[test]
    fn test_extract_two_by_hundred_scenario() {
        let two_tone =
            RgbImage::from_fn(2, 100, |_, y| if y < 50 { Px([0, 0, 0]) } else { Px([255, 255, 255]) });
        let palette = extract(&two_tone, 2, Orientation::Vertical).unwrap();
        assert_eq!(palette.colors(), &[Rgb::BLACK, Rgb::WHITE]);

        let ramp = RgbImage::from_fn(2, 100, |_, y| {
            let v = (y * 255 / 99) as u8;
            Px([v, v, v])
        });
        for method in [
            ExtractMethod::Sample,
            ExtractMethod::BandAverage,
            ExtractMethod::Quantize,
        ] {
            let palette = extract_with(&ramp, 2, Orientation::Vertical, method).unwrap();
            assert_eq!(palette.len(), 2);
            assert!(
                palette.first().luminance() < palette.last().luminance(),
                "REGRESSION: {method:?} returned light before dark"
            );
        }
    }

    /// If this breaks, it means: extract and render no longer agree on band
    /// order, so re-rendering an extracted palette flips the gradient.
    #[test]
    fn test_render_then_extract_recovers_palette() {
        let palette = sunset();
        let canvas = render_chunky(
            &palette,
            20,
            70,
            palette.len(),
            Orientation::Horizontal,
            None,
            None,
        )
        .unwrap();
        let recovered = extract(&canvas.to_image(), palette.len(), Orientation::Vertical).unwrap();
        assert_eq!(recovered, palette);
    }
}
