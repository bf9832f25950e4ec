//! RGB <-> HSL conversion. Only the lightness channel feeds the converter.

/// HSL lightness of an RGB sample, in `[0, 1]`.
///
/// Alpha is not an input: transparency must never scale the colour channels
/// here, callers that care about it composite upstream.
pub fn rgb_to_lightness(r: u8, g: u8, b: u8) -> f64 {
    let max = r.max(g).max(b) as f64 / 255.0;
    let min = r.min(g).min(b) as f64 / 255.0;
    (max + min) / 2.0
}

/// Convert an RGB colour to `(h, s, l)`, each in `[0, 1]`.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return (0.0, 0.0, l); // achromatic
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (h / 6.0, s, l)
}

/// Convert `(h, s, l)` in `[0, 1]` back to RGB, rounding each channel.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [u8; 3] {
    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };

    [to_channel(r), to_channel(g), to_channel(b)]
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lightness_of_grays_is_value_over_255() {
        for v in 0..=255u8 {
            assert_eq!(rgb_to_lightness(v, v, v), v as f64 / 255.0);
        }
    }

    #[test]
    fn test_lightness_extremes() {
        assert_eq!(rgb_to_lightness(0, 0, 0), 0.0);
        assert_eq!(rgb_to_lightness(255, 255, 255), 1.0);
        // Saturated primaries sit at mid lightness
        assert_eq!(rgb_to_lightness(255, 0, 0), 0.5);
        assert_eq!(rgb_to_lightness(0, 255, 0), 0.5);
        assert_eq!(rgb_to_lightness(0, 0, 255), 0.5);
    }

    #[test]
    fn test_lightness_matches_hsl_l_channel() {
        for &(r, g, b) in &[(12, 200, 90), (255, 128, 0), (3, 3, 250), (77, 77, 78)] {
            assert_eq!(rgb_to_lightness(r, g, b), rgb_to_hsl(r, g, b).2);
        }
    }

    #[test]
    fn test_rgb_to_hsl_known_values() {
        let (h, s, l) = rgb_to_hsl(255, 0, 0);
        assert_eq!((h, s, l), (0.0, 1.0, 0.5));

        let (h, _, _) = rgb_to_hsl(0, 255, 0);
        assert!((h - 1.0 / 3.0).abs() < 1e-12);

        let (h, _, _) = rgb_to_hsl(0, 0, 255);
        assert!((h - 2.0 / 3.0).abs() < 1e-12);

        assert_eq!(rgb_to_hsl(128, 128, 128), (0.0, 0.0, 128.0 / 255.0));
    }

    #[test]
    fn test_hsl_to_rgb_achromatic() {
        assert_eq!(hsl_to_rgb(0.7, 0.0, 0.0), [0, 0, 0]);
        assert_eq!(hsl_to_rgb(0.2, 0.0, 1.0), [255, 255, 255]);
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.5), [128, 128, 128]);
    }

    #[test]
    fn test_hsl_to_rgb_primaries() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), [255, 0, 0]);
        assert_eq!(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0, 255, 0]);
        assert_eq!(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0, 0, 255]);
    }

    #[test]
    fn test_hsl_round_trip_lightness_within_one_step() {
        for hi in 0..=12 {
            for si in 0..=10 {
                for li in 0..=20 {
                    let (h, s, l) = (hi as f64 / 12.0, si as f64 / 10.0, li as f64 / 20.0);
                    let [r, g, b] = hsl_to_rgb(h, s, l);
                    let (_, _, back) = rgb_to_hsl(r, g, b);
                    assert!(
                        (back - l).abs() <= 1.0 / 255.0,
                        "h={h} s={s} l={l} -> {back}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_rgb_round_trip_within_one_per_channel() {
        for &rgb in &[[10u8, 20, 30], [255, 127, 0], [90, 200, 45], [1, 254, 128]] {
            let (h, s, l) = rgb_to_hsl(rgb[0], rgb[1], rgb[2]);
            let back = hsl_to_rgb(h, s, l);
            for c in 0..3 {
                assert!((back[c] as i16 - rgb[c] as i16).abs() <= 1, "{rgb:?} -> {back:?}");
            }
        }
    }
}
