//! Colour features attached to each region.
//!
//! Regions are compared in CIE Lab (D65). Channels are scaled so that
//! `L ∈ [0, 1]` and `a, b ∈ [-1, 1]` roughly, which keeps the Euclidean
//! distance between regions on a comparable scale across images.
use palette::{FromColor, Lab, LinSrgb, Srgb};

const L_SCALE: f32 = 1.0 / 100.0;
const AB_SCALE: f32 = 1.0 / 128.0;

/// Convert one 8-bit sRGB pixel into normalized Lab.
pub fn normalized_lab(rgb: [u8; 3]) -> [f32; 3] {
    let srgb: Srgb<f32> = Srgb::new(rgb[0], rgb[1], rgb[2]).into_format();
    let lin: LinSrgb<f32> = srgb.into_linear();
    let lab: Lab = Lab::from_color(lin);
    [lab.l * L_SCALE, lab.a * AB_SCALE, lab.b * AB_SCALE]
}

/// Euclidean distance between two colour features.
#[inline]
pub fn feature_distance(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let d0 = a[0] - b[0];
    let d1 = a[1] - b[1];
    let d2 = a[2] - b[2];
    (d0 * d0 + d1 * d1 + d2 * d2).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_and_white_span_lightness() {
        let black = normalized_lab([0, 0, 0]);
        let white = normalized_lab([255, 255, 255]);
        assert!(black[0].abs() < 1e-3);
        assert!((white[0] - 1.0).abs() < 1e-2);
        assert!(white[1].abs() < 1e-2 && white[2].abs() < 1e-2);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_identity() {
        let red = normalized_lab([200, 30, 30]);
        let blue = normalized_lab([20, 40, 210]);
        assert_eq!(feature_distance(&red, &red), 0.0);
        assert_eq!(feature_distance(&red, &blue), feature_distance(&blue, &red));
        assert!(feature_distance(&red, &blue) > 0.5);
    }
}
