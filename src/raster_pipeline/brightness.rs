//! Luminance and brightness transfer functions
//!
//! Brightness is normalised across images by shifting every sample by the
//! difference between the relative luminance of two sets of band medians.

use tracing::info;

use crate::raster_pipeline::common::error::{AdjustError, Result};
use crate::raster_pipeline::transfer::TransferFunction;

/// Relative luminance weights for R, G and B (ITU-R BT.709).
pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Largest 8-bit sample; the brightness shift is defined on `[0, MAX_SAMPLE]`.
pub const MAX_SAMPLE: f64 = 255.0;

/// Weighted sum `0.2126 R + 0.7152 G + 0.0722 B`.
pub fn luminance(rgb: [f64; 3]) -> f64 {
    rgb.iter()
        .zip(LUMINANCE_WEIGHTS)
        .map(|(value, weight)| value * weight)
        .sum()
}

/// `luminance(rgb_to_compare) - luminance(rgb)`: the shift that brings `rgb`
/// to the brightness of `rgb_to_compare`.
pub fn luminance_difference(rgb: [f64; 3], rgb_to_compare: [f64; 3]) -> f64 {
    luminance(rgb_to_compare) - luminance(rgb)
}

/// `luminance(rgb) / luminance(rgb_to_compare)`.
pub fn luminance_ratio(rgb: [f64; 3], rgb_to_compare: [f64; 3]) -> Result<f64> {
    let denominator = luminance(rgb_to_compare);
    if denominator == 0.0 {
        return Err(AdjustError::DivisionByZero("luminance ratio"));
    }
    Ok(luminance(rgb) / denominator)
}

/// Builds the brightness transfer functions moving an image whose band
/// medians are `bands_medians` towards `reference_medians`.
///
/// Every integer sample `x` in `0..=255` maps to `x + factor` clamped to
/// `[0, 255]`. The shift is channel-agnostic, so the same function is used
/// for all three bands.
pub fn build_brightness_functions(
    bands_medians: [f64; 3],
    reference_medians: [f64; 3],
) -> Result<[TransferFunction; 3]> {
    let factor = luminance_difference(bands_medians, reference_medians);
    if !factor.is_finite() {
        return Err(AdjustError::InvalidControlPoints(format!(
            "brightness factor {factor} is not finite"
        )));
    }
    info!(factor, "Calculated brightness difference");

    let inputs: Vec<f64> = (0..=MAX_SAMPLE as u16).map(f64::from).collect();
    let outputs: Vec<f64> = inputs
        .iter()
        .map(|x| (x + factor).clamp(0.0, MAX_SAMPLE))
        .collect();

    let function = TransferFunction::new(inputs, outputs)?;
    Ok([function.clone(), function.clone(), function])
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_luminance_extremes() {
        assert!((luminance([255.0, 255.0, 255.0]) - 255.0).abs() < EPSILON);
        assert_eq!(luminance([0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_luminance_uses_blue_weight_for_blue() {
        assert!((luminance([0.0, 0.0, 100.0]) - 7.22).abs() < EPSILON);
        assert!((luminance([100.0, 0.0, 0.0]) - 21.26).abs() < EPSILON);
        assert!((luminance([0.0, 100.0, 0.0]) - 71.52).abs() < EPSILON);
    }

    #[test]
    fn test_luminance_difference_antisymmetric() {
        let a = [120.0, 80.0, 40.0];
        let b = [60.0, 200.0, 10.0];
        let forward = luminance_difference(a, b);
        let backward = luminance_difference(b, a);
        assert!((forward + backward).abs() < EPSILON);
        assert!((forward - (luminance(b) - luminance(a))).abs() < EPSILON);
    }

    #[test]
    fn test_luminance_ratio() {
        let ratio = luminance_ratio([200.0, 200.0, 200.0], [100.0, 100.0, 100.0]).unwrap();
        assert!((ratio - 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_luminance_ratio_division_by_zero() {
        let result = luminance_ratio([10.0, 10.0, 10.0], [0.0, 0.0, 0.0]);
        assert!(matches!(result, Err(AdjustError::DivisionByZero(_))));
    }

    #[test]
    fn test_brightness_clamps_upper_bound() {
        // factor = 300 - 0
        let functions = build_brightness_functions([0.0; 3], [300.0; 3]).unwrap();
        assert_eq!(functions[0].evaluate(200.0), Some(255.0));
        assert_eq!(functions[0].evaluate(0.0), Some(255.0));
    }

    #[test]
    fn test_brightness_clamps_lower_bound() {
        // factor = 0 - 300
        let functions = build_brightness_functions([300.0; 3], [0.0; 3]).unwrap();
        assert_eq!(functions[0].evaluate(50.0), Some(0.0));
        assert_eq!(functions[0].evaluate(255.0), Some(0.0));
    }

    #[test]
    fn test_brightness_shift_and_interpolation() {
        let functions = build_brightness_functions([100.0; 3], [110.0; 3]).unwrap();
        let f = &functions[1];
        assert!((f.evaluate(50.0).unwrap() - 60.0).abs() < 1e-6);
        assert!((f.evaluate(50.5).unwrap() - 60.5).abs() < 1e-6);
        assert_eq!(f.evaluate(250.0), Some(255.0));
        assert_eq!(f.domain(), (0.0, 255.0));
        assert_eq!(f.evaluate(256.0), None);
    }

    #[test]
    fn test_brightness_same_function_for_all_bands() {
        let functions = build_brightness_functions([90.0, 100.0, 80.0], [120.0, 130.0, 70.0]).unwrap();
        assert_eq!(functions[0], functions[1]);
        assert_eq!(functions[1], functions[2]);
    }
}
