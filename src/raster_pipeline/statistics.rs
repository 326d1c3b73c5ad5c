//! Band statistics
//!
//! Summary statistics computed from full band pixel arrays. Nothing here is
//! cached; callers that need a value more than once keep it themselves (see
//! [`RasterImage`](crate::raster_pipeline::RasterImage)).

use crate::raster_pipeline::common::error::{AdjustError, Result};
use crate::raster_pipeline::raster::Band;

/// Samples at or below this value are treated as dark / no-data when computing
/// medians for luminance work.
pub const DARK_THRESHOLD: u16 = 5;

/// Upper bound (inclusive) of the samples kept by [`compute_medians_ignore_dark`].
pub const BRIGHT_LIMIT: u16 = 255;

/// Read-only snapshot of one band's statistics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub median: f64,
    pub p25: f64,
    pub p75: f64,
    pub p95: f64,
}

/// Computes min, max, mean, standard deviation, median and the 25th, 75th
/// and 95th percentiles of a band.
pub fn compute_basic_stats(band: &Band, index: usize) -> Result<BandStatistics> {
    let (min, max) = band.min_max().ok_or(AdjustError::EmptySampleSet {
        band: index,
        operation: "basic statistics",
    })?;
    let (mean, std_dev) = band.mean_std_dev().ok_or(AdjustError::EmptySampleSet {
        band: index,
        operation: "basic statistics",
    })?;

    let sorted = sorted_samples(band.data().iter().copied());

    Ok(BandStatistics {
        min,
        max,
        mean,
        std_dev,
        median: percentile(&sorted, 50.0),
        p25: percentile(&sorted, 25.0),
        p75: percentile(&sorted, 75.0),
        p95: percentile(&sorted, 95.0),
    })
}

/// Arithmetic mean of each band.
///
/// Means are skewed by outliers and by no-data borders, so they are a poor
/// basis for luminance comparisons; prefer [`compute_medians_ignore_dark`].
pub fn compute_means(bands: &[Band; 3]) -> Result<[f64; 3]> {
    per_band(bands, |index, band| {
        band.mean_std_dev()
            .map(|(mean, _)| mean)
            .ok_or(AdjustError::EmptySampleSet { band: index, operation: "mean" })
    })
}

/// Median of each band over the full array, no-data pixels included.
pub fn compute_medians(bands: &[Band; 3]) -> Result<[f64; 3]> {
    per_band(bands, |index, band| {
        median_of(band.data().iter().copied())
            .ok_or(AdjustError::EmptySampleSet { band: index, operation: "median" })
    })
}

/// Median of each band over the samples in `(DARK_THRESHOLD, BRIGHT_LIMIT]`.
///
/// A band with no sample left after filtering is an error rather than a NaN.
pub fn compute_medians_ignore_dark(bands: &[Band; 3]) -> Result<[f64; 3]> {
    per_band(bands, |index, band| {
        let kept = band
            .data()
            .iter()
            .copied()
            .filter(|&v| v > DARK_THRESHOLD && v <= BRIGHT_LIMIT);
        median_of(kept).ok_or(AdjustError::EmptySampleSet {
            band: index,
            operation: "median ignoring dark pixels",
        })
    })
}

/// Linearly interpolated percentile of an ascending slice, `p` in `[0, 100]`.
///
/// The rank is `p / 100 * (n - 1)`; fractional ranks interpolate between the
/// two neighbouring samples. Returns NaN for an empty slice.
pub fn percentile(sorted: &[u16], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => f64::from(sorted[0]),
        n => {
            let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
            let below = rank.floor() as usize;
            let above = (below + 1).min(n - 1);
            let fraction = rank - below as f64;
            let low = f64::from(sorted[below]);
            let high = f64::from(sorted[above]);
            low + (high - low) * fraction
        }
    }
}

fn median_of(samples: impl Iterator<Item = u16>) -> Option<f64> {
    let sorted = sorted_samples(samples);
    if sorted.is_empty() {
        None
    } else {
        Some(percentile(&sorted, 50.0))
    }
}

fn sorted_samples(samples: impl Iterator<Item = u16>) -> Vec<u16> {
    let mut sorted: Vec<u16> = samples.collect();
    sorted.sort_unstable();
    sorted
}

fn per_band<F>(bands: &[Band; 3], mut f: F) -> Result<[f64; 3]>
where
    F: FnMut(usize, &Band) -> Result<f64>,
{
    Ok([f(0, &bands[0])?, f(1, &bands[1])?, f(2, &bands[2])?])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(width: usize, height: usize, data: Vec<u16>) -> Band {
        Band::new(width, height, data).unwrap()
    }

    fn bordered_fixture() -> [Band; 3] {
        #[rustfmt::skip]
        let data = vec![
            0, 0, 0, 0, 0,
            255, 255, 255, 255, 0,
            0, 255, 255, 255, 0,
            255, 255, 255, 255, 0,
            0, 0, 0, 0, 0,
        ];
        let b = band(5, 5, data);
        [b.clone(), b.clone(), b]
    }

    #[test]
    fn test_percentile_interpolates_between_ranks() {
        let sorted = [10, 20, 30, 40];
        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&sorted, 100.0), 40.0);
        assert_eq!(percentile(&sorted, 50.0), 25.0);
        assert!((percentile(&sorted, 25.0) - 17.5).abs() < 1e-9);
    }

    #[test]
    fn test_percentile_empty_is_nan() {
        assert!(percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_basic_stats() {
        let b = band(2, 2, vec![2, 4, 4, 6]);
        let stats = compute_basic_stats(&b, 0).unwrap();

        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 6.0);
        assert_eq!(stats.mean, 4.0);
        assert!((stats.std_dev - 2.0_f64.sqrt()).abs() < 1e-9);
        assert_eq!(stats.median, 4.0);
        assert_eq!(stats.p25, 3.5);
        assert_eq!(stats.p75, 4.5);
        assert!((stats.p95 - 5.7).abs() < 1e-9);
    }

    #[test]
    fn test_basic_stats_empty_band() {
        let b = band(0, 0, Vec::new());
        let result = compute_basic_stats(&b, 2);
        assert!(matches!(
            result,
            Err(AdjustError::EmptySampleSet { band: 2, .. })
        ));
    }

    #[test]
    fn test_medians_full_array_include_border() {
        // 14 of the 25 samples are border zeros, so they win the median.
        let medians = compute_medians(&bordered_fixture()).unwrap();
        assert_eq!(medians, [0.0, 0.0, 0.0]);

        let interior = band(3, 1, vec![0, 255, 255]);
        let medians = compute_medians(&[interior.clone(), interior.clone(), interior]).unwrap();
        assert_eq!(medians, [255.0, 255.0, 255.0]);
    }

    #[test]
    fn test_medians_ignore_dark_only_bright_pixels() {
        let medians = compute_medians_ignore_dark(&bordered_fixture()).unwrap();
        assert_eq!(medians, [255.0, 255.0, 255.0]);
    }

    #[test]
    fn test_medians_ignore_dark_excludes_threshold_and_above_255() {
        let red = band(3, 2, vec![5, 6, 8, 300, 1000, 4]);
        let green = band(3, 2, vec![10, 20, 30, 40, 50, 0]);
        let blue = band(3, 2, vec![255, 255, 5, 5, 5, 5]);

        let medians = compute_medians_ignore_dark(&[red, green, blue]).unwrap();
        assert_eq!(medians, [7.0, 30.0, 255.0]);
    }

    #[test]
    fn test_medians_ignore_dark_empty_after_filter() {
        let dark = band(2, 1, vec![0, 5]);
        let bright = band(2, 1, vec![100, 200]);

        let result = compute_medians_ignore_dark(&[bright.clone(), dark, bright]);
        assert!(matches!(
            result,
            Err(AdjustError::EmptySampleSet { band: 1, .. })
        ));
    }

    #[test]
    fn test_means() {
        let bands = [
            band(2, 1, vec![0, 10]),
            band(2, 1, vec![100, 200]),
            band(2, 1, vec![255, 255]),
        ];
        assert_eq!(compute_means(&bands).unwrap(), [5.0, 150.0, 255.0]);
    }
}
