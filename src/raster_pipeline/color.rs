//! Histogram 2SD colour balance
//!
//! Each band is stretched so that `mean ± 2 * std_dev` (bounded by the band's
//! actual min and max) covers the output range `[2, 254]`. Samples outside
//! that window ramp down to 1 at zero and up to 255 at the 16-bit ceiling.

use tracing::debug;

use crate::raster_pipeline::common::error::{AdjustError, Result};
use crate::raster_pipeline::transfer::TransferFunction;

/// Input upper bound, wide enough for 16-bit sources.
pub const INPUT_CEILING: f64 = 65536.0;

/// Output values for the `[0, lower, upper, INPUT_CEILING]` control points.
pub const STRETCH_OUTPUTS: [f64; 4] = [1.0, 2.0, 254.0, 255.0];

/// Number of standard deviations either side of the mean kept in the window.
const STD_DEV_SPAN: f64 = 2.0;

/// Builds one stretch function per band from `(min, max)` and
/// `(mean, std_dev)` pairs.
///
/// The window `[max(min, mean - 2sd), min(max, mean + 2sd)]` must be
/// non-empty; otherwise the band is degenerate (constant or saturated) and
/// [`AdjustError::DegenerateStatistics`] names it.
///
/// When the lower bound reaches 0 the fixed `0 -> 1` point would coincide
/// with it, so the window itself starts the function; likewise at the top.
pub fn build_color_balance_functions(
    min_max: [(f64, f64); 3],
    mean_std_dev: [(f64, f64); 3],
) -> Result<[TransferFunction; 3]> {
    Ok([
        band_stretch(0, min_max[0], mean_std_dev[0])?,
        band_stretch(1, min_max[1], mean_std_dev[1])?,
        band_stretch(2, min_max[2], mean_std_dev[2])?,
    ])
}

fn band_stretch(band: usize, (min, max): (f64, f64), (mean, std_dev): (f64, f64)) -> Result<TransferFunction> {
    // f64::max/min drop a NaN operand, so check the raw statistics first.
    if [min, max, mean, std_dev].iter().any(|v| !v.is_finite()) {
        return Err(AdjustError::DegenerateStatistics {
            band,
            lower: mean - STD_DEV_SPAN * std_dev,
            upper: mean + STD_DEV_SPAN * std_dev,
        });
    }

    let lower = min.max(mean - STD_DEV_SPAN * std_dev);
    let upper = max.min(mean + STD_DEV_SPAN * std_dev);

    if lower >= upper {
        return Err(AdjustError::DegenerateStatistics { band, lower, upper });
    }

    debug!(band, lower, upper, "Histogram stretch window");

    let mut inputs = Vec::with_capacity(4);
    let mut outputs = Vec::with_capacity(4);
    if lower > 0.0 {
        inputs.push(0.0);
        outputs.push(STRETCH_OUTPUTS[0]);
    }
    inputs.extend([lower, upper]);
    outputs.extend([STRETCH_OUTPUTS[1], STRETCH_OUTPUTS[2]]);
    if upper < INPUT_CEILING {
        inputs.push(INPUT_CEILING);
        outputs.push(STRETCH_OUTPUTS[3]);
    }

    TransferFunction::new(inputs, outputs)
}
