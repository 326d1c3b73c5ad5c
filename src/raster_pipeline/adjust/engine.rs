//! Row-by-row application of transfer functions.

use tracing::trace;

use crate::raster_pipeline::common::error::{AdjustError, Result};
use crate::raster_pipeline::raster::{OutputRaster, OutputSamples, RasterImage};
use crate::raster_pipeline::transfer::TransferFunction;

/// Applies one transfer function per band and returns the 8-bit result,
/// carrying the image's geotransform and projection.
///
/// Each row is handled in two steps:
///
/// 1. Columns where all three bands equal `no_data_value` are skipped; a row
///    made only of such columns is left as it was.
/// 2. Every band's function is evaluated on the remaining columns, and the
///    result replaces a sample only where *that band's* value is greater than
///    `no_data_value`. A pixel that is no-data in one or two bands is thus
///    still adjusted in the others.
///
/// Adjusted values are truncated to integers; untouched samples above 255
/// saturate when narrowed to 8 bits. A value outside a function's domain is
/// an [`AdjustError::OutOfDomain`].
pub fn apply_transfer_functions(
    image: &RasterImage,
    functions: &[TransferFunction; 3],
    no_data_value: u16,
) -> Result<OutputRaster> {
    let width = image.width();
    let height = image.height();
    let bands = image.bands();

    let mut adjusted: [Vec<u16>; 3] = bands.each_ref().map(|band| band.data().to_vec());
    let mut kept = Vec::with_capacity(width);

    for row in 0..height {
        trace!("line {} of {}", row + 1, height);

        let source = bands.each_ref().map(|band| band.row(row));

        kept.clear();
        kept.extend((0..width).filter(|&col| !source.iter().all(|r| r[col] == no_data_value)));
        if kept.is_empty() {
            continue;
        }

        for (band, function) in functions.iter().enumerate() {
            let line = &mut adjusted[band][row * width..(row + 1) * width];
            for &col in &kept {
                let value = source[band][col];
                let mapped = function.evaluate(f64::from(value)).ok_or_else(|| {
                    let (lower, upper) = function.domain();
                    AdjustError::OutOfDomain {
                        band,
                        row,
                        value: f64::from(value),
                        lower,
                        upper,
                    }
                })?;
                if value > no_data_value {
                    line[col] = mapped as u16;
                }
            }
        }
    }

    Ok(OutputRaster {
        width,
        height,
        samples: OutputSamples::U8(adjusted.map(|plane| plane.into_iter().map(narrow).collect())),
        geo: image.geo().clone(),
        no_data_value: None,
    })
}

fn narrow(value: u16) -> u8 {
    u8::try_from(value).unwrap_or(u8::MAX)
}
