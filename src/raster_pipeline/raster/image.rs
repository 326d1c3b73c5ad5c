use tracing::debug;

use crate::raster_pipeline::adjust::DEFAULT_NO_DATA_VALUE;
use crate::raster_pipeline::brightness;
use crate::raster_pipeline::common::error::{AdjustError, Result};
use crate::raster_pipeline::raster::types::{Band, DecodedRaster, GeoMetadata};
use crate::raster_pipeline::statistics;

/// An opened three-band image.
///
/// Bands are immutable once the image exists, so the lazily computed
/// statistics below stay valid for its whole lifetime.
#[derive(Debug, Clone)]
pub struct RasterImage {
    name: String,
    width: usize,
    height: usize,
    bits_per_sample: u8,
    bands: [Band; 3],
    geo: GeoMetadata,
    no_data_value: u16,
    medians: Option<[f64; 3]>,
    luminance: Option<f64>,
}

impl RasterImage {
    /// Wraps decoded bands, checking that all three share the declared
    /// dimensions. The sentinel defaults to 0 when the source declares none.
    pub fn new(name: impl Into<String>, raster: DecodedRaster) -> Result<Self> {
        let expected = (raster.width, raster.height);
        for (band, data) in raster.bands.iter().enumerate() {
            if data.dimensions() != expected {
                return Err(AdjustError::BandDimensionMismatch {
                    band,
                    expected,
                    actual: data.dimensions(),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            width: raster.width,
            height: raster.height,
            bits_per_sample: raster.bits_per_sample,
            bands: raster.bands,
            geo: raster.geo,
            no_data_value: raster.no_data_value.unwrap_or(DEFAULT_NO_DATA_VALUE),
            medians: None,
            luminance: None,
        })
    }

    /// File name (without directory) the image was opened from.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bits_per_sample(&self) -> u8 {
        self.bits_per_sample
    }

    pub fn bands(&self) -> &[Band; 3] {
        &self.bands
    }

    pub fn geo(&self) -> &GeoMetadata {
        &self.geo
    }

    pub fn no_data_value(&self) -> u16 {
        self.no_data_value
    }

    /// `(min, max)` of each band.
    pub fn min_max(&self) -> Result<[(f64, f64); 3]> {
        self.per_band("min/max", Band::min_max)
    }

    /// `(mean, std_dev)` of each band.
    pub fn mean_std_dev(&self) -> Result<[(f64, f64); 3]> {
        self.per_band("mean/standard deviation", Band::mean_std_dev)
    }

    /// Band medians ignoring dark pixels, computed on first use.
    pub fn medians_ignore_dark(&mut self) -> Result<[f64; 3]> {
        if let Some(medians) = self.medians {
            return Ok(medians);
        }
        let medians = statistics::compute_medians_ignore_dark(&self.bands)?;
        debug!(image = %self.name, ?medians, "Computed band medians");
        self.medians = Some(medians);
        Ok(medians)
    }

    /// Luminance of the full-array band medians, computed on first use.
    pub fn luminance(&mut self) -> Result<f64> {
        if let Some(luminance) = self.luminance {
            return Ok(luminance);
        }
        let medians = statistics::compute_medians(&self.bands)?;
        let luminance = brightness::luminance(medians);
        self.luminance = Some(luminance);
        Ok(luminance)
    }

    fn per_band<F>(&self, operation: &'static str, f: F) -> Result<[(f64, f64); 3]>
    where
        F: Fn(&Band) -> Option<(f64, f64)>,
    {
        let mut out = [(0.0, 0.0); 3];
        for (band, slot) in out.iter_mut().enumerate() {
            *slot = f(&self.bands[band]).ok_or(AdjustError::EmptySampleSet { band, operation })?;
        }
        Ok(out)
    }
}
