//! Raster data types

use crate::raster_pipeline::common::error::{AdjustError, Result};

/// One channel of an image: `width * height` samples in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    width: usize,
    height: usize,
    data: Vec<u16>,
}

impl Band {
    pub fn new(width: usize, height: usize, data: Vec<u16>) -> Result<Self> {
        if width.checked_mul(height) != Some(data.len()) {
            return Err(AdjustError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u16] {
        &self.data
    }

    pub fn row(&self, row: usize) -> &[u16] {
        &self.data[row * self.width..(row + 1) * self.width]
    }

    /// Smallest and largest sample, `None` for an empty band.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let min = self.data.iter().min()?;
        let max = self.data.iter().max()?;
        Some((f64::from(*min), f64::from(*max)))
    }

    /// Mean and population standard deviation, `None` for an empty band.
    pub fn mean_std_dev(&self) -> Option<(f64, f64)> {
        if self.data.is_empty() {
            return None;
        }
        let count = self.data.len() as f64;
        let mean = self.data.iter().map(|&v| f64::from(v)).sum::<f64>() / count;
        let variance = self
            .data
            .iter()
            .map(|&v| {
                let delta = f64::from(v) - mean;
                delta * delta
            })
            .sum::<f64>()
            / count;
        Some((mean, variance.sqrt()))
    }
}

/// Affine pixel-to-map transform, GDAL coefficient order:
/// `[origin_x, pixel_width, row_rotation, origin_y, column_rotation, pixel_height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform(pub [f64; 6]);

impl GeoTransform {
    /// From ModelPixelScale `[sx, sy, sz]` and the first ModelTiepoint
    /// `[i, j, k, x, y, z]`.
    pub fn from_scale_tiepoint(scale: &[f64], tiepoint: &[f64]) -> Option<Self> {
        if scale.len() < 2 || tiepoint.len() < 6 {
            return None;
        }
        let (sx, sy) = (scale[0], scale[1]);
        let (i, j, x, y) = (tiepoint[0], tiepoint[1], tiepoint[3], tiepoint[4]);
        Some(Self([x - i * sx, sx, 0.0, y + j * sy, 0.0, -sy]))
    }

    /// From a row-major 4x4 ModelTransformation matrix.
    pub fn from_matrix(matrix: &[f64]) -> Option<Self> {
        if matrix.len() < 16 {
            return None;
        }
        Some(Self([
            matrix[3], matrix[0], matrix[1], matrix[7], matrix[4], matrix[5],
        ]))
    }

    /// True when both rotation terms are zero, so scale + tiepoint suffice.
    pub fn is_north_up(&self) -> bool {
        self.0[2] == 0.0 && self.0[4] == 0.0
    }

    pub fn pixel_scale(&self) -> [f64; 3] {
        [self.0[1], -self.0[5], 0.0]
    }

    pub fn tiepoint(&self) -> [f64; 6] {
        [0.0, 0.0, 0.0, self.0[0], self.0[3], 0.0]
    }

    pub fn matrix(&self) -> [f64; 16] {
        let [x0, a, b, y0, d, e] = self.0;
        [
            a, b, 0.0, x0, //
            d, e, 0.0, y0, //
            0.0, 0.0, 0.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ]
    }
}

/// Coordinate reference system as stored by GeoTIFF: the GeoKey directory
/// and its double/ASCII parameter blocks, carried verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    pub key_directory: Vec<u16>,
    pub double_params: Option<Vec<f64>>,
    pub ascii_params: Option<String>,
}

/// Georeferencing copied unchanged from a source to every derived output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoMetadata {
    pub transform: Option<GeoTransform>,
    pub projection: Option<Projection>,
}

/// Result of decoding a raster file.
#[derive(Debug, Clone)]
pub struct DecodedRaster {
    pub width: usize,
    pub height: usize,
    /// Bits per sample of the source (8 or 16).
    pub bits_per_sample: u8,
    pub bands: [Band; 3],
    pub geo: GeoMetadata,
    /// Sentinel declared by the file itself (GDAL_NODATA), if any.
    pub no_data_value: Option<u16>,
}

/// Sample planes of a raster about to be written.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputSamples {
    U8([Vec<u8>; 3]),
    U16([Vec<u16>; 3]),
}

/// A raster ready to be encoded: three bands plus the metadata copied from
/// its source.
#[derive(Debug, Clone)]
pub struct OutputRaster {
    pub width: usize,
    pub height: usize,
    pub samples: OutputSamples,
    pub geo: GeoMetadata,
    pub no_data_value: Option<u16>,
}

impl OutputRaster {
    /// Band `index` widened to u16, mainly for inspection.
    pub fn band_values(&self, index: usize) -> Vec<u16> {
        match &self.samples {
            OutputSamples::U8(planes) => planes[index].iter().map(|&v| u16::from(v)).collect(),
            OutputSamples::U16(planes) => planes[index].clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_rejects_wrong_length() {
        assert!(matches!(
            Band::new(3, 2, vec![0; 5]),
            Err(AdjustError::InvalidDimensions(3, 2))
        ));
    }

    #[test]
    fn test_band_rows_and_stats() {
        let band = Band::new(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(band.row(1), &[4, 5, 6]);
        assert_eq!(band.min_max(), Some((1.0, 6.0)));

        let (mean, std_dev) = band.mean_std_dev().unwrap();
        assert_eq!(mean, 3.5);
        assert!((std_dev - (35.0_f64 / 12.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_band_has_no_stats() {
        let band = Band::new(0, 4, Vec::new()).unwrap();
        assert_eq!(band.min_max(), None);
        assert_eq!(band.mean_std_dev(), None);
    }

    #[test]
    fn test_geotransform_from_scale_tiepoint() {
        let transform = GeoTransform::from_scale_tiepoint(
            &[100.0, 100.0, 0.0],
            &[0.0, 0.0, 0.0, -10.9, -37.0, 0.0],
        )
        .unwrap();
        assert_eq!(transform.0, [-10.9, 100.0, 0.0, -37.0, 0.0, -100.0]);
        assert!(transform.is_north_up());
        assert_eq!(transform.pixel_scale(), [100.0, 100.0, 0.0]);
        assert_eq!(transform.tiepoint(), [0.0, 0.0, 0.0, -10.9, -37.0, 0.0]);
    }

    #[test]
    fn test_geotransform_tiepoint_offset() {
        let transform = GeoTransform::from_scale_tiepoint(
            &[2.0, 3.0, 0.0],
            &[10.0, 20.0, 0.0, 500.0, 900.0, 0.0],
        )
        .unwrap();
        assert_eq!(transform.0, [480.0, 2.0, 0.0, 960.0, 0.0, -3.0]);
    }

    #[test]
    fn test_geotransform_matrix_round_trip() {
        let transform = GeoTransform([100.0, 2.0, 0.5, 200.0, 0.25, -2.0]);
        assert!(!transform.is_north_up());
        let back = GeoTransform::from_matrix(&transform.matrix()).unwrap();
        assert_eq!(back, transform);
    }

    #[test]
    fn test_geotransform_rejects_short_tags() {
        assert!(GeoTransform::from_scale_tiepoint(&[1.0], &[0.0; 6]).is_none());
        assert!(GeoTransform::from_matrix(&[0.0; 12]).is_none());
    }
}
