use std::io::Write;
use crate::raster_pipeline::common::error::Result;
use crate::raster_pipeline::config::AdjustConfig;
use crate::raster_pipeline::raster::image::RasterImage;
use crate::raster_pipeline::raster::types::{OutputRaster, OutputSamples};

pub trait RasterWriter {
    fn write_raster(&self, raster: &OutputRaster, output: &mut dyn Write, config: &AdjustConfig) -> Result<()>;

    /// Writes `image` unchanged at its source depth, declaring
    /// `no_data_value` as its no-data sentinel.
    fn crop_no_data(
        &self,
        image: &RasterImage,
        no_data_value: u16,
        output: &mut dyn Write,
        config: &AdjustConfig,
    ) -> Result<()> {
        let planes = image.bands().each_ref().map(|band| band.data().to_vec());
        let samples = if image.bits_per_sample() <= 8 {
            OutputSamples::U8(planes.map(|plane| {
                plane.into_iter().map(|v| u8::try_from(v).unwrap_or(u8::MAX)).collect()
            }))
        } else {
            OutputSamples::U16(planes)
        };
        let raster = OutputRaster {
            width: image.width(),
            height: image.height(),
            samples,
            geo: image.geo().clone(),
            no_data_value: Some(no_data_value),
        };
        self.write_raster(&raster, output, config)
    }
}
