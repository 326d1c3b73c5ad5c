use crate::raster_pipeline::common::error::Result;
use crate::raster_pipeline::config::AdjustConfig;
use crate::raster_pipeline::raster::types::DecodedRaster;

pub trait RasterReader {
    fn read_raster(&self, data: &[u8], config: &AdjustConfig) -> Result<DecodedRaster>;
}
