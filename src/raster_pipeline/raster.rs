//! Raster model and storage seam
//!
//! This module defines the in-memory band model, the image wrapper with its
//! lazily computed statistics, and the reader/writer traits behind which the
//! storage backend sits.

mod reader;
mod writer;
mod image;
pub mod types;

pub use reader::RasterReader;
pub use writer::RasterWriter;
pub use image::RasterImage;
pub use types::{
    Band,
    DecodedRaster,
    GeoMetadata,
    GeoTransform,
    OutputRaster,
    OutputSamples,
    Projection,
};
