//! GeoTIFF storage backend
//!
//! This module implements the raster reader/writer traits on top of the
//! `tiff` crate, carrying the GeoTIFF georeferencing tags through unchanged.

mod tags;
mod geotiff_reader;
mod geotiff_writer;


pub use geotiff_reader::GeoTiffReader;
pub use geotiff_writer::GeoTiffWriter;
