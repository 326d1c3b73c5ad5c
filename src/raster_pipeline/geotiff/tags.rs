//! GeoTIFF and GDAL private tags

use tiff::tags::Tag;

pub const MODEL_PIXEL_SCALE: Tag = Tag::ModelPixelScaleTag;
pub const MODEL_TIEPOINT: Tag = Tag::ModelTiepointTag;
pub const MODEL_TRANSFORMATION: Tag = Tag::ModelTransformationTag;
pub const GEO_KEY_DIRECTORY: Tag = Tag::GeoKeyDirectoryTag;
pub const GEO_DOUBLE_PARAMS: Tag = Tag::GeoDoubleParamsTag;
pub const GEO_ASCII_PARAMS: Tag = Tag::GeoAsciiParamsTag;
/// ASCII no-data value written by GDAL (42113).
pub const GDAL_NODATA: Tag = Tag::GdalNodata;

/// PlanarConfiguration value for band-sequential storage.
pub const PLANAR_SEPARATE: u16 = 2;
