//! Raster colour adjustment pipeline
//!
//! This module provides histogram-stretch colour balancing and luminance-based
//! brightness normalisation for three-band GeoTIFF images, with separate
//! modules for band statistics, transfer functions, GeoTIFF storage and the
//! orchestration that ties them together.

pub mod common;
pub mod statistics;
pub mod transfer;
pub mod brightness;
pub mod color;
pub mod raster;
pub mod geotiff;
pub mod config;
pub mod adjust;

pub use common::{
    AdjustError,
    Result,
};

pub use statistics::{
    BandStatistics,
    compute_basic_stats,
    compute_means,
    compute_medians,
    compute_medians_ignore_dark,
};

pub use transfer::TransferFunction;

pub use brightness::{
    build_brightness_functions,
    luminance,
    luminance_difference,
    luminance_ratio,
};

pub use color::build_color_balance_functions;

pub use raster::{
    Band,
    DecodedRaster,
    GeoMetadata,
    GeoTransform,
    OutputRaster,
    OutputSamples,
    Projection,
    RasterImage,
    RasterReader,
    RasterWriter,
};

pub use geotiff::{
    GeoTiffReader,
    GeoTiffWriter,
};

pub use config::{
    AdjustConfig,
    AdjustConfigBuilder,
    DEFAULT_DECODE_LIMIT,
    TiffCompression,
};

pub use adjust::{
    DEFAULT_NO_DATA_VALUE,
    OutputKind,
    RasterAdjuster,
    apply_transfer_functions,
};
