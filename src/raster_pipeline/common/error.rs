use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdjustError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to decode GeoTIFF image: {0}")]
    DecodeError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Expected 3 bands, found {0}")]
    BandCount(usize),

    #[error("Band {band} has dimensions {actual:?}, expected {expected:?}")]
    BandDimensionMismatch {
        band: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Degenerate statistics for band {band}: stretch window [{lower}, {upper}] is empty")]
    DegenerateStatistics { band: usize, lower: f64, upper: f64 },

    #[error("Division by zero in {0}")]
    DivisionByZero(&'static str),

    #[error("No samples left in band {band} for {operation}")]
    EmptySampleSet { band: usize, operation: &'static str },

    #[error("Invalid transfer function control points: {0}")]
    InvalidControlPoints(String),

    #[error("Band {band}, row {row}: value {value} outside transfer function domain [{lower}, {upper}]")]
    OutOfDomain {
        band: usize,
        row: usize,
        value: f64,
        lower: f64,
        upper: f64,
    },

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to encode GeoTIFF image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AdjustError>;
