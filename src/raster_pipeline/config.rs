//! Adjustment configuration types

use std::path::PathBuf;

/// Default cap, in bytes, on any single buffer the TIFF decoder allocates.
/// Large enough for a 16-bit RGB scene of about 26000x26000 pixels.
pub const DEFAULT_DECODE_LIMIT: u64 = 4 << 30;

/// TIFF compression methods for generated images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression, fast level
    Deflate,
}

/// Configuration shared by every adjustment an adjuster performs
#[derive(Debug, Clone)]
pub struct AdjustConfig {
    /// Directory generated images are written to
    pub output_dir: PathBuf,
    /// Compression method to use
    pub compression: TiffCompression,
    /// Predictor value for compression (2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Whether to reject zero-sized images before processing
    pub validate_dimensions: bool,
    /// Largest decoding buffer, in bytes, a reader may allocate for one image
    pub decode_limit: u64,
}

impl Default for AdjustConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            compression: TiffCompression::None,
            predictor: None,
            validate_dimensions: true,
            decode_limit: DEFAULT_DECODE_LIMIT,
        }
    }
}

impl AdjustConfig {
    pub fn builder() -> AdjustConfigBuilder {
        AdjustConfigBuilder::default()
    }
}

/// Builder for AdjustConfig
#[derive(Default)]
pub struct AdjustConfigBuilder {
    output_dir: Option<PathBuf>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    decode_limit: Option<u64>,
}

impl AdjustConfigBuilder {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn decode_limit(mut self, bytes: u64) -> Self {
        self.decode_limit = Some(bytes);
        self
    }

    pub fn build(self) -> AdjustConfig {
        let default = AdjustConfig::default();
        AdjustConfig {
            output_dir: self.output_dir.unwrap_or(default.output_dir),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            decode_limit: self.decode_limit.unwrap_or(default.decode_limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = AdjustConfig::builder()
            .output_dir("/tmp/out")
            .compression(TiffCompression::Deflate)
            .predictor(Some(2))
            .validate_dimensions(false)
            .decode_limit(1 << 20)
            .build();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.compression, TiffCompression::Deflate);
        assert_eq!(config.predictor, Some(2));
        assert!(!config.validate_dimensions);
        assert_eq!(config.decode_limit, 1 << 20);
    }

    #[test]
    fn test_config_builder_defaults() {
        let config = AdjustConfig::builder().build();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.compression, TiffCompression::None);
        assert_eq!(config.predictor, None);
        assert!(config.validate_dimensions);
        assert_eq!(config.decode_limit, DEFAULT_DECODE_LIMIT);
    }
}
