use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::raster_pipeline::{
    adjust::{OutputKind, apply_transfer_functions},
    brightness::build_brightness_functions,
    color::build_color_balance_functions,
    common::error::{AdjustError, Result},
    config::AdjustConfig,
    geotiff::{GeoTiffReader, GeoTiffWriter},
    raster::{RasterImage, RasterReader, RasterWriter},
};

/// Runs colour balance, brightness and border adjustments on opened images
/// and writes the results next to each other in the configured directory.
pub struct RasterAdjuster<R: RasterReader, W: RasterWriter> {
    reader: R,
    writer: W,
    config: AdjustConfig,
}

impl RasterAdjuster<GeoTiffReader, GeoTiffWriter> {
    pub fn new(config: AdjustConfig) -> Self {
        Self {
            reader: GeoTiffReader,
            writer: GeoTiffWriter,
            config,
        }
    }
}

impl<R: RasterReader, W: RasterWriter> RasterAdjuster<R, W> {
    pub fn with_custom(reader: R, writer: W, config: AdjustConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(AdjustError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Opens a raster file. The image is named after the file's base name,
    /// which is what output names are derived from.
    #[instrument(skip(self, path))]
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<RasterImage> {
        let path = path.as_ref();
        info!(input = %path.display(), "Opening raster");

        let data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(path).map_err(|e| {
                AdjustError::InputReadError(format!("{}: {}", path.display(), e))
            })?
        };

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        self.decode(name, &data)
    }

    /// Decodes an in-memory raster into an image called `name`.
    pub fn decode(&self, name: impl Into<String>, data: &[u8]) -> Result<RasterImage> {
        let raster = {
            let _span = tracing::info_span!("decode_raster", input_size = data.len()).entered();
            self.reader.read_raster(data, &self.config)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = raster.width,
                height = raster.height
            ).entered();
            self.validate_dimensions(raster.width, raster.height)?;
        }

        RasterImage::new(name, raster)
    }

    /// Dark-filtered band medians of a reference image, to be passed to
    /// [`adjust_brightness`](Self::adjust_brightness) for every image of a
    /// mosaic.
    pub fn reference_medians<P: AsRef<Path>>(&self, path: P) -> Result<[f64; 3]> {
        let mut reference = self.open(path)?;
        reference.medians_ignore_dark()
    }

    /// Writes an 8-bit histogram 2SD stretch of `image` to
    /// `8bit_hist2sd_<name>` and returns its path.
    #[instrument(skip(self, image), fields(image = %image.name()))]
    pub fn adjust_color_balance(&self, image: &RasterImage, no_data_value: u16) -> Result<PathBuf> {
        let functions = {
            let _span = tracing::info_span!("color_balance_functions").entered();
            build_color_balance_functions(image.min_max()?, image.mean_std_dev()?)?
        };

        let output = {
            let _span = tracing::info_span!("apply_transfer_functions").entered();
            apply_transfer_functions(image, &functions, no_data_value)?
        };

        let path = OutputKind::ColorBalance.output_path(&self.config.output_dir, image.name());
        self.write_output(&path, output.width, output.height, |out| {
            self.writer.write_raster(&output, out, &self.config)
        })?;

        info!(output = %path.display(), "Colour balance complete");
        Ok(path)
    }

    /// Shifts the brightness of `image` towards `reference_medians` and
    /// writes it to `brightness_<name>`.
    #[instrument(skip(self, image), fields(image = %image.name()))]
    pub fn adjust_brightness(
        &self,
        image: &mut RasterImage,
        reference_medians: [f64; 3],
        no_data_value: u16,
    ) -> Result<PathBuf> {
        let functions = {
            let _span = tracing::info_span!("brightness_functions").entered();
            let medians = image.medians_ignore_dark()?;
            build_brightness_functions(medians, reference_medians)?
        };

        let output = {
            let _span = tracing::info_span!("apply_transfer_functions").entered();
            apply_transfer_functions(image, &functions, no_data_value)?
        };

        let path = OutputKind::Brightness.output_path(&self.config.output_dir, image.name());
        self.write_output(&path, output.width, output.height, |out| {
            self.writer.write_raster(&output, out, &self.config)
        })?;

        info!(output = %path.display(), "Brightness adjustment complete");
        Ok(path)
    }

    /// Copies `image` unchanged at its source depth to `no_border_<name>`,
    /// declaring 0 as its no-data value so viewers hide the border.
    #[instrument(skip(self, image), fields(image = %image.name()))]
    pub fn adjust_remove_border(&self, image: &RasterImage) -> Result<PathBuf> {
        let path = OutputKind::RemoveBorder.output_path(&self.config.output_dir, image.name());
        self.write_output(&path, image.width(), image.height(), |output| {
            self.writer.crop_no_data(image, 0, output, &self.config)
        })?;

        info!(output = %path.display(), "Border removal complete");
        Ok(path)
    }

    fn write_output<F>(&self, path: &Path, width: usize, height: usize, encode: F) -> Result<()>
    where
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        let file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(path).map_err(|e| {
                AdjustError::OutputWriteError(format!("{}: {}", path.display(), e))
            })?
        };

        let _span = tracing::info_span!("encode_raster", width, height).entered();
        let mut output = BufWriter::new(file);
        encode(&mut output as &mut dyn Write)?;
        output.flush().map_err(|e| {
            AdjustError::OutputWriteError(format!("{}: {}", path.display(), e))
        })?;
        Ok(())
    }

    pub fn config(&self) -> &AdjustConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AdjustConfig) {
        self.config = config;
    }
}
