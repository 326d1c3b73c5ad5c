use std::io::{Cursor, Seek, Write};

use tiff::encoder::colortype::{self, ColorType};
use tiff::encoder::compression::DeflateLevel;
use tiff::encoder::{Compression, DirectoryEncoder, TiffEncoder, TiffKind, TiffValue};
use tiff::tags::Predictor;
use tracing::debug;

use crate::raster_pipeline::common::error::{AdjustError, Result};
use crate::raster_pipeline::config::{AdjustConfig, TiffCompression};
use crate::raster_pipeline::geotiff::tags;
use crate::raster_pipeline::raster::{GeoMetadata, OutputRaster, OutputSamples, RasterWriter};

pub struct GeoTiffWriter;

impl RasterWriter for GeoTiffWriter {
    fn write_raster(&self, raster: &OutputRaster, output: &mut dyn Write, config: &AdjustConfig) -> Result<()> {
        debug!("Encoding GeoTIFF image: {}x{}", raster.width, raster.height);

        let mut buffer = Vec::new();

        {
            let compression = match config.compression {
                TiffCompression::None => Compression::Uncompressed,
                TiffCompression::Lzw => Compression::Lzw,
                TiffCompression::Deflate => Compression::Deflate(DeflateLevel::Fast),
            };

            let mut encoder = TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(encode_error)?
                .with_compression(compression);

            if let Some(predictor_val) = config.predictor {
                let predictor = match predictor_val {
                    2 => Predictor::Horizontal,
                    _ => Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            match &raster.samples {
                OutputSamples::U8(planes) => {
                    encode_image::<colortype::RGB8, _, _>(&mut encoder, raster, &interleave(planes))?
                }
                OutputSamples::U16(planes) => {
                    encode_image::<colortype::RGB16, _, _>(&mut encoder, raster, &interleave(planes))?
                }
            }
        }

        output.write_all(&buffer)?;

        debug!("GeoTIFF encoding complete");
        Ok(())
    }
}

fn encode_image<C, W, K>(
    encoder: &mut TiffEncoder<W, K>,
    raster: &OutputRaster,
    data: &[C::Inner],
) -> Result<()>
where
    C: ColorType,
    [C::Inner]: TiffValue,
    W: Write + Seek,
    K: TiffKind,
{
    let mut image = encoder
        .new_image::<C>(raster.width as u32, raster.height as u32)
        .map_err(encode_error)?;

    write_geo_tags(image.encoder(), &raster.geo)?;
    if let Some(no_data) = raster.no_data_value {
        image
            .encoder()
            .write_tag(tags::GDAL_NODATA, no_data.to_string().as_str())
            .map_err(encode_error)?;
    }

    image.write_data(data).map_err(encode_error)
}

fn write_geo_tags<W: Write + Seek, K: TiffKind>(
    directory: &mut DirectoryEncoder<'_, W, K>,
    geo: &GeoMetadata,
) -> Result<()> {
    if let Some(transform) = geo.transform {
        if transform.is_north_up() {
            directory
                .write_tag(tags::MODEL_PIXEL_SCALE, &transform.pixel_scale()[..])
                .map_err(encode_error)?;
            directory
                .write_tag(tags::MODEL_TIEPOINT, &transform.tiepoint()[..])
                .map_err(encode_error)?;
        } else {
            directory
                .write_tag(tags::MODEL_TRANSFORMATION, &transform.matrix()[..])
                .map_err(encode_error)?;
        }
    }

    if let Some(projection) = &geo.projection {
        directory
            .write_tag(tags::GEO_KEY_DIRECTORY, projection.key_directory.as_slice())
            .map_err(encode_error)?;
        if let Some(doubles) = &projection.double_params {
            directory
                .write_tag(tags::GEO_DOUBLE_PARAMS, doubles.as_slice())
                .map_err(encode_error)?;
        }
        if let Some(ascii) = &projection.ascii_params {
            directory
                .write_tag(tags::GEO_ASCII_PARAMS, ascii.as_str())
                .map_err(encode_error)?;
        }
    }

    Ok(())
}

/// Pixel-interleaves three equally sized planes.
fn interleave<T: Copy>(planes: &[Vec<T>; 3]) -> Vec<T> {
    let [red, green, blue] = planes;
    red.iter()
        .zip(green)
        .zip(blue)
        .flat_map(|((&r, &g), &b)| [r, g, b])
        .collect()
}

fn encode_error(e: tiff::TiffError) -> AdjustError {
    AdjustError::EncodeError(e.to_string())
}
