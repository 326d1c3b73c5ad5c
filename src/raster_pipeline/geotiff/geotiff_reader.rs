//! GeoTIFF reader built on the `tiff` crate.
//!
//! Decodes pixel-interleaved three-band images at 8 or 16 bits per sample,
//! splits them into bands, and collects the georeferencing tags that must be
//! copied onto derived outputs.

use std::io::{Cursor, Read, Seek};

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult, Limits};
use tiff::tags::Tag;
use tracing::debug;

use crate::raster_pipeline::common::error::{AdjustError, Result};
use crate::raster_pipeline::config::AdjustConfig;
use crate::raster_pipeline::geotiff::tags;
use crate::raster_pipeline::raster::{
    Band, DecodedRaster, GeoMetadata, GeoTransform, Projection, RasterReader,
};

/// Reads GeoTIFF files (or any baseline RGB TIFF; georeferencing is optional).
pub struct GeoTiffReader;

const BAND_COUNT: usize = 3;

impl RasterReader for GeoTiffReader {
    fn read_raster(&self, data: &[u8], config: &AdjustConfig) -> Result<DecodedRaster> {
        debug!("Decoding GeoTIFF image, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data))
            .map_err(decode_error)?
            .with_limits(decoder_limits(config.decode_limit));

        let (width, height) = decoder.dimensions().map_err(decode_error)?;
        let (width, height) = (width as usize, height as usize);

        let samples_per_pixel = find_u16(&mut decoder, Tag::SamplesPerPixel)?.unwrap_or(1);
        if usize::from(samples_per_pixel) != BAND_COUNT {
            return Err(AdjustError::BandCount(usize::from(samples_per_pixel)));
        }
        if find_u16(&mut decoder, Tag::PlanarConfiguration)? == Some(tags::PLANAR_SEPARATE) {
            return Err(AdjustError::UnsupportedFormat(
                "band-sequential (planar) storage".to_string(),
            ));
        }

        let bits_per_sample = match decoder.colortype().map_err(decode_error)? {
            ColorType::RGB(bits) => bits,
            ColorType::Multiband { bit_depth, num_samples: 3 } => bit_depth,
            other => {
                return Err(AdjustError::UnsupportedFormat(format!("color type {other:?}")));
            }
        };
        if bits_per_sample != 8 && bits_per_sample != 16 {
            return Err(AdjustError::UnsupportedFormat(format!(
                "{bits_per_sample} bits per sample"
            )));
        }

        let geo = read_geo_metadata(&mut decoder)?;
        let no_data_value = read_no_data(&mut decoder)?;

        let samples: Vec<u16> = match decoder.read_image().map_err(decode_error)? {
            DecodingResult::U8(values) => values.into_iter().map(u16::from).collect(),
            DecodingResult::U16(values) => values,
            _ => {
                return Err(AdjustError::UnsupportedFormat(
                    "non-integer sample type".to_string(),
                ));
            }
        };

        let pixel_count = width * height;
        if samples.len() != pixel_count * BAND_COUNT {
            return Err(AdjustError::DecodeError(format!(
                "expected {} samples for {}x{} RGB, got {}",
                pixel_count * BAND_COUNT,
                width,
                height,
                samples.len()
            )));
        }

        let mut planes: [Vec<u16>; BAND_COUNT] =
            std::array::from_fn(|_| Vec::with_capacity(pixel_count));
        for pixel in samples.chunks_exact(BAND_COUNT) {
            for (plane, &value) in planes.iter_mut().zip(pixel) {
                plane.push(value);
            }
        }
        let [red, green, blue] = planes;

        debug!(
            width,
            height,
            bits_per_sample,
            georeferenced = geo.transform.is_some(),
            "Decoded GeoTIFF image"
        );

        Ok(DecodedRaster {
            width,
            height,
            bits_per_sample,
            bands: [
                Band::new(width, height, red)?,
                Band::new(width, height, green)?,
                Band::new(width, height, blue)?,
            ],
            geo,
            no_data_value,
        })
    }
}

/// Scenes are routinely larger than the decoder's default 256 MiB buffers.
pub(super) fn decoder_limits(bytes: u64) -> Limits {
    let bytes = usize::try_from(bytes).unwrap_or(usize::MAX);
    let mut limits = Limits::default();
    limits.decoding_buffer_size = bytes;
    limits.ifd_value_size = bytes;
    limits.intermediate_buffer_size = bytes;
    limits
}

fn read_geo_metadata<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<GeoMetadata> {
    let transform = match find_f64_vec(decoder, tags::MODEL_TRANSFORMATION)? {
        Some(matrix) => GeoTransform::from_matrix(&matrix),
        None => {
            let scale = find_f64_vec(decoder, tags::MODEL_PIXEL_SCALE)?;
            let tiepoint = find_f64_vec(decoder, tags::MODEL_TIEPOINT)?;
            match (scale, tiepoint) {
                (Some(scale), Some(tiepoint)) => GeoTransform::from_scale_tiepoint(&scale, &tiepoint),
                _ => None,
            }
        }
    };

    let projection = match decoder.find_tag(tags::GEO_KEY_DIRECTORY).map_err(decode_error)? {
        Some(value) => Some(Projection {
            key_directory: value.into_u16_vec().map_err(decode_error)?,
            double_params: find_f64_vec(decoder, tags::GEO_DOUBLE_PARAMS)?,
            ascii_params: find_string(decoder, tags::GEO_ASCII_PARAMS)?,
        }),
        None => None,
    };

    Ok(GeoMetadata { transform, projection })
}

/// GDAL stores the sentinel as text; only integral values that fit a sample
/// are usable here.
fn read_no_data<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<Option<u16>> {
    let Some(text) = find_string(decoder, tags::GDAL_NODATA)? else {
        return Ok(None);
    };
    let value = text
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.fract() == 0.0 && (0.0..=f64::from(u16::MAX)).contains(v))
        .map(|v| v as u16);
    if value.is_none() {
        debug!(no_data = %text, "Ignoring GDAL no-data value outside the sample range");
    }
    Ok(value)
}

fn find_u16<R: Read + Seek>(decoder: &mut Decoder<R>, tag: Tag) -> Result<Option<u16>> {
    decoder
        .find_tag(tag)
        .map_err(decode_error)?
        .map(|value| value.into_u16().map_err(decode_error))
        .transpose()
}

fn find_f64_vec<R: Read + Seek>(decoder: &mut Decoder<R>, tag: Tag) -> Result<Option<Vec<f64>>> {
    decoder
        .find_tag(tag)
        .map_err(decode_error)?
        .map(|value| value.into_f64_vec().map_err(decode_error))
        .transpose()
}

fn find_string<R: Read + Seek>(decoder: &mut Decoder<R>, tag: Tag) -> Result<Option<String>> {
    decoder
        .find_tag(tag)
        .map_err(decode_error)?
        .map(|value| value.into_string().map_err(decode_error))
        .transpose()
        .map(|text| text.map(|s| s.trim_end_matches(char::from(0)).to_string()))
}

fn decode_error(e: tiff::TiffError) -> AdjustError {
    AdjustError::DecodeError(e.to_string())
}
