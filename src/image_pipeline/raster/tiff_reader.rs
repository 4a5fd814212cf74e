//! Raster reader implementation using the tiff library.
//!
//! Decodes Gray, gray with alpha, RGB and RGBA TIFF images into an RGBA8
//! [`RasterImage`]. Gray samples are expanded to opaque RGB and images without
//! an alpha channel are treated as fully opaque. 16 bit samples keep their
//! high byte. Packed 1, 2 and 4 bit samples (bilevel scans, for one) are
//! unpacked row by row and scaled to the full 0..=255 range, so a 1 bit image
//! reads as pure black and white.
//!
//! Palette images are not read: the tiff decoder refuses the RGB palette
//! interpretation before any sample is decoded, and that refusal surfaces as
//! [`PipelineError::UnsupportedFormat`] like any other unhandled layout.

use std::io::Cursor;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::{ColorType, TiffError};
use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::raster::reader::RasterReader;
use crate::image_pipeline::raster::types::{Color, RasterImage};

/// Raster reader that uses the tiff library for decoding.
pub struct TiffRasterReader;

/// Sample layout of a decoded TIFF, in samples per pixel.
#[derive(Debug, Clone, Copy)]
enum Layout {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
}

impl Layout {
    /// Layout and bits per sample for a decoder color type.
    fn from_color_type(color_type: ColorType) -> Result<(Self, u8)> {
        match color_type {
            ColorType::Gray(bits) => Ok((Layout::Gray, bits)),
            // The decoder reports two-sample BlackIsZero data as multiband
            ColorType::GrayA(bits)
            | ColorType::Multiband {
                bit_depth: bits,
                num_samples: 2,
            } => Ok((Layout::GrayAlpha, bits)),
            ColorType::RGB(bits) => Ok((Layout::Rgb, bits)),
            ColorType::RGBA(bits) => Ok((Layout::Rgba, bits)),
            other => Err(PipelineError::UnsupportedFormat(format!("{:?}", other))),
        }
    }

    fn samples(self) -> usize {
        match self {
            Layout::Gray => 1,
            Layout::GrayAlpha => 2,
            Layout::Rgb => 3,
            Layout::Rgba => 4,
        }
    }

    fn to_color(self, s: &[u8]) -> Color {
        match self {
            Layout::Gray => Color::rgb(s[0], s[0], s[0]),
            Layout::GrayAlpha => Color::rgba(s[0], s[0], s[0], s[1]),
            Layout::Rgb => Color::rgb(s[0], s[1], s[2]),
            Layout::Rgba => Color::rgba(s[0], s[1], s[2], s[3]),
        }
    }
}

/// Maps decoder failures, keeping "valid TIFF we cannot handle" apart from
/// "not a readable TIFF".
fn decode_error(e: TiffError) -> PipelineError {
    match e {
        TiffError::UnsupportedError(e) => PipelineError::UnsupportedFormat(e.to_string()),
        other => PipelineError::DecodeError(other.to_string()),
    }
}

/// Expands packed sub-byte samples to one byte each.
///
/// Samples are stored most significant bit first and every row starts on a
/// byte boundary. Values are scaled so the largest sample becomes 255.
fn unpack_rows(packed: &[u8], bits: u8, row_samples: usize, height: usize) -> Vec<u8> {
    let bits = bits as usize;
    let stride = (row_samples * bits).div_ceil(8);
    if stride == 0 {
        return Vec::new();
    }

    let max = (1usize << bits) - 1;
    let mut samples = Vec::with_capacity(row_samples * height);

    for row in packed.chunks(stride).take(height) {
        for i in 0..row_samples {
            let bit = i * bits;
            let Some(&byte) = row.get(bit / 8) else {
                break;
            };
            let value = (byte as usize >> (8 - bits - bit % 8)) & max;
            samples.push((value * 255 / max) as u8);
        }
    }

    samples
}

impl RasterReader for TiffRasterReader {
    /// Reads and decodes a TIFF image from a byte array.
    ///
    /// # Returns
    ///
    /// * `Ok(RasterImage)` - Successfully decoded image
    /// * `Err(PipelineError::DecodeError)` - The bytes are not a readable TIFF
    /// * `Err(PipelineError::UnsupportedFormat)` - Color type or bit depth not handled
    fn read_raster(&self, data: &[u8]) -> Result<RasterImage> {
        debug!("Decoding TIFF image, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data)).map_err(decode_error)?;

        let (width, height) = decoder.dimensions().map_err(decode_error)?;
        let (width, height) = (width as usize, height as usize);

        let color_type = decoder.colortype().map_err(decode_error)?;
        let (layout, bits) = Layout::from_color_type(color_type)?;

        debug!("Decoded header: {}x{}, {:?} at {} bits", width, height, layout, bits);

        let row_samples = width * layout.samples();

        // Reduce every sample to 8 bits
        let samples: Vec<u8> = match (decoder.read_image().map_err(decode_error)?, bits) {
            (DecodingResult::U8(values), 8) => values,
            (DecodingResult::U8(values), 1 | 2 | 4) => unpack_rows(&values, bits, row_samples, height),
            (DecodingResult::U16(values), 16) => values.iter().map(|&v| (v >> 8) as u8).collect(),
            _ => {
                return Err(PipelineError::UnsupportedFormat(format!(
                    "{:?} at {} bits per sample",
                    layout, bits
                )));
            }
        };

        let expected = row_samples * height;
        if samples.len() < expected {
            return Err(PipelineError::DecodeError(format!(
                "expected {} samples, decoded {}",
                expected,
                samples.len()
            )));
        }

        let pixels = samples[..expected]
            .chunks_exact(layout.samples())
            .map(|s| layout.to_color(s))
            .collect();

        RasterImage::from_pixels(width, height, pixels)
    }
}
