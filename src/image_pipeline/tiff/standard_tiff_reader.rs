//! TIFF reader implementation using the tiff library.
//!
//! Decodes the first image of a TIFF file and maps its layout onto
//! [`ColorMode`]. Most layouts go through the decoder's `colortype()` and
//! `read_image()`. Palette and 1-bit images are recognized from their tags
//! first and read straight from the strips, since the decoder rejects palette
//! photometrics.

use std::io::Cursor;

use ::tiff::decoder::{Decoder, DecodingResult};
use ::tiff::tags::Tag;
use ::tiff::{ColorType, TiffError};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::tiff::reader::TiffImageReader;
use crate::image_pipeline::tiff::strips::{read_packed_rows, unpack_indices};
use crate::image_pipeline::tiff::types::{ColorMode, DecodedImage, PixelData};

/// File extensions picked up when scanning a directory. Matching is case-sensitive.
pub const TIFF_EXTENSIONS: &[&str] = &["tif", "tiff"];

const PHOTOMETRIC_WHITE_IS_ZERO: u32 = 0;
const PHOTOMETRIC_BLACK_IS_ZERO: u32 = 1;
const PHOTOMETRIC_PALETTE: u32 = 3;

/// TIFF reader backed by the `tiff` crate's decoder.
///
/// Supported layouts:
/// - Gray, gray+alpha, RGB and RGBA at 8 or 16 bits per sample
/// - CMYK at 8 bits per sample
/// - Palette at 1, 2, 4 or 8 bits per index (uncompressed or PackBits strips)
/// - Bilevel, either WhiteIsZero or BlackIsZero (uncompressed or PackBits strips)
pub struct StandardTiffReader;

impl TiffImageReader for StandardTiffReader {
    /// Reads and decodes TIFF image data from a byte array.
    ///
    /// # Arguments
    ///
    /// * `data` - Raw bytes of the TIFF file
    ///
    /// # Returns
    ///
    /// * `Ok(DecodedImage)` - The first image in the file, in its stored color layout
    /// * `Err(ConversionError)` - The file is not a TIFF, is corrupt, or uses a layout
    ///   that is not supported
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tiff2png::image_pipeline::{StandardTiffReader, TiffImageReader};
    ///
    /// let reader = StandardTiffReader;
    /// let bytes = std::fs::read("scan.tif").unwrap();
    /// let image = reader.read_tiff(&bytes).unwrap();
    /// println!("{}x{} {}", image.width, image.height, image.mode.name());
    /// ```
    fn read_tiff(&self, data: &[u8]) -> Result<DecodedImage> {
        debug!("Decoding TIFF image, {} bytes", data.len());

        let mut decoder = Decoder::new(Cursor::new(data)).map_err(tiff_error)?;

        let (width, height) = decoder.dimensions().map_err(tiff_error)?;
        let (width, height) = (width as usize, height as usize);

        let photometric = decoder
            .get_tag_u32(Tag::PhotometricInterpretation)
            .map_err(tiff_error)?;
        let bits_per_sample = decoder
            .get_tag_u32_vec(Tag::BitsPerSample)
            .unwrap_or_else(|_| vec![1]);

        let image = match (photometric, bits_per_sample.as_slice()) {
            (PHOTOMETRIC_PALETTE, &[bits]) => read_palette(&mut decoder, data, width, height, bits)?,
            (PHOTOMETRIC_PALETTE, other) => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "palette with bits per sample {:?}",
                    other
                )));
            }
            (PHOTOMETRIC_WHITE_IS_ZERO | PHOTOMETRIC_BLACK_IS_ZERO, &[1]) => {
                let mut packed = read_packed_rows(&mut decoder, data, width, height, 1)?;
                if photometric == PHOTOMETRIC_WHITE_IS_ZERO {
                    packed.iter_mut().for_each(|byte| *byte = !*byte);
                }
                DecodedImage {
                    width,
                    height,
                    mode: ColorMode::Bilevel,
                    pixels: PixelData::U8(packed),
                }
            }
            _ => read_with_decoder(&mut decoder, width, height)?,
        };

        debug!(
            "Decoded {}x{} {} ({} samples)",
            image.width,
            image.height,
            image.mode.name(),
            image.pixels.len()
        );

        Ok(image)
    }
}

/// Reads a palette image: the color map from its tag, the indices from the strips.
fn read_palette(
    decoder: &mut Decoder<Cursor<&[u8]>>,
    data: &[u8],
    width: usize,
    height: usize,
    bits: u32,
) -> Result<DecodedImage> {
    let bits = match bits {
        1 | 2 | 4 | 8 => bits as u8,
        other => {
            return Err(ConversionError::UnsupportedFormat(format!(
                "palette at {} bits per index",
                other
            )));
        }
    };

    let color_map = decoder
        .get_tag_u16_vec(Tag::ColorMap)
        .map_err(|e| ConversionError::DecodeError(format!("palette color map: {}", e)))?;
    let entries = 1usize << bits;
    if color_map.len() != entries * 3 {
        return Err(ConversionError::DecodeError(format!(
            "palette color map has {} values, expected {}",
            color_map.len(),
            entries * 3
        )));
    }

    let packed = read_packed_rows(decoder, data, width, height, bits as usize)?;
    let indices = if bits < 8 {
        unpack_indices(&packed, width, height, bits)
    } else {
        packed
    };

    Ok(DecodedImage {
        width,
        height,
        mode: ColorMode::Palette { bits, color_map },
        pixels: PixelData::U8(indices),
    })
}

/// Reads every other layout through the decoder's own color type and pixel pass.
fn read_with_decoder(
    decoder: &mut Decoder<Cursor<&[u8]>>,
    width: usize,
    height: usize,
) -> Result<DecodedImage> {
    let color_type = decoder.colortype().map_err(tiff_error)?;
    debug!("Decoder color type {:?}", color_type);

    let mode = match color_type {
        ColorType::Gray(bits @ (8 | 16)) => ColorMode::Gray { bits },
        // Gray with an extra alpha sample is reported as two-band data.
        ColorType::Multiband {
            bit_depth: bits @ (8 | 16),
            num_samples: 2,
        }
        | ColorType::GrayA(bits @ (8 | 16)) => ColorMode::GrayAlpha { bits },
        ColorType::RGB(bits @ (8 | 16)) => ColorMode::Rgb { bits },
        ColorType::RGBA(bits @ (8 | 16)) => ColorMode::Rgba { bits },
        ColorType::CMYK(8) => ColorMode::Cmyk,
        other => {
            return Err(ConversionError::UnsupportedFormat(format!(
                "TIFF color type {:?}",
                other
            )));
        }
    };

    let pixels = match decoder.read_image().map_err(tiff_error)? {
        DecodingResult::U8(values) => PixelData::U8(values),
        DecodingResult::U16(values) => PixelData::U16(values),
        _ => {
            return Err(ConversionError::UnsupportedFormat(format!(
                "TIFF sample format for {:?}",
                color_type
            )));
        }
    };

    Ok(DecodedImage {
        width,
        height,
        mode,
        pixels,
    })
}

fn tiff_error(e: TiffError) -> ConversionError {
    match e {
        TiffError::UnsupportedError(inner) => ConversionError::UnsupportedFormat(inner.to_string()),
        other => ConversionError::DecodeError(other.to_string()),
    }
}
