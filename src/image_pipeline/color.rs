//! Color normalization: everything that is not already RGB or RGBA becomes 8-bit RGB

use tracing::{debug, info};

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::tiff::types::{ColorMode, DecodedImage, PixelData};

pub struct RgbNormalizer;

impl RgbNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, image: DecodedImage) -> Result<DecodedImage> {
        if image.pixels.len() != image.expected_len() {
            return Err(ConversionError::DecodeError(format!(
                "{} image {}x{} has {} samples, expected {}",
                image.mode.name(),
                image.width,
                image.height,
                image.pixels.len(),
                image.expected_len()
            )));
        }

        if image.mode.is_rgb_or_rgba() {
            debug!("Keeping {} color mode", image.mode.name());
            return Ok(image);
        }

        info!("Converting {} image to RGB", image.mode.name());

        let pixel_count = image.width * image.height;
        let mut rgb = Vec::with_capacity(pixel_count * 3);

        match (&image.mode, &image.pixels) {
            (ColorMode::Gray { .. }, PixelData::U8(data)) => {
                for &v in data {
                    rgb.extend_from_slice(&[v, v, v]);
                }
            }
            (ColorMode::Gray { .. }, PixelData::U16(data)) => {
                for &v in data {
                    let v = high_byte(v);
                    rgb.extend_from_slice(&[v, v, v]);
                }
            }
            (ColorMode::GrayAlpha { .. }, PixelData::U8(data)) => {
                for px in data.chunks_exact(2) {
                    rgb.extend_from_slice(&[px[0], px[0], px[0]]);
                }
            }
            (ColorMode::GrayAlpha { .. }, PixelData::U16(data)) => {
                for px in data.chunks_exact(2) {
                    let v = high_byte(px[0]);
                    rgb.extend_from_slice(&[v, v, v]);
                }
            }
            (ColorMode::Cmyk, PixelData::U8(data)) => {
                for px in data.chunks_exact(4) {
                    let k = px[3];
                    rgb.extend_from_slice(&[
                        255 - px[0].saturating_add(k),
                        255 - px[1].saturating_add(k),
                        255 - px[2].saturating_add(k),
                    ]);
                }
            }
            (ColorMode::Palette { bits, color_map }, PixelData::U8(indices)) => {
                let entries = 1usize << bits;
                if color_map.len() != entries * 3 {
                    return Err(ConversionError::DecodeError(format!(
                        "palette color map has {} values, expected {}",
                        color_map.len(),
                        entries * 3
                    )));
                }
                for &index in indices {
                    let index = index as usize;
                    if index >= entries {
                        return Err(ConversionError::DecodeError(format!(
                            "palette index {} out of range for {} entries",
                            index, entries
                        )));
                    }
                    rgb.extend_from_slice(&[
                        high_byte(color_map[index]),
                        high_byte(color_map[entries + index]),
                        high_byte(color_map[2 * entries + index]),
                    ]);
                }
            }
            (ColorMode::Bilevel, PixelData::U8(packed)) => {
                let row_bytes = image.width.div_ceil(8);
                for row in packed.chunks(row_bytes).take(image.height) {
                    for x in 0..image.width {
                        let bit = (row[x / 8] >> (7 - (x % 8))) & 1;
                        let v = if bit == 1 { 255 } else { 0 };
                        rgb.extend_from_slice(&[v, v, v]);
                    }
                }
            }
            (mode, _) => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "{} samples do not match the declared bit depth",
                    mode.name()
                )));
            }
        }

        Ok(DecodedImage {
            width: image.width,
            height: image.height,
            mode: ColorMode::Rgb { bits: 8 },
            pixels: PixelData::U8(rgb),
        })
    }
}

impl Default for RgbNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn high_byte(v: u16) -> u8 {
    (v >> 8) as u8
}
