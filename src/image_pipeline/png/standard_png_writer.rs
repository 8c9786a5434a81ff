use std::io::Write;

use image::ImageEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::ExtendedColorType;
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::png::types::{ConversionConfig, PngCompression};
use crate::image_pipeline::png::writer::PngWriter;
use crate::image_pipeline::tiff::types::{ColorMode, DecodedImage, PixelData};

pub struct StandardPngWriter;

impl PngWriter for StandardPngWriter {
    fn write_png(&self, image: &DecodedImage, output: &mut dyn Write, config: &ConversionConfig) -> Result<()> {
        debug!(
            "Encoding PNG image: {}x{} {} (quality {})",
            image.width,
            image.height,
            image.mode.name(),
            config.quality
        );

        let color_type = match (&image.mode, &image.pixels) {
            (ColorMode::Rgb { .. }, PixelData::U8(_)) => ExtendedColorType::Rgb8,
            (ColorMode::Rgba { .. }, PixelData::U8(_)) => ExtendedColorType::Rgba8,
            (ColorMode::Rgb { .. }, PixelData::U16(_)) => ExtendedColorType::Rgb16,
            (ColorMode::Rgba { .. }, PixelData::U16(_)) => ExtendedColorType::Rgba16,
            (mode, _) => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "PNG output from {} pixels",
                    mode.name()
                )));
            }
        };

        let compression = match config.compression() {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        };
        let filter = if config.optimize {
            FilterType::Adaptive
        } else {
            FilterType::Sub
        };

        // The encoder takes 16-bit samples as native-endian bytes.
        let samples: std::borrow::Cow<'_, [u8]> = match &image.pixels {
            PixelData::U8(data) => std::borrow::Cow::Borrowed(data),
            PixelData::U16(data) => std::borrow::Cow::Owned(
                data.iter().flat_map(|v| v.to_ne_bytes()).collect(),
            ),
        };

        let mut buffer = Vec::new();
        let encoder = PngEncoder::new_with_quality(&mut buffer, compression, filter);
        encoder
            .write_image(&samples, image.width as u32, image.height as u32, color_type)
            .map_err(|e| ConversionError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("PNG encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_image() -> DecodedImage {
        DecodedImage {
            width: 2,
            height: 2,
            mode: ColorMode::Rgb { bits: 8 },
            pixels: PixelData::U8(vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30]),
        }
    }

    #[test]
    fn test_writes_decodable_png() {
        let mut output = Vec::new();
        StandardPngWriter
            .write_png(&rgb_image(), &mut output, &ConversionConfig::default())
            .unwrap();

        assert_eq!(&output[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&output).unwrap().to_rgb8();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.get_pixel(1, 1).0, [10, 20, 30]);
    }

    #[test]
    fn test_every_quality_encodes() {
        for quality in [0, 31, 32, 63, 64, 95] {
            let config = ConversionConfig::builder()
                .quality(quality)
                .optimize(false)
                .build();
            let mut output = Vec::new();
            StandardPngWriter
                .write_png(&rgb_image(), &mut output, &config)
                .unwrap();
            assert!(!output.is_empty());
        }
    }

    #[test]
    fn test_keeps_sixteen_bit_rgba() {
        let rgba = DecodedImage {
            width: 1,
            height: 1,
            mode: ColorMode::Rgba { bits: 16 },
            pixels: PixelData::U16(vec![0x1234, 0x5678, 0x9abc, 0xffff]),
        };
        let mut output = Vec::new();
        StandardPngWriter
            .write_png(&rgba, &mut output, &ConversionConfig::default())
            .unwrap();

        let decoded = image::load_from_memory(&output).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgba16);
        assert_eq!(decoded.to_rgba16().get_pixel(0, 0).0, [0x1234, 0x5678, 0x9abc, 0xffff]);
    }

    #[test]
    fn test_rejects_unnormalized_mode() {
        let gray = DecodedImage {
            width: 1,
            height: 1,
            mode: ColorMode::Gray { bits: 8 },
            pixels: PixelData::U8(vec![0]),
        };
        let mut output = Vec::new();
        let result = StandardPngWriter.write_png(&gray, &mut output, &ConversionConfig::default());
        assert!(matches!(result, Err(ConversionError::UnsupportedFormat(_))));
    }
}
