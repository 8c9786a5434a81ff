//! Decoded TIFF image types

/// Color layout of a decoded image, as stored in the source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorMode {
    /// Single luminance channel (8 or 16 bits)
    Gray { bits: u8 },
    /// Luminance plus alpha (8 or 16 bits)
    GrayAlpha { bits: u8 },
    /// Interleaved RGB (8 or 16 bits)
    Rgb { bits: u8 },
    /// Interleaved RGBA (8 or 16 bits)
    Rgba { bits: u8 },
    /// Interleaved CMYK, 8 bits per sample
    Cmyk,
    /// Indexed color; `color_map` holds all reds, then all greens, then all blues
    Palette { bits: u8, color_map: Vec<u16> },
    /// 1-bit black and white, rows packed MSB first and padded to a byte
    Bilevel,
}

impl ColorMode {
    /// Number of interleaved samples per pixel in the decoded buffer.
    pub fn channels(&self) -> usize {
        match self {
            ColorMode::Gray { .. } | ColorMode::Palette { .. } | ColorMode::Bilevel => 1,
            ColorMode::GrayAlpha { .. } => 2,
            ColorMode::Rgb { .. } => 3,
            ColorMode::Rgba { .. } | ColorMode::Cmyk => 4,
        }
    }

    /// True for the modes that go to PNG untouched.
    pub fn is_rgb_or_rgba(&self) -> bool {
        matches!(self, ColorMode::Rgb { .. } | ColorMode::Rgba { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Gray { .. } => "gray",
            ColorMode::GrayAlpha { .. } => "gray+alpha",
            ColorMode::Rgb { .. } => "rgb",
            ColorMode::Rgba { .. } => "rgba",
            ColorMode::Cmyk => "cmyk",
            ColorMode::Palette { .. } => "palette",
            ColorMode::Bilevel => "bilevel",
        }
    }
}

/// Sample storage for a decoded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    U8(Vec<u8>),
    U16(Vec<u16>),
}

impl PixelData {
    pub fn len(&self) -> usize {
        match self {
            PixelData::U8(data) => data.len(),
            PixelData::U16(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Represents a decoded image, before or after color normalization
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Color layout of `pixels`
    pub mode: ColorMode,
    /// Interleaved samples, row-major
    pub pixels: PixelData,
}

impl DecodedImage {
    /// Number of samples the buffer must hold for the declared mode and size.
    pub fn expected_len(&self) -> usize {
        match self.mode {
            ColorMode::Bilevel => self.width.div_ceil(8) * self.height,
            _ => self.width * self.height * self.mode.channels(),
        }
    }
}
