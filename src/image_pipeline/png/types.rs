//! PNG conversion configuration types

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Highest accepted quality value.
pub const MAX_QUALITY: u8 = 95;

/// Quality used when none is given.
pub const DEFAULT_QUALITY: u8 = 95;

/// Deflate effort used by the PNG encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngCompression {
    /// Fast compression (largest file)
    Fast,
    /// Default zlib level
    Default,
    /// Best compression (slowest, smallest file)
    Best,
}

/// Configuration for TIFF to PNG conversion
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Quality hint, 0..=95. PNG is lossless, so this only steers compression effort
    pub quality: u8,
    /// Always use best compression with adaptive row filtering
    pub optimize: bool,
    /// Whether to reject zero-sized images before encoding
    pub validate_dimensions: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY,
            optimize: true,
            validate_dimensions: true,
        }
    }
}

impl ConversionConfig {
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.quality > MAX_QUALITY {
            return Err(ConversionError::InvalidQuality(self.quality));
        }
        Ok(())
    }

    /// Compression effort handed to the encoder.
    ///
    /// With `optimize` set this is always [`PngCompression::Best`]; otherwise the
    /// quality hint picks a level: 0-31 fast, 32-63 default, 64-95 best.
    pub fn compression(&self) -> PngCompression {
        if self.optimize {
            return PngCompression::Best;
        }
        match self.quality {
            0..=31 => PngCompression::Fast,
            32..=63 => PngCompression::Default,
            _ => PngCompression::Best,
        }
    }
}

/// Builder for ConversionConfig
#[derive(Default)]
pub struct ConversionConfigBuilder {
    quality: Option<u8>,
    optimize: Option<bool>,
    validate_dimensions: Option<bool>,
}

impl ConversionConfigBuilder {
    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn optimize(mut self, optimize: bool) -> Self {
        self.optimize = Some(optimize);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn build(self) -> ConversionConfig {
        let default = ConversionConfig::default();
        ConversionConfig {
            quality: self.quality.unwrap_or(default.quality),
            optimize: self.optimize.unwrap_or(default.optimize),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
        }
    }
}
