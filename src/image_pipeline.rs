//! Image processing pipeline module
//!
//! This module provides a structured approach to TIFF to PNG conversion,
//! with separate modules for TIFF reading, color normalization, PNG writing,
//! single-file orchestration and directory batches.

pub mod tiff;
pub mod png;
pub mod color;
pub mod conversions;
pub mod batch;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use self::tiff::{
    ColorMode,
    DecodedImage,
    PixelData,
    TiffImageReader,
    StandardTiffReader,
    TIFF_EXTENSIONS,
};

pub use color::RgbNormalizer;

pub use png::{
    ConversionConfig,
    ConversionConfigBuilder,
    PngCompression,
    PngWriter,
    StandardPngWriter,
    DEFAULT_QUALITY,
    MAX_QUALITY,
};

pub use conversions::{
    TiffToPngPipeline,
    default_output_path,
};

pub use batch::{
    BatchReport,
    FailedConversion,
    collect_tiff_files,
    process_directory,
};
