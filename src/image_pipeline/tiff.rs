//! TIFF reading module
//!
//! This module decodes TIFF files into an in-memory image that keeps the
//! source color layout, ready for normalization.

mod reader;
mod standard_tiff_reader;
mod strips;
pub mod types;

pub use reader::TiffImageReader;
pub use standard_tiff_reader::{StandardTiffReader, TIFF_EXTENSIONS};
pub use types::{ColorMode, DecodedImage, PixelData};
