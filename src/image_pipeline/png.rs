//! PNG writing module
//!
//! This module provides PNG encoding with a quality hint and optional optimization.

mod writer;
mod standard_png_writer;
pub mod types;

pub use writer::PngWriter;
pub use standard_png_writer::StandardPngWriter;
pub use types::{
    ConversionConfig, ConversionConfigBuilder, PngCompression, DEFAULT_QUALITY, MAX_QUALITY,
};
