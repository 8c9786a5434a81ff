//! Pipeline conversions module
//!
//! This module contains orchestration logic for TIFF to PNG conversion.

mod tiff_to_png;


pub use tiff_to_png::{TiffToPngPipeline, default_output_path};
