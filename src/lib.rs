//! Convert TIFF raster images to PNG, one file or a whole directory at a time.

pub mod cli;
pub mod gui;
pub mod image_pipeline;
pub mod logger;
