use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::png::types::ConversionConfig;
use crate::image_pipeline::tiff::types::DecodedImage;

pub trait PngWriter {
    fn write_png(&self, image: &DecodedImage, output: &mut dyn Write, config: &ConversionConfig) -> Result<()>;
}
