use tracing::{error, info, instrument};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::image_pipeline::{
    color::RgbNormalizer,
    common::error::{ConversionError, Result},
    png::{ConversionConfig, PngWriter, StandardPngWriter},
    tiff::{StandardTiffReader, TiffImageReader},
};

/// Output path used when none is given: the input path with its extension
/// replaced by `.png`.
pub fn default_output_path(input_path: &Path) -> PathBuf {
    input_path.with_extension("png")
}

pub struct TiffToPngPipeline<R: TiffImageReader, W: PngWriter> {
    reader: R,
    writer: W,
    normalizer: RgbNormalizer,
    config: ConversionConfig,
}

impl TiffToPngPipeline<StandardTiffReader, StandardPngWriter> {
    pub fn new(config: ConversionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader: StandardTiffReader,
            writer: StandardPngWriter,
            normalizer: RgbNormalizer::new(),
            config,
        })
    }
}

impl<R: TiffImageReader, W: PngWriter> TiffToPngPipeline<R, W> {
    pub fn with_custom(reader: R, writer: W, config: ConversionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reader,
            writer,
            normalizer: RgbNormalizer::new(),
            config,
        })
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    #[instrument(skip(self, input_data, output), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8], output: &mut dyn Write) -> Result<()> {
        info!("Starting TIFF to PNG conversion");

        let decoded = {
            let _span = tracing::info_span!("decode_tiff").entered();
            self.reader.read_tiff(input_data)?
        };

        {
            let _span = tracing::info_span!("validate_dimensions",
                width = decoded.width,
                height = decoded.height
            ).entered();
            self.validate_dimensions(decoded.width, decoded.height)?;
        }

        let image = {
            let _span = tracing::info_span!("normalize_color", mode = decoded.mode.name()).entered();
            self.normalizer.process(decoded)?
        };

        {
            let _span = tracing::info_span!("encode_png", quality = self.config.quality).entered();
            self.writer.write_png(&image, output, &self.config)?;
        }

        info!(
            width = image.width,
            height = image.height,
            "Conversion complete"
        );
        Ok(())
    }

    /// Converts one file and returns the path the PNG was written to.
    ///
    /// `output_path` defaults to [`default_output_path`]. Any failure is logged
    /// and returned to the caller.
    #[instrument(skip(self, input_path, output_path))]
    pub fn convert_file<P: AsRef<Path>>(
        &self,
        input_path: P,
        output_path: Option<&Path>,
    ) -> Result<PathBuf> {
        let input_path = input_path.as_ref();
        let output_path = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_path(input_path));

        match self.convert_paths(input_path, &output_path) {
            Ok(()) => {
                info!(
                    "Successfully converted {} to {}",
                    input_path.display(),
                    output_path.display()
                );
                Ok(output_path)
            }
            Err(e) => {
                error!("Error converting {}: {}", input_path.display(), e);
                Err(e)
            }
        }
    }

    fn convert_paths(&self, input_path: &Path, output_path: &Path) -> Result<()> {
        info!(
            input = %input_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        // Encode fully before touching the destination so a failed conversion
        // leaves no truncated PNG behind.
        let mut encoded = Vec::new();
        self.convert(&input_data, &mut encoded)?;

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };
        output_file.write_all(&encoded).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
        })?;

        Ok(())
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ConversionConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }
}
