//! Command-line interface: argument parsing and dispatch to single-file or
//! directory conversion.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser};
use tracing::info;

use crate::image_pipeline::{
    BatchReport, ConversionConfig, DEFAULT_QUALITY, TiffToPngPipeline, process_directory,
};

/// Convert TIFF images to PNG format
#[derive(Parser, Debug)]
#[command(name = "tiff2png", version, about)]
pub struct Cli {
    /// Input TIFF file or directory
    pub input: PathBuf,

    /// Output PNG file or directory (optional)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output quality (0-95)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_QUALITY,
        value_parser = clap::value_parser!(u8).range(0..=95)
    )]
    pub quality: u8,

    /// Skip best-compression optimization and let quality pick the deflate level
    #[arg(long)]
    pub no_optimize: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn config(&self) -> ConversionConfig {
        ConversionConfig::builder()
            .quality(self.quality)
            .optimize(!self.no_optimize)
            .build()
    }
}

/// What a CLI run did.
#[derive(Debug)]
pub enum Outcome {
    /// Single file converted to this path
    Converted(PathBuf),
    /// Directory processed
    Batch(BatchReport),
}

/// Runs the conversion the arguments ask for.
///
/// A file input converts that file and fails on any error. A directory input
/// converts every TIFF in it; per-file failures end up in the report rather
/// than failing the run.
pub fn run(cli: &Cli) -> anyhow::Result<Outcome> {
    let pipeline = TiffToPngPipeline::new(cli.config())
        .context("invalid conversion settings")?;

    info!(
        quality = pipeline.config().quality,
        optimize = pipeline.config().optimize,
        "Pipeline initialized"
    );

    if cli.input.is_file() {
        let output = pipeline
            .convert_file(&cli.input, cli.output.as_deref())
            .with_context(|| format!("failed to convert {}", cli.input.display()))?;
        Ok(Outcome::Converted(output))
    } else if cli.input.is_dir() {
        let report = process_directory(&pipeline, &cli.input, cli.output.as_deref())
            .with_context(|| format!("failed to process directory {}", cli.input.display()))?;
        Ok(Outcome::Batch(report))
    } else {
        bail!("Input path {} does not exist", cli.input.display());
    }
}
