use tiff2png::gui::{NativePrompter, run_session};
use tiff2png::image_pipeline::{ConversionConfig, TiffToPngPipeline};
use tiff2png::logger;

use tracing::info;

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting tiff2png dialogs...");

    let pipeline = TiffToPngPipeline::new(ConversionConfig::default())?;

    run_session(&NativePrompter, &pipeline).finish()
}
