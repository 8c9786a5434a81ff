use std::process::ExitCode;

use clap::Parser;
use tiff2png::cli::{Cli, Outcome, run};
use tiff2png::logger;

use tracing::{error, info};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init_with_verbosity(cli.verbose);

    info!("Starting tiff2png...");

    match run(&cli) {
        Ok(Outcome::Converted(path)) => {
            info!("Conversion successful: {}", path.display());
            ExitCode::SUCCESS
        }
        Ok(Outcome::Batch(report)) => {
            info!(
                "Processed {} file(s): {} converted, {} failed",
                report.found(),
                report.converted.len(),
                report.failed.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
