//! Dialog-driven conversion flow.
//!
//! The flow asks whether to convert one file or a directory, collects the
//! paths through pickers, runs the pipeline and reports the result. Dialogs
//! go through [`Prompter`] so the flow runs the same against native dialogs
//! or a scripted implementation.

#[cfg(feature = "gui")]
mod native;

#[cfg(feature = "gui")]
pub use native::NativePrompter;

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::image_pipeline::{
    BatchReport, PngWriter, TiffImageReader, TiffToPngPipeline, default_output_path,
    process_directory,
};

/// Which kind of input the user wants to convert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SingleFile,
    Directory,
}

/// Severity of a message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Info,
    Warning,
    Error,
}

pub trait Prompter {
    /// `None` means the user backed out.
    fn choose_mode(&self) -> Option<Mode>;
    fn pick_input_file(&self) -> Option<PathBuf>;
    /// `None` keeps the suggested path.
    fn pick_output_file(&self, suggested: &Path) -> Option<PathBuf>;
    fn pick_input_directory(&self) -> Option<PathBuf>;
    /// `None` writes PNGs next to their inputs.
    fn pick_output_directory(&self) -> Option<PathBuf>;
    fn notify(&self, level: Notice, title: &str, message: &str);
}

/// How a dialog session ended
#[derive(Debug)]
pub enum SessionOutcome {
    Cancelled,
    Converted(PathBuf),
    Batch(BatchReport),
    Failed(String),
}

impl SessionOutcome {
    /// Logs how the session ended. A failed session is logged as an error and
    /// returned as one, so the caller exits nonzero.
    pub fn finish(self) -> anyhow::Result<()> {
        match self {
            SessionOutcome::Cancelled => info!("Nothing converted"),
            SessionOutcome::Converted(path) => info!("Saved {}", path.display()),
            SessionOutcome::Batch(report) => info!(
                converted = report.converted.len(),
                failed = report.failed.len(),
                "Directory done"
            ),
            SessionOutcome::Failed(message) => {
                error!("Session ended with error: {}", message);
                anyhow::bail!(message);
            }
        }
        Ok(())
    }
}

/// Runs one dialog session: mode choice, pickers, conversion, completion message.
pub fn run_session<P, R, W>(prompter: &P, pipeline: &TiffToPngPipeline<R, W>) -> SessionOutcome
where
    P: Prompter,
    R: TiffImageReader,
    W: PngWriter,
{
    let Some(mode) = prompter.choose_mode() else {
        info!("Conversion cancelled");
        return SessionOutcome::Cancelled;
    };

    match mode {
        Mode::SingleFile => convert_single(prompter, pipeline),
        Mode::Directory => convert_directory(prompter, pipeline),
    }
}

fn convert_single<P, R, W>(prompter: &P, pipeline: &TiffToPngPipeline<R, W>) -> SessionOutcome
where
    P: Prompter,
    R: TiffImageReader,
    W: PngWriter,
{
    let Some(input) = prompter.pick_input_file() else {
        info!("No input file selected");
        return SessionOutcome::Cancelled;
    };

    let suggested = default_output_path(&input);
    let output = prompter.pick_output_file(&suggested).unwrap_or(suggested);

    match pipeline.convert_file(&input, Some(&output)) {
        Ok(written) => {
            prompter.notify(
                Notice::Info,
                "Conversion complete",
                &format!("Saved {}", written.display()),
            );
            SessionOutcome::Converted(written)
        }
        Err(e) => {
            let message = format!("Could not convert {}: {}", input.display(), e);
            prompter.notify(Notice::Error, "Conversion failed", &message);
            SessionOutcome::Failed(message)
        }
    }
}

fn convert_directory<P, R, W>(prompter: &P, pipeline: &TiffToPngPipeline<R, W>) -> SessionOutcome
where
    P: Prompter,
    R: TiffImageReader,
    W: PngWriter,
{
    let Some(input_dir) = prompter.pick_input_directory() else {
        info!("No input directory selected");
        return SessionOutcome::Cancelled;
    };
    let output_dir = prompter.pick_output_directory();

    let report = match process_directory(pipeline, &input_dir, output_dir.as_deref()) {
        Ok(report) => report,
        Err(e) => {
            error!("Directory conversion failed: {}", e);
            let message = format!("Could not process {}: {}", input_dir.display(), e);
            prompter.notify(Notice::Error, "Conversion failed", &message);
            return SessionOutcome::Failed(message);
        }
    };

    if report.is_empty() {
        warn!("Nothing to convert in {}", input_dir.display());
        prompter.notify(
            Notice::Warning,
            "No TIFF files",
            &format!("No TIFF files found in {}", input_dir.display()),
        );
    } else if report.failed.is_empty() {
        prompter.notify(
            Notice::Info,
            "Conversion complete",
            &format!("Converted {} file(s)", report.converted.len()),
        );
    } else {
        let failed: Vec<String> = report
            .failed
            .iter()
            .map(|f| format!("{}: {}", f.input.display(), f.error))
            .collect();
        prompter.notify(
            Notice::Warning,
            "Conversion finished with errors",
            &format!(
                "Converted {} file(s), {} failed:\n{}",
                report.converted.len(),
                report.failed.len(),
                failed.join("\n")
            ),
        );
    }

    SessionOutcome::Batch(report)
}
