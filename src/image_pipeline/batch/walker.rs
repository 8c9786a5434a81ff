use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::image_pipeline::batch::report::BatchReport;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::conversions::TiffToPngPipeline;
use crate::image_pipeline::png::PngWriter;
use crate::image_pipeline::tiff::{TIFF_EXTENSIONS, TiffImageReader};

/// Lists the TIFF files directly inside `dir`.
///
/// Every `*.tif` file comes first, then every `*.tiff` file; each group is
/// sorted by file name. Extensions match case-sensitively and subdirectories
/// are not descended into.
pub fn collect_tiff_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        ConversionError::InputReadError(format!("{}: {}", dir.display(), e))
    })?;

    let mut groups: Vec<Vec<PathBuf>> = vec![Vec::new(); TIFF_EXTENSIONS.len()];
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            continue;
        };
        if let Some(group) = TIFF_EXTENSIONS.iter().position(|&known| known == ext) {
            groups[group].push(path);
        }
    }

    let mut files = Vec::new();
    for mut group in groups {
        group.sort();
        files.extend(group);
    }

    debug!("Found {} TIFF files in {}", files.len(), dir.display());
    Ok(files)
}

/// Converts every TIFF file in `input_dir`.
///
/// With `output_dir`, each PNG is written as `<output_dir>/<stem>.png` and the
/// directory is created first if needed. Without it, each PNG lands next to its
/// input. A file that fails is logged and recorded in the report; the rest
/// still run.
#[instrument(skip(pipeline, input_dir, output_dir), fields(dir = %input_dir.display()))]
pub fn process_directory<R: TiffImageReader, W: PngWriter>(
    pipeline: &TiffToPngPipeline<R, W>,
    input_dir: &Path,
    output_dir: Option<&Path>,
) -> Result<BatchReport> {
    if let Some(output_dir) = output_dir {
        std::fs::create_dir_all(output_dir).map_err(|e| {
            ConversionError::OutputWriteError(format!("{}: {}", output_dir.display(), e))
        })?;
    }

    let tiff_files = collect_tiff_files(input_dir)?;
    let mut report = BatchReport::new();

    if tiff_files.is_empty() {
        warn!("No TIFF files found in {}", input_dir.display());
        return Ok(report);
    }

    for tiff_file in tiff_files {
        let output_file = output_dir.map(|dir| {
            let mut name = tiff_file.file_stem().unwrap_or_default().to_os_string();
            name.push(".png");
            dir.join(name)
        });

        match pipeline.convert_file(&tiff_file, output_file.as_deref()) {
            Ok(written) => report.record_success(written),
            Err(e) => {
                error!("Failed to convert {}: {}", tiff_file.display(), e);
                report.record_failure(tiff_file, e);
            }
        }
    }

    info!(
        converted = report.converted.len(),
        failed = report.failed.len(),
        "Finished converting {}",
        input_dir.display()
    );

    Ok(report)
}
