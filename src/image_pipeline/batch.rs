//! Directory batch conversion module
//!
//! Scans a directory for TIFF files and runs each one through the pipeline,
//! carrying on past individual failures.

mod report;
mod walker;

pub use report::{BatchReport, FailedConversion};
pub use walker::{collect_tiff_files, process_directory};
