use std::path::PathBuf;

/// An input that could not be converted, with the reason
#[derive(Debug, Clone)]
pub struct FailedConversion {
    pub input: PathBuf,
    pub error: String,
}

/// Outcome of converting a directory
#[derive(Debug, Default)]
pub struct BatchReport {
    /// PNG files written, in processing order
    pub converted: Vec<PathBuf>,
    /// Inputs that failed, in processing order
    pub failed: Vec<FailedConversion>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, output: PathBuf) {
        self.converted.push(output);
    }

    pub fn record_failure(&mut self, input: PathBuf, error: impl ToString) {
        self.failed.push(FailedConversion {
            input,
            error: error.to_string(),
        });
    }

    /// Number of matching TIFF files that were found.
    pub fn found(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found() == 0
    }
}
