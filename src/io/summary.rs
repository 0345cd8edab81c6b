//! Machine-readable run summary (JSON).

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ClassifyConfig, Thresholds};
use crate::error::AppError;
use crate::io::atomic::write_atomically;
use crate::report::RunSummary;

/// On-disk schema of `--summary-json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryFile {
    pub tool: String,
    pub version: String,
    pub generated_at: DateTime<Utc>,
    pub input: String,
    pub output: String,
    pub thresholds: Thresholds,
    pub summary: RunSummary,
}

impl SummaryFile {
    pub fn new(summary: &RunSummary, config: &ClassifyConfig) -> Self {
        Self {
            tool: "reclass".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now(),
            input: config.input.display().to_string(),
            output: config.output.display().to_string(),
            thresholds: config.thresholds,
            summary: summary.clone(),
        }
    }
}

/// Write the run summary JSON (atomic).
pub fn write_summary_json(path: &Path, summary: &RunSummary, config: &ClassifyConfig) -> Result<(), AppError> {
    let file = SummaryFile::new(summary, config);
    write_atomically(path, |out| {
        serde_json::to_writer_pretty(&mut *out, &file)
            .map_err(|e| AppError::output(format!("Failed to write summary JSON: {e}")))?;
        out.write_all(b"\n")
            .map_err(|e| AppError::output(format!("Failed to write summary JSON: {e}")))
    })?;
    tracing::info!(path = %path.display(), "wrote run summary");
    Ok(())
}

/// Read a summary JSON written by `write_summary_json`.
pub fn read_summary_json(path: &Path) -> Result<SummaryFile, AppError> {
    let file = std::fs::File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open summary JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::input(format!("Invalid summary JSON: {e}")))
}
