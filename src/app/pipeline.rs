//! Shared "classify pipeline" logic.
//!
//! ingest -> classify (parallel, order preserving) -> change flags -> summary
//!
//! Writing the outputs is left to the caller so the pipeline can be run and
//! inspected without touching the filesystem.

use rayon::prelude::*;

use crate::domain::{Classified, ClassifyConfig, ContractRow, Label, Thresholds};
use crate::error::AppError;
use crate::io::ingest::{IngestedData, load_contracts};
use crate::report::{RunSummary, summarize};
use crate::rules::classify;

/// All computed outputs of a single `reclass classify` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub headers: Vec<String>,
    pub rows: Vec<Classified>,
    pub summary: RunSummary,
}

/// Load the input named by `config` and classify it.
pub fn run_classify(config: &ClassifyConfig) -> Result<RunOutput, AppError> {
    let ingest = load_contracts(&config.input, config.delimiter, &config.id_column)?;
    tracing::info!(
        rows = ingest.rows.len(),
        has_original = ingest.has_original,
        has_id = ingest.has_id,
        "loaded contracts"
    );
    Ok(classify_ingested(ingest, &config.thresholds))
}

/// Classify already-ingested data.
pub fn classify_ingested(ingest: IngestedData, thresholds: &Thresholds) -> RunOutput {
    let rows = classify_rows(ingest.rows, thresholds);
    let summary = summarize(&rows, ingest.has_original);
    tracing::info!(
        investment = summary.label_count(Label::Investment),
        cost = summary.label_count(Label::Cost),
        changed = summary.changed,
        "classification complete"
    );
    RunOutput {
        headers: ingest.headers,
        rows,
        summary,
    }
}

/// Classify every row. Output order equals input order.
pub fn classify_rows(rows: Vec<ContractRow>, thresholds: &Thresholds) -> Vec<Classified> {
    rows.into_par_iter()
        .map(|row| {
            let decision = classify(&row.record, thresholds);
            let changed = is_changed(row.original.as_deref(), decision.label);
            Classified { row, decision, changed }
        })
        .collect()
}

/// `false` when there is no upstream label column; otherwise whether the
/// upstream cell differs from `corrected`. A blank or unrecognized upstream
/// cell counts as different.
pub fn is_changed(original: Option<&str>, corrected: Label) -> bool {
    match original {
        None => false,
        Some(raw) => Label::parse(raw) != Some(corrected),
    }
}
