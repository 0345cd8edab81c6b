//! Export the reclassified contract table.
//!
//! The output keeps every input column in order and adds
//! `cd_finalidade_corrected` and `changed`. If the input already has those
//! columns (e.g. a re-run on a previous output) they are overwritten in place.

use std::io::Write;
use std::path::Path;

use crate::domain::{COL_CHANGED, COL_CORRECTED_LABEL, Classified};
use crate::error::AppError;
use crate::io::atomic::write_atomically;

/// Write the reclassified table to `path` (atomic).
pub fn write_reclassified_csv(
    path: &Path,
    headers: &[String],
    rows: &[Classified],
    delimiter: u8,
) -> Result<(), AppError> {
    write_atomically(path, |out| write_reclassified(out, headers, rows, delimiter))?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote reclassified contracts");
    Ok(())
}

/// Write the reclassified table to any writer.
pub fn write_reclassified(
    out: &mut dyn Write,
    headers: &[String],
    rows: &[Classified],
    delimiter: u8,
) -> Result<(), AppError> {
    let mut header = headers.to_vec();
    let label_idx = column_slot(&mut header, COL_CORRECTED_LABEL);
    let changed_idx = column_slot(&mut header, COL_CHANGED);

    let mut writer = csv::WriterBuilder::new().delimiter(delimiter).from_writer(out);

    writer
        .write_record(&header)
        .map_err(|e| AppError::output(format!("Failed to write export CSV header: {e}")))?;

    for c in rows {
        let mut cells = c.row.cells.clone();
        cells.resize(header.len(), String::new());
        cells[label_idx] = c.decision.label.code().to_string();
        cells[changed_idx] = c.changed.to_string();

        writer
            .write_record(&cells)
            .map_err(|e| AppError::output(format!("Failed to write export CSV row (line {}): {e}", c.row.line)))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::output(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Index of `name` in `header`, appending it when absent.
fn column_slot(header: &mut Vec<String>, name: &str) -> usize {
    if let Some(idx) = header.iter().position(|h| h.trim().eq_ignore_ascii_case(name)) {
        return idx;
    }
    header.push(name.to_string());
    header.len() - 1
}
