//! All-or-nothing file output.
//!
//! Content is written to a temporary file in the destination directory and
//! renamed over the target only after a successful flush + fsync. A failed
//! run leaves no partial file behind (the temp file is removed on drop).

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::AppError;

/// Write `path` atomically using `write`.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<(), AppError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), AppError>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
        AppError::output(format!("Failed to create temp file in '{}': {e}", dir.display()))
    })?;

    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write(&mut out)?;
        out.flush()
            .map_err(|e| AppError::output(format!("Failed to flush '{}': {e}", path.display())))?;
    }

    tmp.as_file()
        .sync_all()
        .map_err(|e| AppError::output(format!("Failed to sync '{}': {e}", path.display())))?;

    tmp.persist(path)
        .map_err(|e| AppError::output(format!("Failed to finalize '{}': {}", path.display(), e.error)))?;

    tracing::debug!(path = %path.display(), "output finalized");
    Ok(())
}
