//! CSV output.

use std::path::{Path, PathBuf};

use scout_core::ProductRecord;

use crate::error::SinkError;

/// Writes `records` to `path` as CSV and returns the path written.
///
/// The header row is always written, so an empty run still produces a file
/// with the expected columns.
///
/// # Errors
///
/// Returns [`SinkError`] if the file cannot be created or written.
pub fn write_csv(records: &[ProductRecord], path: &Path) -> Result<PathBuf, SinkError> {
    let shown = path.display().to_string();
    let csv_err = |source: csv::Error| SinkError::Csv {
        path: shown.clone(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_err)?;

    writer
        .write_record(ProductRecord::CSV_HEADER)
        .map_err(csv_err)?;
    for record in records {
        writer.serialize(record).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| SinkError::Io {
        path: shown.clone(),
        source,
    })?;

    tracing::info!(path = %shown, rows = records.len(), "wrote CSV");
    Ok(path.to_path_buf())
}
