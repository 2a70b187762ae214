//! Session log reports.
//!
//! Both exporters are suppressed on an empty log: they return `Ok(None)`
//! and touch nothing on disk.

mod csv_export;
mod pdf_report;

pub use csv_export::{export_csv, write_csv, CsvRow};
pub use pdf_report::{export_pdf, render_pdf};

use std::path::Path;

use crate::error::ExportError;

/// Write `bytes` to `path`, mapping failures to [`ExportError::WriteFailed`].
fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, bytes).map_err(|source| ExportError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}
