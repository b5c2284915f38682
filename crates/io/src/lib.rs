//! `saldo-io` — tabular file loading (CSV/TSV and Excel).
//!
//! Everything lands in a `RawTable`: headers plus string cells. Typing
//! and cleaning happen downstream in the pipeline's normalizer.

pub mod csv;
pub mod xlsx;

use std::path::Path;

use saldo_pipeline::model::RawTable;

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Load a tabular file, dispatching on extension. Anything that is not
/// an Excel workbook is treated as delimited text.
pub fn load_table(path: &Path) -> Result<RawTable, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    load_table_from_bytes(&bytes, path)
}

/// Parse already-read bytes. The caller keeps the bytes for content
/// hashing, so each file is read exactly once.
pub fn load_table_from_bytes(bytes: &[u8], path: &Path) -> Result<RawTable, String> {
    if is_excel(path) {
        xlsx::import_from_bytes(bytes)
    } else {
        csv::import_from_bytes(bytes)
    }
}

fn is_excel(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let lower = e.to_ascii_lowercase();
            EXCEL_EXTENSIONS.iter().any(|x| *x == lower)
        })
        .unwrap_or(false)
}
