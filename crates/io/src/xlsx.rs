// Excel import (xlsx, xlsm, xlsb, xls, ods) via calamine
//
// One-way conversion: the first worksheet becomes a RawTable. Date cells
// are rendered as %Y-%m-%d so the normalizer sees the same ISO form the
// CSV path produces.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;
use saldo_pipeline::model::RawTable;

pub fn import_from_bytes(bytes: &[u8]) -> Result<RawTable, String> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor).map_err(|e| e.to_string())?;

    let sheet_names = workbook.sheet_names().to_owned();
    let first = sheet_names
        .first()
        .ok_or_else(|| "workbook has no sheets".to_string())?;
    let range = workbook.worksheet_range(first).map_err(|e| e.to_string())?;

    let mut rows_iter = range.rows();
    let headers = match rows_iter.next() {
        Some(row) => row
            .iter()
            .map(|cell| cell_to_string(cell).trim().to_string())
            .collect(),
        None => Vec::new(),
    };

    let rows = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(n) => {
            // Whole floats print without the trailing ".0" Excel never shows
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{n}")
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => serial_to_date_string(dt.as_f64()),
        Data::DateTimeIso(s) => s.chars().take(10).collect(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
    }
}

/// Excel serial → calendar date string. The epoch constant absorbs the
/// phantom 1900-02-29 of the 1900 date system, the same assumption the
/// rest of the importer makes. Out-of-range serials render empty, which
/// the normalizer then drops as an unparseable date.
fn serial_to_date_string(serial: f64) -> String {
    let days = serial.floor() as i64;
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .zip(chrono::Duration::try_days(days))
        .and_then(|(base, offset)| base.checked_add_signed(offset))
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
