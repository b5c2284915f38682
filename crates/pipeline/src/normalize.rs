use chrono::NaiveDate;

use crate::config::ColumnMapping;
use crate::error::PipelineError;
use crate::model::{NormalizeStats, RawTable, Transaction};

/// Formats tried in order. The plain ISO form comes first because both
/// the CSV path and the Excel path emit it.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%Y-%m-%d %H:%M:%S", "%d/%m/%Y"];

/// Parse a raw table into typed transactions.
///
/// A mapped header missing from the table is a hard error. Value-level
/// problems are cleaning defaults: a row whose date cell does not parse
/// is dropped and counted; an amount cell that does not parse becomes
/// zero and the row stays.
pub fn normalize_table(
    side: &str,
    table: &RawTable,
    columns: &ColumnMapping,
) -> Result<(Vec<Transaction>, NormalizeStats), PipelineError> {
    let idx = |column: &str| -> Result<usize, PipelineError> {
        table
            .column_index(column)
            .ok_or_else(|| PipelineError::MissingColumn {
                side: side.into(),
                column: column.into(),
            })
    };

    let date_idx = idx(&columns.date)?;
    let client_idx = idx(&columns.client)?;
    let product_idx = idx(&columns.product)?;
    let qty_idx = idx(&columns.qty)?;
    let amount_idx = idx(&columns.amount)?;

    let mut transactions = Vec::with_capacity(table.rows.len());
    let mut stats = NormalizeStats::default();

    for row in &table.rows {
        stats.rows_read += 1;
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("");

        let Some(date) = parse_date(cell(date_idx)) else {
            stats.rows_dropped_bad_date += 1;
            continue;
        };

        let amount_minor = match parse_amount_minor(cell(amount_idx)) {
            Some(minor) => minor,
            None => {
                stats.amounts_zeroed += 1;
                0
            }
        };

        transactions.push(Transaction {
            date,
            client: cell(client_idx).trim().to_string(),
            product: cell(product_idx).trim().to_string(),
            qty: parse_qty(cell(qty_idx)),
            amount_minor,
        });
    }

    Ok((transactions, stats))
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Lenient decimal parse into minor units (hundredths).
///
/// Accepts "1234", "1234.5", "1 234,56", "-17.25". Space and NBSP group
/// separators are stripped; a lone comma is taken as the decimal mark,
/// commas next to a dot as group separators. Fraction digits beyond the
/// second are truncated. Returns None when nothing numeric remains.
pub fn parse_amount_minor(value: &str) -> Option<i64> {
    let mut s: String = value
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .collect();
    if s.is_empty() {
        return None;
    }

    if s.contains('.') {
        s.retain(|c| c != ',');
    } else if s.matches(',').count() == 1 {
        s = s.replace(',', ".");
    } else {
        s.retain(|c| c != ',');
    }

    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(&s)),
    };

    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, f),
        None => (body, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.chars().all(|c| c.is_ascii_digit())
        || !frac_part.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let int_minor: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse::<i64>().ok()?.checked_mul(100)?
    };

    let mut frac = String::from(frac_part);
    frac.truncate(2);
    while frac.len() < 2 {
        frac.push('0');
    }
    let frac_minor: i64 = frac.parse().ok()?;

    let magnitude = int_minor.checked_add(frac_minor)?;
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_qty(value: &str) -> Option<i64> {
    parse_amount_minor(value).map(|minor| minor / 100)
}
