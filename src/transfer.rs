// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Entry, EntryInput};
use crate::validate::{is_valid_date, parse_amount};
use csv::ReaderBuilder;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

const BOM: char = '\u{feff}';
const HEADER: &str = "id,date,income,incomeNote,expense,expenseNote,total";

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("unrecognized header '{0}': need a date column and an income or expense column")]
    UnrecognizedHeader(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Parsed import document: candidates ready for bulk insertion, plus enough
/// bookkeeping to tell "no data rows" apart from "rows present, none valid".
#[derive(Debug, Default)]
pub struct CsvImport {
    pub candidates: Vec<EntryInput>,
    pub data_rows: usize,
    pub skipped: usize,
}

/// Serializes the ledger in insertion order. The format is fixed: UTF-8 with
/// a BOM for spreadsheet tools, CRLF line endings, text fields quote-wrapped
/// with doubled-quote escaping, numeric fields bare.
pub fn export_csv(entries: &[Entry]) -> String {
    let mut out = String::new();
    out.push(BOM);
    out.push_str(HEADER);
    out.push_str("\r\n");
    for e in entries {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\r\n",
            e.id,
            quote(&e.date),
            e.income,
            quote(&e.income_note),
            e.expense,
            quote(&e.expense_note),
            e.total,
        ));
    }
    out
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Parses an externally supplied delimited document into insertion
/// candidates. Column positions are resolved from the header by
/// case-insensitive name (underscored aliases accepted); rows failing the
/// admission checks are skipped and counted, never fatal. Any id/total
/// columns are ignored: the store reassigns ids and recomputes totals.
pub fn parse_csv(raw: &str) -> Result<CsvImport, TransferError> {
    let text = raw.strip_prefix(BOM).unwrap_or(raw);
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());
    let columns = resolve_columns(&rdr.headers()?.clone())?;

    let mut import = CsvImport::default();
    for record in rdr.records() {
        import.data_rows += 1;
        let record = match record {
            Ok(r) => r,
            Err(err) => {
                warn!("skipping unreadable row {}: {err}", import.data_rows);
                import.skipped += 1;
                continue;
            }
        };
        let field =
            |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("").trim();

        let candidate = EntryInput {
            date: field(columns.date).to_string(),
            income: parse_amount(field(columns.income)),
            income_note: field(columns.income_note).to_string(),
            expense: parse_amount(field(columns.expense)),
            expense_note: field(columns.expense_note).to_string(),
        };
        if !is_valid_date(&candidate.date) {
            warn!("skipping row {}: invalid date '{}'", import.data_rows, candidate.date);
            import.skipped += 1;
            continue;
        }
        if candidate.income < Decimal::ZERO || candidate.expense < Decimal::ZERO {
            warn!("skipping row {}: negative amount", import.data_rows);
            import.skipped += 1;
            continue;
        }
        if candidate.income.is_zero() && candidate.expense.is_zero() {
            warn!("skipping row {}: both amounts zero", import.data_rows);
            import.skipped += 1;
            continue;
        }
        import.candidates.push(candidate);
    }
    Ok(import)
}

#[derive(Debug, Default)]
struct Columns {
    date: Option<usize>,
    income: Option<usize>,
    income_note: Option<usize>,
    expense: Option<usize>,
    expense_note: Option<usize>,
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<Columns, TransferError> {
    let mut columns = Columns::default();
    for (i, name) in headers.iter().enumerate() {
        let slot = match name.trim().to_ascii_lowercase().as_str() {
            "date" => &mut columns.date,
            "income" => &mut columns.income,
            "incomenote" | "income_note" => &mut columns.income_note,
            "expense" => &mut columns.expense,
            "expensenote" | "expense_note" => &mut columns.expense_note,
            _ => continue,
        };
        // first occurrence wins
        slot.get_or_insert(i);
    }
    if columns.date.is_none() || (columns.income.is_none() && columns.expense.is_none()) {
        let joined = headers.iter().collect::<Vec<_>>().join(",");
        return Err(TransferError::UnrecognizedHeader(joined));
    }
    Ok(columns)
}
