// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Entry, Kind};
use crate::validate::date_parts;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Reverse;

/// Filter/sort/group specification for one read of the ledger. The default
/// spec is the unfiltered, ungrouped view.
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    pub search: Option<String>,
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub kind: Kind,
    pub group_by_month: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// One YYYY-MM partition of the sorted rows, carrying its own subtotals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGroup {
    pub month: String,
    pub rows: Vec<Entry>,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerView {
    pub rows: Vec<Entry>,
    pub totals: Totals,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<MonthGroup>>,
}

/// Runs the pipeline text filter -> date-component filter -> kind filter ->
/// sort -> optional grouping over a read-only snapshot of the ledger. Totals
/// are computed over the filtered rows, never the full ledger.
pub fn query(entries: &[Entry], spec: &QuerySpec) -> LedgerView {
    let needle = spec
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut rows: Vec<Entry> = entries
        .iter()
        .filter(|e| match &needle {
            Some(n) => {
                e.income_note.to_lowercase().contains(n)
                    || e.expense_note.to_lowercase().contains(n)
            }
            None => true,
        })
        .filter(|e| matches_date_components(e, spec))
        .filter(|e| match spec.kind {
            Kind::All => true,
            Kind::IncomeOnly => e.income > Decimal::ZERO,
            Kind::ExpenseOnly => e.expense > Decimal::ZERO,
        })
        .cloned()
        .collect();

    // Date descending, most recently created first on ties. Unparseable
    // dates share the lowest key and still tie-break by id.
    rows.sort_by_key(|e| (Reverse(sort_key(&e.date)), Reverse(e.id)));

    let totals = totals_of(&rows);
    let groups = spec.group_by_month.then(|| group_rows(&rows));
    LedgerView {
        rows,
        totals,
        groups,
    }
}

fn matches_date_components(entry: &Entry, spec: &QuerySpec) -> bool {
    if spec.day.is_none() && spec.month.is_none() && spec.year.is_none() {
        return true;
    }
    let Some((y, m, d)) = date_parts(&entry.date) else {
        return false;
    };
    spec.day.is_none_or(|v| v == d)
        && spec.month.is_none_or(|v| v == m)
        && spec.year.is_none_or(|v| v == y)
}

fn sort_key(date: &str) -> String {
    match date_parts(date) {
        Some((y, m, d)) => format!("{y:04}{m:02}{d:02}"),
        None => "00000000".to_string(),
    }
}

fn month_key(date: &str) -> String {
    match date_parts(date) {
        Some((y, m, _)) => format!("{y:04}-{m:02}"),
        None => "0000-00".to_string(),
    }
}

fn totals_of(rows: &[Entry]) -> Totals {
    let income: Decimal = rows.iter().map(|e| e.income).sum();
    let expense: Decimal = rows.iter().map(|e| e.expense).sum();
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Partitions already-sorted rows by month. Rows arrive date-descending, so
/// walking them yields the groups in descending key order with row order
/// preserved inside each group.
fn group_rows(rows: &[Entry]) -> Vec<MonthGroup> {
    let mut groups: Vec<MonthGroup> = Vec::new();
    for row in rows {
        let key = month_key(&row.date);
        match groups.last_mut() {
            Some(g) if g.month == key => {
                g.income += row.income;
                g.expense += row.expense;
                g.rows.push(row.clone());
            }
            _ => groups.push(MonthGroup {
                month: key,
                income: row.income,
                expense: row.expense,
                rows: vec![row.clone()],
            }),
        }
    }
    groups
}
