// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One financial movement: a dated income/expense pair with free-text details.
///
/// `total` is derived from `income - expense` and recomputed on every write;
/// the stored value is never trusted across a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: i64,
    /// Calendar date as DD/MM/YYYY text.
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    pub income_note: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    pub expense_note: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl Entry {
    pub fn recompute_total(&mut self) {
        self.total = self.income - self.expense;
    }
}

/// Fields of an entry before the store has admitted it and assigned an id.
#[derive(Debug, Clone, Default)]
pub struct EntryInput {
    pub date: String,
    pub income: Decimal,
    pub income_note: String,
    pub expense: Decimal,
    pub expense_note: String,
}

/// Which side of the ledger a view is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kind {
    #[default]
    All,
    IncomeOnly,
    ExpenseOnly,
}
