// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Entry, EntryInput};
use crate::storage::{self, BlobStore, LEDGER_KEY, SEED_KEY};
use crate::validate;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid date '{0}', expected DD/MM/YYYY")]
    InvalidDate(String),
    #[error("at least one of income or expense must be greater than zero")]
    EmptyAmounts,
    #[error("amounts cannot be negative")]
    NegativeAmount,
    #[error("a note is required when the {0} amount is set")]
    MissingNote(&'static str),
    #[error("no entry with id {0}")]
    NotFound(i64),
}

/// Sole owner of the ledger collection. Every mutation recomputes the derived
/// `total` and persists before the next command is accepted; a failed write
/// degrades to a warning while the in-memory ledger stays authoritative.
pub struct LedgerStore<S: BlobStore> {
    backend: S,
    entries: Vec<Entry>,
    last_id: i64,
}

impl<S: BlobStore> LedgerStore<S> {
    /// Loads the stored snapshot (or the seed document on first run) before
    /// returning, so the store is queryable from the moment it exists.
    pub fn open(backend: S) -> Self {
        let mut store = LedgerStore {
            backend,
            entries: Vec::new(),
            last_id: 0,
        };
        store.load();
        store
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn add(&mut self, input: &EntryInput) -> Result<Entry, LedgerError> {
        validate_input(input)?;
        let entry = self.admit(input);
        self.persist();
        Ok(entry)
    }

    pub fn update(&mut self, id: i64, input: &EntryInput) -> Result<Entry, LedgerError> {
        validate_input(input)?;
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        entry.date = input.date.trim().to_string();
        entry.income = input.income;
        entry.income_note = input.income_note.trim().to_string();
        entry.expense = input.expense;
        entry.expense_note = input.expense_note.trim().to_string();
        entry.recompute_total();
        let updated = entry.clone();
        self.persist();
        Ok(updated)
    }

    /// Removes the entry if present. A missing id is a no-op, not an error.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() < before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Appends a batch of already-parsed candidates, dropping any that fail
    /// the admission checks. Returns how many were inserted.
    pub fn bulk_insert(&mut self, batch: &[EntryInput]) -> usize {
        let mut inserted = 0;
        for input in batch {
            if let Err(err) = check_candidate(input) {
                warn!("skipping entry dated '{}': {err}", input.date);
                continue;
            }
            self.admit(input);
            inserted += 1;
        }
        if inserted > 0 {
            self.persist();
        }
        inserted
    }

    /// Replaces the in-memory ledger with the stored snapshot. A corrupt
    /// snapshot resets to an empty ledger; no snapshot at all falls back to
    /// one best-effort read of the seed document.
    pub fn load(&mut self) {
        self.entries.clear();
        self.last_id = 0;
        let text = match self.backend.read(LEDGER_KEY) {
            Ok(Some(text)) => Some(text),
            Ok(None) => match self.backend.read(SEED_KEY) {
                Ok(text) => text,
                Err(err) => {
                    warn!("seed document unreadable, starting empty: {err:#}");
                    None
                }
            },
            Err(err) => {
                warn!("stored ledger unreadable, starting empty: {err:#}");
                None
            }
        };
        let Some(text) = text else {
            return;
        };
        match storage::decode_snapshot(&text) {
            Ok(entries) => {
                let mut seen: HashSet<i64> = HashSet::new();
                for mut entry in entries {
                    if entry.id <= 0 || seen.contains(&entry.id) {
                        entry.id = seen.iter().copied().max().unwrap_or(0) + 1;
                    }
                    seen.insert(entry.id);
                    self.entries.push(entry);
                }
                self.last_id = seen.into_iter().max().unwrap_or(0);
                debug!("loaded {} entries", self.entries.len());
            }
            Err(err) => {
                warn!("stored ledger is corrupt, starting empty: {err}");
            }
        }
    }

    /// Serializes the full ledger to the backend.
    pub fn save(&mut self) -> anyhow::Result<()> {
        let blob = storage::encode_snapshot(&self.entries)?;
        self.backend.write(LEDGER_KEY, &blob)
    }

    fn admit(&mut self, input: &EntryInput) -> Entry {
        let mut entry = Entry {
            id: self.next_id(),
            date: input.date.trim().to_string(),
            income: input.income,
            income_note: input.income_note.trim().to_string(),
            expense: input.expense,
            expense_note: input.expense_note.trim().to_string(),
            total: Decimal::ZERO,
        };
        entry.recompute_total();
        self.entries.push(entry.clone());
        entry
    }

    /// Millisecond clock, bumped by one whenever two ids would collide within
    /// the same instant (bulk imports, loaded snapshots with small ids).
    fn next_id(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last_id = if now > self.last_id {
            now
        } else {
            self.last_id + 1
        };
        self.last_id
    }

    fn persist(&mut self) {
        if let Err(err) = self.save() {
            warn!("ledger not persisted, in-memory state kept: {err:#}");
        }
    }
}

/// Full admission rule set for interactive create/edit. Edits go through the
/// same checks as creates; the note requirement follows whichever amount is
/// positive.
fn validate_input(input: &EntryInput) -> Result<(), LedgerError> {
    let date = input.date.trim();
    if !validate::is_valid_date(date) {
        return Err(LedgerError::InvalidDate(date.to_string()));
    }
    if input.income < Decimal::ZERO || input.expense < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount);
    }
    if input.income.is_zero() && input.expense.is_zero() {
        return Err(LedgerError::EmptyAmounts);
    }
    if input.income > Decimal::ZERO && input.income_note.trim().is_empty() {
        return Err(LedgerError::MissingNote("income"));
    }
    if input.expense > Decimal::ZERO && input.expense_note.trim().is_empty() {
        return Err(LedgerError::MissingNote("expense"));
    }
    Ok(())
}

/// Reduced checks for bulk admission: valid date, non-negative amounts, not
/// both zero. Notes are not required on imported rows.
fn check_candidate(input: &EntryInput) -> Result<(), LedgerError> {
    let date = input.date.trim();
    if !validate::is_valid_date(date) {
        return Err(LedgerError::InvalidDate(date.to_string()));
    }
    if input.income < Decimal::ZERO || input.expense < Decimal::ZERO {
        return Err(LedgerError::NegativeAmount);
    }
    if input.income.is_zero() && input.expense.is_zero() {
        return Err(LedgerError::EmptyAmounts);
    }
    Ok(())
}
