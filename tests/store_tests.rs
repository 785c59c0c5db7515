// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashbook::models::EntryInput;
use cashbook::storage::{FileStore, MemoryStore, SEED_KEY};
use cashbook::store::{LedgerError, LedgerStore};
use rust_decimal::Decimal;
use std::fs;
use tempfile::tempdir;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn salary(date: &str, amount: &str) -> EntryInput {
    EntryInput {
        date: date.to_string(),
        income: dec(amount),
        income_note: "salary".to_string(),
        ..Default::default()
    }
}

fn groceries(date: &str, amount: &str) -> EntryInput {
    EntryInput {
        date: date.to_string(),
        expense: dec(amount),
        expense_note: "groceries".to_string(),
        ..Default::default()
    }
}

#[test]
fn add_computes_total_and_assigns_unique_ids() {
    let mut store = LedgerStore::open(MemoryStore::default());
    let a = store.add(&salary("10/05/2024", "500000")).unwrap();
    let b = store.add(&groceries("11/05/2024", "1200.50")).unwrap();

    assert_eq!(a.total, dec("500000"));
    assert_eq!(b.total, dec("-1200.50"));
    assert!(b.id > a.id);
    assert_eq!(store.len(), 2);
}

#[test]
fn add_rejects_empty_amounts() {
    let mut store = LedgerStore::open(MemoryStore::default());
    let input = EntryInput {
        date: "10/05/2024".to_string(),
        ..Default::default()
    };
    assert_eq!(store.add(&input).unwrap_err(), LedgerError::EmptyAmounts);
    assert!(store.is_empty());
}

#[test]
fn add_rejects_invalid_date() {
    let mut store = LedgerStore::open(MemoryStore::default());
    let err = store.add(&salary("32/01/2024", "100")).unwrap_err();
    assert_eq!(err, LedgerError::InvalidDate("32/01/2024".to_string()));
}

#[test]
fn add_requires_note_for_positive_amount() {
    let mut store = LedgerStore::open(MemoryStore::default());
    let input = EntryInput {
        date: "10/05/2024".to_string(),
        income: dec("100"),
        income_note: "  ".to_string(),
        ..Default::default()
    };
    assert_eq!(store.add(&input).unwrap_err(), LedgerError::MissingNote("income"));

    let input = EntryInput {
        date: "10/05/2024".to_string(),
        expense: dec("100"),
        ..Default::default()
    };
    assert_eq!(
        store.add(&input).unwrap_err(),
        LedgerError::MissingNote("expense")
    );
}

#[test]
fn add_rejects_negative_amounts() {
    let mut store = LedgerStore::open(MemoryStore::default());
    let input = EntryInput {
        date: "10/05/2024".to_string(),
        income: dec("-5"),
        income_note: "odd".to_string(),
        ..Default::default()
    };
    assert_eq!(store.add(&input).unwrap_err(), LedgerError::NegativeAmount);
}

#[test]
fn update_overwrites_and_recomputes_total() {
    let mut store = LedgerStore::open(MemoryStore::default());
    let entry = store.add(&salary("10/05/2024", "500")).unwrap();

    let updated = store
        .update(
            entry.id,
            &EntryInput {
                date: "11/05/2024".to_string(),
                income: dec("500"),
                income_note: "salary".to_string(),
                expense: dec("120"),
                expense_note: "rent".to_string(),
            },
        )
        .unwrap();
    assert_eq!(updated.id, entry.id);
    assert_eq!(updated.date, "11/05/2024");
    assert_eq!(updated.total, dec("380"));
    assert_eq!(store.len(), 1);
}

#[test]
fn update_applies_the_same_validation_as_add() {
    let mut store = LedgerStore::open(MemoryStore::default());
    let entry = store.add(&salary("10/05/2024", "500")).unwrap();

    let zeroed = EntryInput {
        date: "10/05/2024".to_string(),
        ..Default::default()
    };
    assert_eq!(
        store.update(entry.id, &zeroed).unwrap_err(),
        LedgerError::EmptyAmounts
    );

    let bad_date = salary("31/04/2020", "500");
    assert_eq!(
        store.update(entry.id, &bad_date).unwrap_err(),
        LedgerError::InvalidDate("31/04/2020".to_string())
    );
    // rejected updates leave the entry untouched
    assert_eq!(store.entries()[0].date, "10/05/2024");
}

#[test]
fn update_missing_id_is_not_found() {
    let mut store = LedgerStore::open(MemoryStore::default());
    assert_eq!(
        store.update(42, &salary("10/05/2024", "1")).unwrap_err(),
        LedgerError::NotFound(42)
    );
}

#[test]
fn remove_is_a_noop_for_missing_ids() {
    let mut store = LedgerStore::open(MemoryStore::default());
    let entry = store.add(&salary("10/05/2024", "500")).unwrap();
    assert!(store.remove(entry.id));
    assert!(!store.remove(entry.id));
    assert!(store.is_empty());
}

#[test]
fn bulk_insert_drops_invalid_candidates() {
    let mut store = LedgerStore::open(MemoryStore::default());
    let batch = vec![
        salary("10/05/2024", "100"),
        salary("31/04/2024", "100"), // April has 30 days
        EntryInput {
            date: "10/05/2024".to_string(),
            ..Default::default()
        }, // both zero
        groceries("12/05/2024", "40"),
    ];
    assert_eq!(store.bulk_insert(&batch), 2);
    assert_eq!(store.len(), 2);
    let ids: Vec<i64> = store.entries().iter().map(|e| e.id).collect();
    assert!(ids[1] > ids[0], "ids must stay monotonic within a batch");
    for e in store.entries() {
        assert_eq!(e.total, e.income - e.expense);
    }
}

#[test]
fn bulk_insert_does_not_require_notes() {
    let mut store = LedgerStore::open(MemoryStore::default());
    let batch = vec![EntryInput {
        date: "10/05/2024".to_string(),
        income: dec("5"),
        ..Default::default()
    }];
    assert_eq!(store.bulk_insert(&batch), 1);
}

#[test]
fn reload_round_trips_through_the_backend() {
    let dir = tempdir().unwrap();
    let mut store = LedgerStore::open(FileStore::open(dir.path().to_path_buf()));
    store.add(&salary("10/05/2024", "500000")).unwrap();
    store.add(&groceries("11/05/2024", "1200.50")).unwrap();

    let reopened = LedgerStore::open(FileStore::open(dir.path().to_path_buf()));
    assert_eq!(reopened.entries(), store.entries());
}

#[test]
fn load_normalizes_loose_snapshots() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("ledger.json"),
        // string amount, stale total, duplicate id, missing note field
        r#"[
            {"id":1,"date":"10/05/2024","income":"1.234,56","incomeNote":"pay","expense":0,"expenseNote":"","total":99},
            {"id":1,"date":"11/05/2024","income":0,"expense":"5","expenseNote":"bus","total":0}
        ]"#,
    )
    .unwrap();

    let store = LedgerStore::open(FileStore::open(dir.path().to_path_buf()));
    assert_eq!(store.len(), 2);
    assert_eq!(store.entries()[0].total, dec("1234.56"));
    assert_eq!(store.entries()[1].total, dec("-5"));
    assert_eq!(store.entries()[1].income_note, "");
    let ids: Vec<i64> = store.entries().iter().map(|e| e.id).collect();
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn load_keeps_legacy_zero_zero_entries() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("ledger.json"),
        r#"[{"id":7,"date":"10/05/2024","income":0,"incomeNote":"","expense":0,"expenseNote":"","total":0}]"#,
    )
    .unwrap();
    let store = LedgerStore::open(FileStore::open(dir.path().to_path_buf()));
    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].total, Decimal::ZERO);
}

#[test]
fn corrupt_snapshot_resets_to_empty() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("ledger.json"), "not json at all").unwrap();
    let store = LedgerStore::open(FileStore::open(dir.path().to_path_buf()));
    assert!(store.is_empty());
}

#[test]
fn seed_document_backs_first_load() {
    let seed = r#"[{"id":1,"date":"01/03/2024","income":10,"incomeNote":"gift","expense":0,"expenseNote":"","total":10}]"#;
    let store = LedgerStore::open(MemoryStore::with_blob(SEED_KEY, seed));
    assert_eq!(store.len(), 1);
    assert_eq!(store.entries()[0].income_note, "gift");
}

#[test]
fn seed_is_not_persisted_until_a_mutation() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("seed.json"),
        r#"[{"id":1,"date":"01/03/2024","income":10,"incomeNote":"gift","expense":0,"expenseNote":"","total":10}]"#,
    )
    .unwrap();

    let mut store = LedgerStore::open(FileStore::open(dir.path().to_path_buf()));
    assert_eq!(store.len(), 1);
    assert!(!dir.path().join("ledger.json").exists());

    store.add(&salary("10/05/2024", "5")).unwrap();
    assert!(dir.path().join("ledger.json").exists());
}

#[test]
fn write_failure_keeps_in_memory_ledger() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "x").unwrap();

    // the backend directory cannot be created under a regular file
    let mut store = LedgerStore::open(FileStore::open(blocker.join("sub")));
    let entry = store.add(&salary("10/05/2024", "500")).unwrap();
    assert_eq!(entry.total, dec("500"));
    assert_eq!(store.len(), 1);
}
