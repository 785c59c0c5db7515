// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{EntryInput, Kind};
use crate::query::{self, QuerySpec};
use crate::storage::BlobStore;
use crate::store::{LedgerError, LedgerStore};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::validate::parse_amount;
use anyhow::{Context, Result};
use clap::ArgMatches;

pub fn add<S: BlobStore>(store: &mut LedgerStore<S>, sub: &ArgMatches) -> Result<()> {
    let input = EntryInput {
        date: arg(sub, "date"),
        income: parse_amount(&arg(sub, "income")),
        income_note: arg(sub, "income-note"),
        expense: parse_amount(&arg(sub, "expense")),
        expense_note: arg(sub, "expense-note"),
    };
    let entry = store.add(&input)?;
    println!(
        "Recorded entry {} on {} (total {})",
        entry.id,
        entry.date,
        fmt_money(&entry.total)
    );
    print_totals(store);
    Ok(())
}

pub fn edit<S: BlobStore>(store: &mut LedgerStore<S>, sub: &ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    let current = store.get(id).ok_or(LedgerError::NotFound(id))?.clone();
    // Absent flags keep the current value; present flags overwrite it.
    let input = EntryInput {
        date: sub
            .get_one::<String>("date")
            .map(|s| s.trim().to_string())
            .unwrap_or(current.date),
        income: sub
            .get_one::<String>("income")
            .map(|s| parse_amount(s))
            .unwrap_or(current.income),
        income_note: sub
            .get_one::<String>("income-note")
            .map(|s| s.trim().to_string())
            .unwrap_or(current.income_note),
        expense: sub
            .get_one::<String>("expense")
            .map(|s| parse_amount(s))
            .unwrap_or(current.expense),
        expense_note: sub
            .get_one::<String>("expense-note")
            .map(|s| s.trim().to_string())
            .unwrap_or(current.expense_note),
    };
    let entry = store.update(id, &input)?;
    println!(
        "Updated entry {} on {} (total {})",
        entry.id,
        entry.date,
        fmt_money(&entry.total)
    );
    print_totals(store);
    Ok(())
}

pub fn remove<S: BlobStore>(store: &mut LedgerStore<S>, sub: &ArgMatches) -> Result<()> {
    let id = parse_id(sub)?;
    if store.remove(id) {
        println!("Deleted entry {id}");
        print_totals(store);
    } else {
        println!("No entry with id {id}, nothing to delete");
    }
    Ok(())
}

pub fn list<S: BlobStore>(store: &LedgerStore<S>, sub: &ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let spec = QuerySpec {
        search: sub.get_one::<String>("search").cloned(),
        day: sub.get_one::<u32>("day").copied(),
        month: sub.get_one::<u32>("month").copied(),
        year: sub.get_one::<i32>("year").copied(),
        kind: match sub.get_one::<String>("kind").map(String::as_str) {
            Some("income") => Kind::IncomeOnly,
            Some("expense") => Kind::ExpenseOnly,
            _ => Kind::All,
        },
        group_by_month: sub.get_flag("by-month"),
    };
    let view = query::query(store.entries(), &spec);
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }

    if view.rows.is_empty() {
        println!("No entries match.");
        return Ok(());
    }
    const HEADERS: [&str; 6] = ["Id", "Date", "Income", "Income note", "Expense", "Expense note"];
    match &view.groups {
        Some(groups) => {
            for group in groups {
                println!("{}", group.month);
                let rows = group.rows.iter().map(row_cells).collect();
                println!("{}", pretty_table(&HEADERS, rows));
                println!(
                    "  subtotal: income {}, expense {}",
                    fmt_money(&group.income),
                    fmt_money(&group.expense)
                );
            }
        }
        None => {
            let rows = view.rows.iter().map(row_cells).collect();
            println!("{}", pretty_table(&HEADERS, rows));
        }
    }
    println!(
        "Totals: income {}, expense {}, balance {}",
        fmt_money(&view.totals.income),
        fmt_money(&view.totals.expense),
        fmt_money(&view.totals.balance)
    );
    Ok(())
}

fn row_cells(e: &crate::models::Entry) -> Vec<String> {
    vec![
        e.id.to_string(),
        e.date.clone(),
        fmt_money(&e.income),
        e.income_note.clone(),
        fmt_money(&e.expense),
        e.expense_note.clone(),
    ]
}

fn arg(sub: &ArgMatches, name: &str) -> String {
    sub.get_one::<String>(name)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn parse_id(sub: &ArgMatches) -> Result<i64> {
    let raw = sub.get_one::<String>("id").unwrap().trim();
    raw.parse::<i64>()
        .with_context(|| format!("Invalid entry id '{raw}'"))
}

fn print_totals<S: BlobStore>(store: &LedgerStore<S>) {
    let view = query::query(store.entries(), &QuerySpec::default());
    println!(
        "Totals: income {}, expense {}, balance {}",
        fmt_money(&view.totals.income),
        fmt_money(&view.totals.expense),
        fmt_money(&view.totals.balance)
    );
}
