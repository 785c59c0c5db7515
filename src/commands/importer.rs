// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::storage::BlobStore;
use crate::store::LedgerStore;
use crate::transfer;
use anyhow::{Context, Result};
use std::fs;

pub fn handle<S: BlobStore>(store: &mut LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("path").unwrap().trim();
    let raw = fs::read_to_string(path).with_context(|| format!("Open CSV {}", path))?;
    let parsed = transfer::parse_csv(&raw)?;

    if parsed.data_rows == 0 {
        println!("No data rows in {}", path);
        return Ok(());
    }
    if parsed.candidates.is_empty() {
        println!(
            "Read {} rows from {}, none valid - nothing imported",
            parsed.data_rows, path
        );
        return Ok(());
    }
    let inserted = store.bulk_insert(&parsed.candidates);
    let skipped = parsed.skipped + (parsed.candidates.len() - inserted);
    println!(
        "Imported {} entries from {} ({} skipped)",
        inserted, path, skipped
    );
    Ok(())
}
