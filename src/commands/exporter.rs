// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::storage::BlobStore;
use crate::store::LedgerStore;
use crate::transfer;
use anyhow::{Context, Result};
use std::fs;

pub fn handle<S: BlobStore>(store: &LedgerStore<S>, sub: &clap::ArgMatches) -> Result<()> {
    let out = sub.get_one::<String>("out").unwrap().trim();
    let blob = transfer::export_csv(store.entries());
    fs::write(out, blob).with_context(|| format!("Write CSV {}", out))?;
    println!("Exported {} entries to {}", store.len(), out);
    Ok(())
}
