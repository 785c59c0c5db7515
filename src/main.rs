// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cashbook::storage::FileStore;
use cashbook::store::LedgerStore;
use cashbook::{cli, commands, storage};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cashbook=warn")),
        )
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store = LedgerStore::open(FileStore::open_default()?);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Ledger stored at {}",
                storage::data_dir()?.join("ledger.json").display()
            );
        }
        Some(("add", sub)) => commands::entries::add(&mut store, sub)?,
        Some(("edit", sub)) => commands::entries::edit(&mut store, sub)?,
        Some(("rm", sub)) => commands::entries::remove(&mut store, sub)?,
        Some(("list", sub)) => commands::entries::list(&store, sub)?,
        Some(("import", sub)) => commands::importer::handle(&mut store, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&store, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
