// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("cashbook")
        .version(crate_version!())
        .about("Local household income/expense ledger")
        .subcommand(Command::new("init").about("Show where the ledger is stored"))
        .subcommand(
            Command::new("add")
                .about("Record a new entry")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .required(true)
                        .help("Entry date, DD/MM/YYYY"),
                )
                .arg(Arg::new("income").long("income").default_value("0"))
                .arg(
                    Arg::new("income-note")
                        .long("income-note")
                        .default_value("")
                        .help("Required when --income is positive"),
                )
                .arg(Arg::new("expense").long("expense").default_value("0"))
                .arg(
                    Arg::new("expense-note")
                        .long("expense-note")
                        .default_value("")
                        .help("Required when --expense is positive"),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Overwrite fields of an existing entry")
                .arg(Arg::new("id").required(true))
                .arg(Arg::new("date").long("date").help("Entry date, DD/MM/YYYY"))
                .arg(Arg::new("income").long("income"))
                .arg(Arg::new("income-note").long("income-note"))
                .arg(Arg::new("expense").long("expense"))
                .arg(Arg::new("expense-note").long("expense-note")),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete an entry")
                .arg(Arg::new("id").required(true)),
        )
        .subcommand(
            Command::new("list")
                .about("Browse entries with filters and totals")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Substring match against either note, case-insensitive"),
                )
                .arg(
                    Arg::new("day")
                        .long("day")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("month")
                        .long("month")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("year")
                        .long("year")
                        .value_parser(clap::value_parser!(i32)),
                )
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .value_parser(["all", "income", "expense"])
                        .default_value("all"),
                )
                .arg(
                    Arg::new("by-month")
                        .long("by-month")
                        .action(ArgAction::SetTrue)
                        .help("Group rows by month with subtotals"),
                )
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue))
                .arg(Arg::new("jsonl").long("jsonl").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("export")
                .about("Export the ledger to CSV")
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("import")
                .about("Import entries from a CSV document")
                .arg(Arg::new("path").long("path").required(true)),
        )
}
