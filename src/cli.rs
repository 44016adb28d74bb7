// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("expenselog")
        .version(clap::crate_version!())
        .about("Personal expense log with daily and monthly totals")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .env("EXPENSELOG_DB")
                .value_parser(value_parser!(PathBuf))
                .help("Path to the SQLite database"),
        )
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("add")
                .about("Record an expense")
                .arg(Arg::new("name").long("name").required(true))
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_hyphen_values(true),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("Date of the expense [default: today]")
                        .long_help("YYYY-MM-DD, DD-MM-YYYY, DD/MM/YYYY, today or yesterday"),
                ),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("Show expenses grouped by date")
                .arg(Arg::new("date").long("date").help("Only this day (YYYY-MM-DD)")),
        ))
        .subcommand(
            Command::new("rm")
                .about("Delete an expense by position or id")
                .arg(
                    Arg::new("index")
                        .value_parser(value_parser!(usize))
                        .help("Position as shown by `list`"),
                )
                .arg(Arg::new("id").long("id").help("Expense id"))
                .group(
                    ArgGroup::new("target")
                        .args(["index", "id"])
                        .required(true),
                ),
        )
        .subcommand(json_flags(
            Command::new("dates").about("List the dates that have expenses"),
        ))
        .subcommand(json_flags(
            Command::new("total")
                .about("Show the day and month totals")
                .arg(Arg::new("date").long("date").help("Day to total (YYYY-MM-DD)"))
                .arg(
                    Arg::new("month")
                        .long("month")
                        .help("Month to total (YYYY-MM) [default: current]"),
                ),
        ))
        .subcommand(
            Command::new("report").about("Reports").subcommand(json_flags(
                Command::new("months")
                    .about("Totals per month, newest first")
                    .arg(
                        Arg::new("months")
                            .long("months")
                            .value_parser(value_parser!(usize))
                            .default_value("12"),
                    ),
            )),
        )
        .subcommand(
            Command::new("export")
                .about("Export all expenses")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .required(true)
                        .help("csv or json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
        .subcommand(
            Command::new("config").about("Settings").subcommand(
                Command::new("currency")
                    .about("Get or set the currency symbol used for display")
                    .arg(Arg::new("symbol")),
            ),
        )
        .subcommand(Command::new("doctor").about("Check the stored payload"))
}
