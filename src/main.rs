// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use expenselog::{
    cli,
    clock::SystemClock,
    commands, db,
    ledger::Ledger,
    store::{ExpenseStore, SqliteSlot},
    utils,
};

fn main() -> Result<()> {
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_override = matches.get_one::<PathBuf>("db").cloned();
    let conn = db::open_or_init(db_override.as_deref())?;
    let mut ledger = Ledger::open(ExpenseStore::new(SqliteSlot::new(conn)), SystemClock);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Database initialized at {}",
                db::db_path(db_override.as_deref())?.display()
            );
        }
        Some(("add", sub)) => commands::expenses::add(&mut ledger, sub)?,
        Some(("list", sub)) => commands::expenses::list(&ledger, sub)?,
        Some(("rm", sub)) => commands::expenses::rm(&mut ledger, sub)?,
        Some(("dates", sub)) => commands::expenses::dates(&ledger, sub)?,
        Some(("total", sub)) => commands::reports::total(&ledger, sub)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        Some(("config", sub)) => commands::config::handle(&mut ledger, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&ledger)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
