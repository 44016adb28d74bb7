// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::ledger::Ledger;
use crate::store::KeyValueSlot;
use crate::utils::{get_currency_symbol, set_currency_symbol};
use anyhow::{bail, Result};

pub fn handle<S: KeyValueSlot, C: Clock>(
    ledger: &mut Ledger<S, C>,
    m: &clap::ArgMatches,
) -> Result<()> {
    if let Some(("currency", sub)) = m.subcommand() {
        match sub.get_one::<String>("symbol").map(|s| s.trim()) {
            Some("") => bail!("Currency symbol cannot be empty"),
            Some(symbol) => {
                set_currency_symbol(ledger.store_mut().slot_mut(), symbol)?;
                println!("Currency symbol set to '{}'", symbol);
            }
            None => println!("{}", get_currency_symbol(ledger.store().slot())?),
        }
    }
    Ok(())
}
