// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::format::to_storage_key;
use crate::ledger::Ledger;
use crate::store::KeyValueSlot;
use crate::utils::required;
use anyhow::{bail, Result};
use serde_json::json;

pub fn handle<S: KeyValueSlot, C: Clock>(
    ledger: &Ledger<S, C>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "name", "amount"])?;
            for e in ledger.expenses() {
                wtr.write_record([
                    e.id.to_string(),
                    to_storage_key(e.date),
                    e.name.clone(),
                    e.amount.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = ledger
                .expenses()
                .iter()
                .map(|e| {
                    json!({
                        "id": e.id,
                        "date": to_storage_key(e.date),
                        "name": e.name,
                        "amount": e.amount.to_string()
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} expenses to {}", ledger.len(), out);
    Ok(())
}
