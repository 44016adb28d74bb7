// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::ledger::Ledger;
use crate::store::{KeyValueSlot, PayloadStatus, PAYLOAD_VERSION};
use crate::utils::pretty_table;
use anyhow::Result;
use std::collections::HashSet;

/// Problems found in the stored payload and loaded ledger.
pub fn issues<S: KeyValueSlot, C: Clock>(ledger: &Ledger<S, C>) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::new();

    // 1) Payload shape
    match ledger.store().inspect()? {
        PayloadStatus::Missing => {}
        PayloadStatus::Current { skipped, .. } => {
            if skipped > 0 {
                rows.push(vec!["unreadable_entries".into(), skipped.to_string()]);
            }
        }
        PayloadStatus::Legacy { entries, skipped } => {
            rows.push(vec![
                "legacy_payload".into(),
                format!(
                    "{} entries in version 0 format, rewritten as version {} on next change",
                    entries, PAYLOAD_VERSION
                ),
            ]);
            if skipped > 0 {
                rows.push(vec!["unreadable_entries".into(), skipped.to_string()]);
            }
        }
        PayloadStatus::Unreadable(reason) => {
            rows.push(vec!["unreadable_payload".into(), reason]);
        }
    }

    // 2) Duplicate ids would make `rm --id` ambiguous
    let mut seen = HashSet::new();
    for e in ledger.expenses() {
        if !seen.insert(e.id) {
            rows.push(vec!["duplicate_id".into(), e.id.to_string()]);
        }
    }
    Ok(rows)
}

pub fn handle<S: KeyValueSlot, C: Clock>(ledger: &Ledger<S, C>) -> Result<()> {
    let rows = issues(ledger)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found ({} expenses)", ledger.len());
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
