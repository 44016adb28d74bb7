// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::monthly_totals;
use crate::clock::Clock;
use crate::format::{fmt_money, parse_date_input, parse_month, to_display, to_storage_key};
use crate::ledger::Ledger;
use crate::store::KeyValueSlot;
use crate::utils::{get_currency_symbol, maybe_print_json, pretty_table};
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<S: KeyValueSlot, C: Clock>(
    ledger: &Ledger<S, C>,
    m: &clap::ArgMatches,
) -> Result<()> {
    if let Some(("months", sub)) = m.subcommand() {
        months(ledger, sub)?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct Totals {
    pub day: Option<(String, Decimal)>,
    pub month: String,
    pub month_total: Decimal,
}

pub fn totals<S: KeyValueSlot, C: Clock>(
    ledger: &Ledger<S, C>,
    date: Option<&str>,
    month: Option<&str>,
) -> Result<Totals> {
    let day = match date {
        Some(input) => {
            let d = parse_date_input(input, ledger.today())?;
            Some((to_storage_key(d), ledger.select_date(&to_storage_key(d)).total))
        }
        None => None,
    };
    let reference: NaiveDate = match month {
        Some(s) => parse_month(s)
            .ok_or_else(|| anyhow!("Invalid month '{}', expected YYYY-MM", s))?,
        None => ledger.today(),
    };
    Ok(Totals {
        day,
        month: reference.format("%Y-%m").to_string(),
        month_total: ledger.monthly_total_at(reference),
    })
}

pub fn total<S: KeyValueSlot, C: Clock>(
    ledger: &Ledger<S, C>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let t = totals(
        ledger,
        sub.get_one::<String>("date").map(String::as_str),
        sub.get_one::<String>("month").map(String::as_str),
    )?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t)? {
        return Ok(());
    }
    let ccy = get_currency_symbol(ledger.store().slot())?;
    let mut rows = Vec::new();
    if let Some((key, amount)) = &t.day {
        let label = crate::format::parse_storage_key(key)
            .map(to_display)
            .unwrap_or_else(|| key.clone());
        rows.push(vec![format!("Day {}", label), fmt_money(amount, &ccy)]);
    }
    rows.push(vec![format!("Month {}", t.month), fmt_money(&t.month_total, &ccy)]);
    println!("{}", pretty_table(&["Period", "Total"], rows));
    Ok(())
}

/// `(YYYY-MM, total)` pairs, newest first, at most `limit` of them.
pub fn month_rows<S: KeyValueSlot, C: Clock>(
    ledger: &Ledger<S, C>,
    limit: usize,
) -> Vec<(String, Decimal)> {
    monthly_totals(ledger.expenses())
        .into_iter()
        .rev()
        .take(limit)
        .map(|((y, m), total)| (format!("{:04}-{:02}", y, m), total))
        .collect()
}

fn months<S: KeyValueSlot, C: Clock>(ledger: &Ledger<S, C>, sub: &clap::ArgMatches) -> Result<()> {
    let limit: usize = *sub.get_one::<usize>("months").unwrap_or(&12);
    let data = month_rows(ledger, limit);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = get_currency_symbol(ledger.store().slot())?;
    let rows = data
        .iter()
        .map(|(m, total)| vec![m.clone(), fmt_money(total, &ccy)])
        .collect();
    println!("{}", pretty_table(&["Month", "Total"], rows));
    Ok(())
}
