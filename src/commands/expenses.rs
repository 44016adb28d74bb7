// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::clock::Clock;
use crate::format::{fmt_money, parse_date_input, parse_storage_key, to_display, to_storage_key};
use crate::ledger::Ledger;
use crate::models::DayView;
use crate::store::KeyValueSlot;
use crate::utils::{get_currency_symbol, maybe_print_json, pretty_table, required};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

pub fn add<S: KeyValueSlot, C: Clock>(
    ledger: &mut Ledger<S, C>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let name = required(sub, "name")?;
    let amount = required(sub, "amount")?;
    let date = sub
        .get_one::<String>("date")
        .map(String::as_str)
        .unwrap_or("today");

    let date = ledger.add(name, amount, date)?;
    let ccy = get_currency_symbol(ledger.store().slot())?;
    let day = ledger.select_date(&to_storage_key(date));
    println!(
        "Recorded '{}' on {} (day total {}, month total {})",
        name.trim(),
        to_display(date),
        fmt_money(&day.total, &ccy),
        fmt_money(&ledger.monthly_total(), &ccy)
    );
    Ok(())
}

pub fn list<S: KeyValueSlot, C: Clock>(
    ledger: &Ledger<S, C>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let views = day_views(ledger, sub.get_one::<String>("date").map(String::as_str))?;
    if maybe_print_json(json_flag, jsonl_flag, &views)? {
        return Ok(());
    }
    if ledger.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }
    let ccy = get_currency_symbol(ledger.store().slot())?;
    for view in views {
        let heading = parse_storage_key(&view.date)
            .map(to_display)
            .unwrap_or_else(|| view.date.clone());
        let rows: Vec<Vec<String>> = view
            .expenses
            .iter()
            .map(|r| {
                vec![
                    r.index.to_string(),
                    r.expense.name.clone(),
                    fmt_money(&r.expense.amount, &ccy),
                    r.expense.id.to_string(),
                ]
            })
            .collect();
        println!("{}  (total {})", heading, fmt_money(&view.total, &ccy));
        println!("{}", pretty_table(&["#", "Name", "Amount", "Id"], rows));
    }
    Ok(())
}

/// One view per date, ascending; or just the requested day.
pub fn day_views<S: KeyValueSlot, C: Clock>(
    ledger: &Ledger<S, C>,
    date: Option<&str>,
) -> Result<Vec<DayView>> {
    if let Some(input) = date {
        let date = parse_date_input(input, ledger.today())?;
        return Ok(vec![ledger.select_date(&to_storage_key(date))]);
    }
    Ok(ledger
        .dates()
        .into_iter()
        .map(|d| ledger.select_date(&to_storage_key(d)))
        .collect())
}

pub fn rm<S: KeyValueSlot, C: Clock>(
    ledger: &mut Ledger<S, C>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let removed = if let Some(id) = sub.get_one::<String>("id") {
        let id = Uuid::parse_str(id.trim()).with_context(|| format!("Invalid id '{}'", id))?;
        ledger.delete_by_id(id)?
    } else {
        let index = *sub
            .get_one::<usize>("index")
            .context("Missing argument 'index'")?;
        ledger.delete(index)?
    };
    let ccy = get_currency_symbol(ledger.store().slot())?;
    println!(
        "Deleted '{}' ({} on {})",
        removed.name,
        fmt_money(&removed.amount, &ccy),
        to_display(removed.date)
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DateRow {
    pub date: String,
    pub display: String,
    pub count: usize,
    pub total: Decimal,
}

pub fn date_rows<S: KeyValueSlot, C: Clock>(ledger: &Ledger<S, C>) -> Vec<DateRow> {
    let buckets = ledger.buckets();
    ledger
        .dates()
        .into_iter()
        .filter_map(|d| buckets.get(d))
        .map(|b| DateRow {
            date: to_storage_key(b.date),
            display: to_display(b.date),
            count: b.expenses.len(),
            total: b.total(),
        })
        .collect()
}

pub fn dates<S: KeyValueSlot, C: Clock>(
    ledger: &Ledger<S, C>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let data = date_rows(ledger);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = get_currency_symbol(ledger.store().slot())?;
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.display.clone(),
                r.count.to_string(),
                fmt_money(&r.total, &ccy),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "Entries", "Total"], rows));
    Ok(())
}
