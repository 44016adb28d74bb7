// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::Expense;

/// Expenses sharing one date, in ledger order.
#[derive(Debug, Clone)]
pub struct DateBucket<'a> {
    pub date: NaiveDate,
    pub expenses: Vec<&'a Expense>,
}

impl DateBucket<'_> {
    pub fn total(&self) -> Decimal {
        self.expenses.iter().map(|e| e.amount).sum()
    }
}

/// Buckets keyed by date, in the order each date was first seen.
#[derive(Debug, Clone, Default)]
pub struct DateBuckets<'a> {
    buckets: Vec<DateBucket<'a>>,
    index: HashMap<NaiveDate, usize>,
}

impl<'a> DateBuckets<'a> {
    pub fn get(&self, date: NaiveDate) -> Option<&DateBucket<'a>> {
        self.index.get(&date).map(|&i| &self.buckets[i])
    }

    pub fn keys(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.buckets.iter().map(|b| b.date)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

pub fn group_by_date(expenses: &[Expense]) -> DateBuckets<'_> {
    let mut out = DateBuckets::default();
    for e in expenses {
        let slot = match out.index.get(&e.date) {
            Some(&i) => i,
            None => {
                out.buckets.push(DateBucket {
                    date: e.date,
                    expenses: Vec::new(),
                });
                out.index.insert(e.date, out.buckets.len() - 1);
                out.buckets.len() - 1
            }
        };
        out.buckets[slot].expenses.push(e);
    }
    out
}

pub fn sum_for_date(expenses: &[Expense], date: NaiveDate) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.date == date)
        .map(|e| e.amount)
        .sum()
}

pub fn sum_for_month(expenses: &[Expense], reference: NaiveDate) -> Decimal {
    expenses
        .iter()
        .filter(|e| e.date.year() == reference.year() && e.date.month() == reference.month())
        .map(|e| e.amount)
        .sum()
}

/// Sum of absolute amounts, or `None` if it exceeds the `Decimal` range.
/// Any day, month or running total over `expenses` is bounded by it.
pub fn magnitude(expenses: &[Expense]) -> Option<Decimal> {
    expenses
        .iter()
        .try_fold(Decimal::ZERO, |acc, e| acc.checked_add(e.amount.abs()))
}

/// Totals per `(year, month)`, oldest first.
pub fn monthly_totals(expenses: &[Expense]) -> BTreeMap<(i32, u32), Decimal> {
    let mut map = BTreeMap::new();
    for e in expenses {
        *map.entry((e.date.year(), e.date.month()))
            .or_insert(Decimal::ZERO) += e.amount;
    }
    map
}
