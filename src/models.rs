// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded expense. Dates serialize as `YYYY-MM-DD`, amounts as
/// decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(name: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            date,
        }
    }
}

/// Versioned wrapper written under the `expenses` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub version: u32,
    pub expenses: Vec<Expense>,
}

/// An expense together with its current position in the ledger.
#[derive(Debug, Clone, Serialize)]
pub struct IndexedExpense {
    pub index: usize,
    #[serde(flatten)]
    pub expense: Expense,
}

/// Everything the front end needs for a selected day.
#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub date: String,
    pub expenses: Vec<IndexedExpense>,
    pub total: Decimal,
}
