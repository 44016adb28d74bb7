// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::aggregate::{self, DateBuckets};
use crate::clock::Clock;
use crate::errors::{Field, LedgerError, ValidationError};
use crate::format::{self, parse_storage_key, to_storage_key};
use crate::models::{DayView, Expense, IndexedExpense};
use crate::store::{ExpenseStore, KeyValueSlot};

/// The in-memory expense list and the store it is mirrored to.
pub struct Ledger<S, C> {
    expenses: Vec<Expense>,
    store: ExpenseStore<S>,
    clock: C,
}

impl<S: KeyValueSlot, C: Clock> Ledger<S, C> {
    pub fn open(store: ExpenseStore<S>, clock: C) -> Self {
        let expenses = store.load();
        Self {
            expenses,
            store,
            clock,
        }
    }

    /// Validates and records a new expense, returning its normalized date.
    pub fn add(
        &mut self,
        name: &str,
        amount: &str,
        date_input: &str,
    ) -> Result<NaiveDate, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::new(Field::Name, "name is required").into());
        }
        let amount = format::parse_amount(amount)?;
        let fits = aggregate::magnitude(&self.expenses)
            .and_then(|m| m.checked_add(amount.abs()))
            .is_some();
        if !fits {
            return Err(ValidationError::new(
                Field::Amount,
                format!("{} would push the ledger total out of range", amount),
            )
            .into());
        }
        let date = format::parse_date_input(date_input, self.clock.today())?;

        let expense = Expense::new(name, amount, date);
        let id = expense.id;
        self.expenses.push(expense);
        if let Err(err) = self.store.save(&self.expenses) {
            self.expenses.pop();
            return Err(err.into());
        }
        info!(%id, date = %to_storage_key(date), %amount, "expense added");
        Ok(date)
    }

    pub fn delete(&mut self, index: usize) -> Result<Expense, LedgerError> {
        if index >= self.expenses.len() {
            return Err(LedgerError::OutOfRange {
                index,
                len: self.expenses.len(),
            });
        }
        self.remove_at(index)
    }

    pub fn delete_by_id(&mut self, id: Uuid) -> Result<Expense, LedgerError> {
        let index = self
            .expenses
            .iter()
            .position(|e| e.id == id)
            .ok_or(LedgerError::NotFound(id))?;
        self.remove_at(index)
    }

    fn remove_at(&mut self, index: usize) -> Result<Expense, LedgerError> {
        let removed = self.expenses.remove(index);
        if let Err(err) = self.store.save(&self.expenses) {
            self.expenses.insert(index, removed);
            return Err(err.into());
        }
        info!(id = %removed.id, index, "expense deleted");
        Ok(removed)
    }

    /// Expenses recorded under the storage key `key`, with their total.
    pub fn select_date(&self, key: &str) -> DayView {
        let Some(date) = parse_storage_key(key) else {
            debug!(key, "selected key is not a storage date");
            return DayView {
                date: key.to_string(),
                expenses: Vec::new(),
                total: Decimal::ZERO,
            };
        };
        let expenses: Vec<IndexedExpense> = self
            .expenses
            .iter()
            .enumerate()
            .filter(|(_, e)| e.date == date)
            .map(|(index, e)| IndexedExpense {
                index,
                expense: e.clone(),
            })
            .collect();
        DayView {
            date: to_storage_key(date),
            expenses,
            total: aggregate::sum_for_date(&self.expenses, date),
        }
    }

    pub fn monthly_total(&self) -> Decimal {
        self.monthly_total_at(self.clock.today())
    }

    pub fn monthly_total_at(&self, reference: NaiveDate) -> Decimal {
        aggregate::sum_for_month(&self.expenses, reference)
    }

    pub fn buckets(&self) -> DateBuckets<'_> {
        aggregate::group_by_date(&self.expenses)
    }

    /// Known dates, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.buckets().keys().collect();
        dates.sort();
        dates
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn store(&self) -> &ExpenseStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ExpenseStore<S> {
        &mut self.store
    }
}
