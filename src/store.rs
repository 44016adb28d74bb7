// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence of the expense list in a single key-value slot.

use std::collections::HashMap;

use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::format::{self, parse_storage_key};
use crate::models::{Envelope, Expense};

pub const EXPENSES_KEY: &str = "expenses";
pub const PAYLOAD_VERSION: u32 = 1;

/// A durable string slot addressed by key. Writes replace the prior value.
pub trait KeyValueSlot {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Slot backed by the `kv` table.
pub struct SqliteSlot {
    conn: Connection,
}

impl SqliteSlot {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueSlot for SqliteSlot {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let v: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(v)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local slot, used by tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    values: HashMap<String, String>,
    fail_writes: bool,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let mut slot = Self::default();
        slot.values.insert(key.to_string(), value.to_string());
        slot
    }

    /// Makes every subsequent `set` fail.
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueSlot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable(format!("write to '{}' rejected", key)));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// What the slot currently holds, as seen by [`ExpenseStore::inspect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadStatus {
    Missing,
    Legacy { entries: usize, skipped: usize },
    Current { version: u32, entries: usize, skipped: usize },
    Unreadable(String),
}

pub struct ExpenseStore<S> {
    slot: S,
}

impl<S: KeyValueSlot> ExpenseStore<S> {
    pub fn new(slot: S) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn slot_mut(&mut self) -> &mut S {
        &mut self.slot
    }

    /// Reads the stored list. Missing or unreadable payloads yield an empty
    /// list; unreadable entries inside a readable payload are dropped.
    pub fn load(&self) -> Vec<Expense> {
        let raw = match self.slot.get(EXPENSES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "could not read stored expenses, starting empty");
                return Vec::new();
            }
        };
        match decode(&raw) {
            Ok(decoded) => {
                if decoded.skipped > 0 {
                    warn!(
                        skipped = decoded.skipped,
                        version = decoded.version,
                        "dropped unreadable stored entries"
                    );
                }
                debug!(
                    count = decoded.expenses.len(),
                    version = decoded.version,
                    "loaded expenses"
                );
                decoded.expenses
            }
            Err(reason) => {
                warn!(%reason, "stored expenses are unreadable, starting empty");
                Vec::new()
            }
        }
    }

    /// Replaces the stored list with `expenses`.
    pub fn save(&mut self, expenses: &[Expense]) -> Result<(), StoreError> {
        let payload = encode(expenses)?;
        self.slot.set(EXPENSES_KEY, &payload)?;
        debug!(count = expenses.len(), "saved expenses");
        Ok(())
    }

    pub fn raw(&self) -> Result<Option<String>, StoreError> {
        self.slot.get(EXPENSES_KEY)
    }

    pub fn inspect(&self) -> Result<PayloadStatus, StoreError> {
        let Some(raw) = self.raw()? else {
            return Ok(PayloadStatus::Missing);
        };
        Ok(match decode(&raw) {
            Ok(d) if d.version == 0 => PayloadStatus::Legacy {
                entries: d.expenses.len(),
                skipped: d.skipped,
            },
            Ok(d) => PayloadStatus::Current {
                version: d.version,
                entries: d.expenses.len(),
                skipped: d.skipped,
            },
            Err(reason) => PayloadStatus::Unreadable(reason),
        })
    }
}

pub fn encode(expenses: &[Expense]) -> Result<String, StoreError> {
    let envelope = Envelope {
        version: PAYLOAD_VERSION,
        expenses: expenses.to_vec(),
    };
    Ok(serde_json::to_string(&envelope)?)
}

struct Decoded {
    version: u32,
    expenses: Vec<Expense>,
    skipped: usize,
}

fn decode(raw: &str) -> Result<Decoded, String> {
    let value: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let (version, items) = match value {
        Value::Array(items) => (0, items),
        Value::Null => (PAYLOAD_VERSION, Vec::new()),
        Value::Object(mut obj) => {
            let version = obj
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| "envelope has no version".to_string())?;
            if version > u64::from(PAYLOAD_VERSION) {
                return Err(format!(
                    "payload version {} is newer than supported version {}",
                    version, PAYLOAD_VERSION
                ));
            }
            match obj.remove("expenses") {
                Some(Value::Array(items)) => (PAYLOAD_VERSION, items),
                _ => return Err("envelope has no expense list".to_string()),
            }
        }
        _ => return Err("unexpected payload shape".to_string()),
    };

    let mut expenses = Vec::with_capacity(items.len());
    let mut skipped = 0;
    // running sum of magnitudes; every later aggregate stays below it
    let mut magnitude = Decimal::ZERO;
    for item in items {
        let entry = if version == 0 {
            legacy_entry(&item)
        } else {
            serde_json::from_value::<Expense>(item).ok()
        };
        let next = entry
            .filter(|e| format::is_supported_date(e.date))
            .and_then(|e| magnitude.checked_add(e.amount.abs()).map(|m| (e, m)));
        match next {
            Some((e, m)) => {
                magnitude = m;
                expenses.push(e);
            }
            None => skipped += 1,
        }
    }
    Ok(Decoded {
        version,
        expenses,
        skipped,
    })
}

/// Version 0 payloads are a bare array of `{name, amount, date}` with
/// numeric amounts and free-form dates.
fn legacy_entry(item: &Value) -> Option<Expense> {
    let name = item.get("name")?.as_str()?.trim();
    if name.is_empty() {
        return None;
    }
    let amount = match item.get("amount")? {
        Value::Number(n) => n.to_string().parse::<Decimal>().ok()?,
        Value::String(s) => format::parse_amount(s).ok()?,
        _ => return None,
    };
    let date_str = item.get("date")?.as_str()?.trim();
    let date = parse_storage_key(date_str).or_else(|| {
        ["%d-%m-%Y", "%d/%m/%Y"]
            .iter()
            .find_map(|f| chrono::NaiveDate::parse_from_str(date_str, f).ok())
    })?;
    let id = item
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(Uuid::new_v4);
    Some(Expense {
        id,
        name: name.to_string(),
        amount,
        date,
    })
}
