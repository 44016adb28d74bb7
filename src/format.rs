// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Conversions between dates, amounts and their text forms.
//!
//! Storage keys (`YYYY-MM-DD`) are the only strings ever parsed back into
//! dates for grouping. Display strings are for people.

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

use crate::errors::{Field, ValidationError};

pub const STORAGE_FORMAT: &str = "%Y-%m-%d";
pub const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Day-first forms accepted from users in addition to the storage form.
const INPUT_FORMATS: [&str; 3] = [STORAGE_FORMAT, DISPLAY_FORMAT, "%d/%m/%Y"];

/// Four-digit years, so every storage key is exactly `YYYY-MM-DD`.
pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 9999;

pub fn is_supported_date(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

pub fn to_storage_key(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

pub fn to_display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Strict inverse of [`to_storage_key`].
pub fn parse_storage_key(key: &str) -> Option<NaiveDate> {
    // chrono accepts unpadded fields; require the canonical width
    if key.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(key, STORAGE_FORMAT)
        .ok()
        .filter(|d| is_supported_date(*d))
}

/// Parses a date typed by the user. `today` and `yesterday` are resolved
/// against `today`.
pub fn parse_date_input(input: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ValidationError::new(Field::Date, "date is required"));
    }
    let relative = match s.to_ascii_lowercase().as_str() {
        "today" => Some(today),
        "yesterday" => today.checked_sub_days(Days::new(1)),
        _ => None,
    };
    if let Some(date) = relative {
        return if is_supported_date(date) {
            Ok(date)
        } else {
            Err(ValidationError::new(Field::Date, "date is out of range"))
        };
    }
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| {
            NaiveDate::parse_from_str(s, fmt)
                .ok()
                .filter(|d| is_supported_date(*d))
        })
        .ok_or_else(|| {
            ValidationError::new(
                Field::Date,
                format!(
                    "'{}' is not a valid date, expected YYYY-MM-DD with a year from {} to {}",
                    s, MIN_YEAR, MAX_YEAR
                ),
            )
        })
}

/// Parses a monetary amount. `Decimal` has no NaN or infinity, so anything
/// that parses is finite.
pub fn parse_amount(input: &str) -> Result<Decimal, ValidationError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(ValidationError::new(Field::Amount, "amount is required"));
    }
    s.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(s))
        .map_err(|_| ValidationError::new(Field::Amount, format!("'{}' is not a number", s)))
}

/// Parses `YYYY-MM` into the first day of that month.
pub fn parse_month(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", s.trim()), STORAGE_FORMAT).ok()
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    format!("{}{:.2}", symbol, d.round_dp(2))
}
