// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use expenselog::errors::Field;
use expenselog::format::{
    fmt_money, parse_amount, parse_date_input, parse_month, parse_storage_key, to_display,
    to_storage_key,
};
use rust_decimal::Decimal;
use std::str::FromStr;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn storage_and_display_forms() {
    let date = ymd(2024, 3, 5);
    assert_eq!(to_storage_key(date), "2024-03-05");
    assert_eq!(to_display(date), "05-03-2024");
    assert_eq!(parse_storage_key("2024-03-05"), Some(date));
    assert_eq!(parse_storage_key("2024-3-5"), None);
    assert_eq!(parse_storage_key(&to_display(date)), None);
}

#[test]
fn date_input_accepts_iso_and_day_first() {
    let today = ymd(2024, 3, 20);
    for s in ["2024-03-05", " 05-03-2024 ", "05/03/2024"] {
        assert_eq!(parse_date_input(s, today).unwrap(), ymd(2024, 3, 5), "{s}");
    }
    assert_eq!(parse_date_input("Today", today).unwrap(), today);
    assert_eq!(parse_date_input("yesterday", ymd(2024, 3, 1)).unwrap(), ymd(2024, 2, 29));
}

#[test]
fn date_input_errors_name_the_date_field() {
    let today = ymd(2024, 3, 20);
    for s in ["", "   ", "2023-02-29", "31/04/2024", "March 5"] {
        let err = parse_date_input(s, today).unwrap_err();
        assert_eq!(err.field, Field::Date, "{s}");
    }
}

#[test]
fn amounts_parse_as_exact_decimals() {
    assert_eq!(parse_amount(" 19.99 ").unwrap(), Decimal::from_str("19.99").unwrap());
    assert_eq!(parse_amount("-2").unwrap(), Decimal::from(-2));
    assert_eq!(parse_amount("1e2").unwrap(), Decimal::from(100));
    for s in ["", "abc", "inf", "NaN", "1,5"] {
        assert_eq!(parse_amount(s).unwrap_err().field, Field::Amount, "{s}");
    }
}

#[test]
fn money_has_two_decimals() {
    assert_eq!(fmt_money(&Decimal::from(800), "€"), "€800.00");
    assert_eq!(fmt_money(&Decimal::from_str("23.49").unwrap(), "$"), "$23.49");
    assert_eq!(fmt_money(&Decimal::from_str("0.125").unwrap(), ""), "0.12");
}

#[test]
fn months_parse_to_first_day() {
    assert_eq!(parse_month("2024-02"), Some(ymd(2024, 2, 1)));
    assert_eq!(parse_month("2024-13"), None);
}

#[test]
fn years_outside_four_digits_are_rejected() {
    let today = ymd(2024, 3, 20);
    for s in ["+12345-01-01", "05-03-24", "01/01/999", "0999-12-31"] {
        assert_eq!(parse_date_input(s, today).unwrap_err().field, Field::Date, "{s}");
    }
    assert_eq!(parse_date_input("1000-01-01", today).unwrap(), ymd(1000, 1, 1));
    assert_eq!(parse_date_input("31-12-9999", today).unwrap(), ymd(9999, 12, 31));
    assert!(parse_date_input("yesterday", ymd(1000, 1, 1)).is_err());

    // every accepted date has a canonical key that reads back
    for d in [ymd(1000, 1, 1), ymd(9999, 12, 31)] {
        assert_eq!(parse_storage_key(&to_storage_key(d)), Some(d));
    }
    assert_eq!(parse_storage_key("0999-12-31"), None);
}
