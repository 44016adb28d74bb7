// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use expenselog::{
    aggregate::{group_by_date, monthly_totals, sum_for_date, sum_for_month},
    models::Expense,
};
use rust_decimal::Decimal;
use std::str::FromStr;

fn e(name: &str, amount: &str, date: &str) -> Expense {
    Expense::new(
        name,
        Decimal::from_str(amount).unwrap(),
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    )
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn groups_keep_first_seen_and_insertion_order() {
    let items = vec![
        e("a", "1", "2024-03-05"),
        e("b", "2", "2024-01-01"),
        e("c", "3", "2024-03-05"),
        e("d", "4", "2024-02-10"),
    ];
    let buckets = group_by_date(&items);
    let keys: Vec<NaiveDate> = buckets.keys().collect();
    assert_eq!(keys, vec![d("2024-03-05"), d("2024-01-01"), d("2024-02-10")]);

    let march = buckets.get(d("2024-03-05")).unwrap();
    let names: Vec<&str> = march.expenses.iter().map(|x| x.name.as_str()).collect();
    assert_eq!(names, ["a", "c"]);
    assert_eq!(march.total(), Decimal::from(4));
    assert!(buckets.get(d("2024-03-06")).is_none());
}

#[test]
fn empty_input_groups_to_nothing() {
    let buckets = group_by_date(&[]);
    assert!(buckets.is_empty());
    assert_eq!(sum_for_date(&[], d("2024-03-05")), Decimal::ZERO);
    assert_eq!(sum_for_month(&[], d("2024-03-05")), Decimal::ZERO);
}

#[test]
fn decimal_sums_do_not_drift() {
    // 0.1 ten times is exactly 1 in decimal arithmetic
    let items: Vec<Expense> = (0..10).map(|_| e("x", "0.1", "2024-03-05")).collect();
    assert_eq!(sum_for_date(&items, d("2024-03-05")), Decimal::ONE);
}

#[test]
fn day_sum_matches_only_that_date() {
    let items = vec![
        e("Coffee", "3.50", "2024-03-05"),
        e("Book", "19.99", "2024-03-05"),
        e("Rent", "800", "2024-04-01"),
        e("Refund", "-5.00", "2024-03-05"),
    ];
    assert_eq!(sum_for_date(&items, d("2024-03-05")), Decimal::from_str("18.49").unwrap());
    assert_eq!(sum_for_date(&items, d("2024-04-02")), Decimal::ZERO);
}

#[test]
fn month_sum_requires_same_year() {
    let items = vec![
        e("a", "10", "2024-03-01"),
        e("b", "20", "2024-03-31"),
        e("c", "40", "2023-03-15"),
        e("d", "80", "2024-04-01"),
        e("e", "160", "2024-02-29"),
    ];
    assert_eq!(sum_for_month(&items, d("2024-03-15")), Decimal::from(30));
    assert_eq!(sum_for_month(&items, d("2023-03-01")), Decimal::from(40));
}

#[test]
fn monthly_totals_are_keyed_by_year_and_month() {
    let items = vec![
        e("a", "10", "2024-03-01"),
        e("b", "5.25", "2024-03-31"),
        e("c", "40", "2023-12-15"),
    ];
    let totals = monthly_totals(&items);
    let keys: Vec<(i32, u32)> = totals.keys().copied().collect();
    assert_eq!(keys, vec![(2023, 12), (2024, 3)]);
    assert_eq!(totals[&(2024, 3)], Decimal::from_str("15.25").unwrap());
}
