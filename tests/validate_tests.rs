// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashbook::validate::{date_parts, is_valid_date, parse_amount};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[test]
fn accepts_real_calendar_dates() {
    assert!(is_valid_date("01/01/2024"));
    assert!(is_valid_date("31/12/1999"));
    assert!(is_valid_date("29/02/2024"));
    assert!(is_valid_date("29/02/2000"));
}

#[test]
fn rejects_impossible_dates() {
    assert!(!is_valid_date("29/02/2023"));
    assert!(!is_valid_date("29/02/1900")); // divisible by 100, not by 400
    assert!(!is_valid_date("31/04/2020"));
    assert!(!is_valid_date("00/01/2020"));
    assert!(!is_valid_date("13/13/2020"));
    assert!(!is_valid_date("32/01/2024"));
}

#[test]
fn rejects_loose_formats() {
    assert!(!is_valid_date("1/01/2024"));
    assert!(!is_valid_date("01/1/2024"));
    assert!(!is_valid_date("01-01-2024"));
    assert!(!is_valid_date("2024/01/01"));
    assert!(!is_valid_date(" 01/01/2024"));
    assert!(!is_valid_date(""));
}

#[test]
fn enforces_year_range() {
    assert!(is_valid_date("01/01/1900"));
    assert!(is_valid_date("01/01/2100"));
    assert!(!is_valid_date("01/01/1899"));
    assert!(!is_valid_date("01/01/2101"));
}

#[test]
fn splits_date_components() {
    assert_eq!(date_parts("10/05/2024"), Some((2024, 5, 10)));
    assert_eq!(date_parts("10/5/2024"), None);
}

#[test]
fn parses_decimal_comma_and_dot_styles() {
    assert_eq!(parse_amount("1.234,56"), dec("1234.56"));
    assert_eq!(parse_amount("1234.56"), dec("1234.56"));
    assert_eq!(parse_amount("1.234.567,89"), dec("1234567.89"));
    assert_eq!(parse_amount("1.234.567"), dec("1234567"));
    assert_eq!(parse_amount("500000"), dec("500000"));
}

#[test]
fn strips_currency_noise() {
    assert_eq!(parse_amount("$ 1.234,56"), dec("1234.56"));
    assert_eq!(parse_amount("12,50 EUR"), dec("12.50"));
    assert_eq!(parse_amount("-12,50"), dec("-12.50"));
}

#[test]
fn unparseable_input_yields_zero() {
    assert_eq!(parse_amount(""), Decimal::ZERO);
    assert_eq!(parse_amount("abc"), Decimal::ZERO);
    assert_eq!(parse_amount("--5"), Decimal::ZERO);
    assert_eq!(parse_amount("   "), Decimal::ZERO);
}
