// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap());
static AMOUNT_JUNK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9,.\-]").unwrap());

/// Accepted year range for entry dates.
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2100;

/// Strict DD/MM/YYYY check: two digits, two digits, four digits, literal
/// slashes, and a real calendar date within [MIN_YEAR, MAX_YEAR].
pub fn is_valid_date(text: &str) -> bool {
    date_parts(text).is_some()
}

/// Splits a strict DD/MM/YYYY string into (year, month, day), or `None` if it
/// is not a valid calendar date in the accepted range.
pub fn date_parts(text: &str) -> Option<(i32, u32, u32)> {
    if !DATE_RE.is_match(text) {
        return None;
    }
    let day: u32 = text[0..2].parse().ok()?;
    let month: u32 = text[3..5].parse().ok()?;
    let year: i32 = text[6..10].parse().ok()?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    // chrono applies the days-in-month and leap-year rules.
    NaiveDate::from_ymd_opt(year, month, day)?;
    Some((year, month, day))
}

/// Lenient amount normalization shared by interactive input and CSV import.
///
/// Everything but digits, comma, dot and minus is stripped. A comma, when
/// present, is the decimal point and dots are thousands separators; with no
/// comma, every dot but the last is a thousands separator. Unparseable input
/// yields zero rather than an error.
pub fn parse_amount(raw: &str) -> Decimal {
    let cleaned = AMOUNT_JUNK_RE.replace_all(raw, "");
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    let normalized = if cleaned.contains(',') {
        let no_dots: String = cleaned.chars().filter(|&c| c != '.').collect();
        let last = no_dots.rfind(',').unwrap();
        no_dots
            .char_indices()
            .filter_map(|(i, c)| match c {
                ',' if i == last => Some('.'),
                ',' => None,
                _ => Some(c),
            })
            .collect()
    } else if cleaned.matches('.').count() > 1 {
        let last = cleaned.rfind('.').unwrap();
        cleaned
            .char_indices()
            .filter_map(|(i, c)| (c != '.' || i == last).then_some(c))
            .collect()
    } else {
        cleaned.into_owned()
    };
    normalized.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}
