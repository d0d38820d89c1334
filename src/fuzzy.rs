//! Fuzzy token-based date parsing.
//!
//! Splits the input into digit runs and words, ignores anything that is not a
//! number or a month name, then assigns numbers to year/month/day the way a
//! US-dialect general parser would:
//!
//! ```text
//! "2021-07-15"      year first     -> Y M D
//! "12/25/2020"      otherwise      -> M D Y
//! "15 March 2021"   month name     -> D (Y)
//! "25-12-2020"      month > 12     -> swap month/day
//! "20210715"        single 8-digit -> YYYYMMDD
//! ```
//!
//! Components the text does not mention are taken from a caller-supplied
//! default date. Two-digit years use a fixed 1950/2049 pivot, independent of
//! the plausible-year window.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Month names and abbreviations, longest alternative first.
pub(crate) const MONTH_PATTERN: &str = r"(?:january|jan|february|feb|march|mar|april|apr|may|june|jun|july|jul|august|aug|september|sept|sep|october|oct|november|nov|december|dec)";

pub(crate) static MONTH_NAME: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("january", 1),
        ("jan", 1),
        ("february", 2),
        ("feb", 2),
        ("march", 3),
        ("mar", 3),
        ("april", 4),
        ("apr", 4),
        ("may", 5),
        ("june", 6),
        ("jun", 6),
        ("july", 7),
        ("jul", 7),
        ("august", 8),
        ("aug", 8),
        ("september", 9),
        ("sept", 9),
        ("sep", 9),
        ("october", 10),
        ("oct", 10),
        ("november", 11),
        ("nov", 11),
        ("december", 12),
        ("dec", 12),
    ])
});

/// Month number for a (case-insensitive) month name or abbreviation.
pub(crate) fn month_from_name(word: &str) -> Option<u32> {
    MONTH_NAME.get(word.to_ascii_lowercase().as_str()).copied()
}

/// Normalize a year value to a 4-digit year.
///
/// For 2-digit years:
/// - 50-99 are interpreted as 1950-1999
/// - 0-49 are interpreted as 2000-2049
///
/// For values >= 100, returns the value as-is.
pub(crate) fn year_from(val: u32) -> i32 {
    let val = val as i32;
    if val < 100 { if val >= 50 { 1900 + val } else { 2000 + val } } else { val }
}

/// Year from a `(value, written width)` token; only short tokens pivot.
fn year_token((value, len): (u32, usize)) -> i32 {
    if len <= 2 { year_from(value) } else { value as i32 }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Number(&'a str),
    Month(u32),
}

fn tokenize(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let start = i;
        if bytes[i].is_ascii_digit() {
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            pieces.push(Piece::Number(&text[start..i]));
        } else if bytes[i].is_ascii_alphabetic() {
            while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                i += 1;
            }
            if let Some(month) = month_from_name(&text[start..i]) {
                pieces.push(Piece::Month(month));
            }
        } else {
            i += 1;
        }
    }
    pieces
}

/// Parse `text` into a date, filling unspecified parts from `default`.
///
/// Returns `None` when nothing date-like is present, when there are more
/// numbers than date components, or when the assembled date does not exist.
pub(crate) fn parse(text: &str, default: NaiveDate) -> Option<NaiveDate> {
    let pieces = tokenize(text);

    let month_name = pieces.iter().find_map(|p| match p {
        Piece::Month(m) => Some(*m),
        Piece::Number(_) => None,
    });
    let numbers: Vec<&str> = pieces
        .iter()
        .filter_map(|p| match p {
            Piece::Number(n) => Some(*n),
            Piece::Month(_) => None,
        })
        .collect();

    if let ([n], None) = (numbers.as_slice(), month_name) {
        match n.len() {
            8 => return compact(&n[0..4], &n[4..6], &n[6..8], false),
            6 => return compact(&n[0..2], &n[2..4], &n[4..6], true),
            _ => {}
        }
    }

    if numbers.is_empty() && month_name.is_none() {
        return None;
    }
    if numbers.len() > 3 || numbers.iter().any(|n| n.len() > 4) {
        return None;
    }

    let values: Vec<(u32, usize)> = numbers.iter().map(|n| n.parse().ok().map(|v| (v, n.len()))).collect::<Option<_>>()?;

    let year_idx = values.iter().position(|&(v, len)| len >= 3 || v > 31);
    let mut year = year_idx.map(|i| year_token(values[i]));
    let mut rest = values.iter().enumerate().filter(|(i, _)| Some(*i) != year_idx).map(|(_, token)| *token);

    let (mut month, mut day) = match month_name {
        Some(m) => (Some(m), rest.next().map(|(v, _)| v)),
        None => (rest.next().map(|(v, _)| v), rest.next().map(|(v, _)| v)),
    };
    if year.is_none() {
        year = rest.next().map(year_token);
    }
    if rest.next().is_some() {
        return None;
    }

    if let (Some(m), Some(d)) = (month, day) {
        if m > 12 && d <= 12 {
            (month, day) = (Some(d), Some(m));
        }
    }

    NaiveDate::from_ymd_opt(
        year.unwrap_or(default.year()),
        month.unwrap_or(default.month()),
        day.unwrap_or(default.day()),
    )
}

fn compact(year: &str, month: &str, day: &str, short_year: bool) -> Option<NaiveDate> {
    let year: u32 = year.parse().ok()?;
    let year = if short_year { year_from(year) } else { year as i32 };
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default() -> NaiveDate {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
    }

    fn iso(text: &str) -> Option<String> {
        parse(text, default()).map(|d| d.format("%Y-%m-%d").to_string())
    }

    #[test]
    fn numeric_orders() {
        let cases: Vec<(&str, &str)> = vec![
            ("2021-07-15", "2021-07-15"),
            ("2021/7/5", "2021-07-05"),
            ("12/25/2020", "2020-12-25"),
            ("11-01-05", "2005-11-01"),
            ("25-12-2020", "2020-12-25"),
            ("07-2021", "2021-07-01"),
            ("2021_07", "2021-07-01"),
            ("05-14", "2000-05-14"),
            ("20210715", "2021-07-15"),
            ("210715", "2021-07-15"),
        ];
        for (input, expected) in cases {
            assert_eq!(iso(input).as_deref(), Some(expected), "input {input:?}");
        }
    }

    #[test]
    fn month_names() {
        assert_eq!(iso("15 March 2021").as_deref(), Some("2021-03-15"));
        assert_eq!(iso("Mar 15, 2021").as_deref(), Some("2021-03-15"));
        assert_eq!(iso("SEPT 2019").as_deref(), Some("2019-09-01"));
        assert_eq!(iso("3rd of june 99").as_deref(), Some("1999-06-03"));
    }

    #[test]
    fn words_are_ignored() {
        assert_eq!(iso("filed on 2021-07-15 by legal").as_deref(), Some("2021-07-15"));
    }

    #[test]
    fn rejects_non_dates() {
        assert_eq!(iso("no numbers"), None);
        assert_eq!(iso("2021-02-30"), None);
        assert_eq!(iso("1 2 3 4"), None);
        assert_eq!(iso("123456789"), None);
        assert_eq!(iso("13-13-2020"), None);
    }

    #[test]
    fn long_year_tokens_are_literal() {
        assert_eq!(iso("0004-01-21").as_deref(), Some("0004-01-21"));
        assert_eq!(iso("Jan 5 0021").as_deref(), Some("0021-01-05"));
        assert_eq!(iso("Jan 5 21").as_deref(), Some("2021-01-05"));
    }

    #[test]
    fn two_digit_pivot() {
        assert_eq!(year_from(49), 2049);
        assert_eq!(year_from(50), 1950);
        assert_eq!(year_from(5), 2005);
        assert_eq!(year_from(2021), 2021);
    }
}
