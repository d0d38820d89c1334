//! Regex shape scan with field-order permutation.
//!
//! Independent of the group locator: it re-detects numeric groups in the
//! element with its own shape precedence, reading left to right, and accepts
//! any of `- _ / \ .` between fields (mixed delimiters included).
//!
//! ```text
//! 1. YYYY D M D          year first
//! 2. M D D D YY(YY)      year last
//! 3. M D YY(YY)          month-year
//! 4. YY(YY) D M          year-month
//! 5. YYYY                bare year
//! ```
//!
//! The first match of the first shape that yields a valid date wins.

use crate::engine::resolve_two_fields;
use crate::Options;
use chrono::NaiveDate;
use regex::{Captures, Regex};

fn shapes() -> [&'static Regex; 5] {
    [
        regex!(r"([0-9]{4})[-_/\\.]([0-9]{1,2})[-_/\\.]([0-9]{1,2})"),
        regex!(r"([0-9]{1,2})[-_/\\.]([0-9]{1,2})[-_/\\.]([0-9]{2,4})"),
        regex!(r"([0-9]{1,2})[-_/\\.]([0-9]{2,4})"),
        regex!(r"([0-9]{2,4})[-_/\\.]([0-9]{1,2})"),
        regex!(r"([0-9]{4})"),
    ]
}

pub(crate) fn permute_date(element: &str, options: &Options) -> Option<String> {
    shapes().into_iter().find_map(|re| re.captures_iter(element).find_map(|caps| interpret(&caps, options)))
}

fn interpret(caps: &Captures<'_>, options: &Options) -> Option<String> {
    let groups: Vec<&str> = caps.iter().skip(1).flatten().map(|m| m.as_str()).collect();
    match groups.as_slice() {
        [first, second, third] => {
            if first.len() == 4 {
                full_date(first.parse().ok()?, second, third, options)
            } else if third.len() == 4 {
                full_date(third.parse().ok()?, first, second, options)
            } else if third.len() == 2 {
                full_date(options.expand_year_field(third)?, first, second, options)
            } else {
                None
            }
        }
        [first, second] => {
            let resolved = resolve_two_fields(first, second, options)?;
            Some(format!("{:04}-{:02}-01", resolved.year, resolved.month))
        }
        [year] => {
            let year: i32 = year.parse().ok()?;
            options.is_plausible_year(year).then(|| format!("{year:04}-01-01"))
        }
        _ => None,
    }
}

fn full_date(year: i32, month: &str, day: &str, options: &Options) -> Option<String> {
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || !options.is_plausible_year(year) {
        return None;
    }
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    Some(date.format("%Y-%m-%d").to_string())
}
