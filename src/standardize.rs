//! Canonical `YYYY-MM-DD` standardization.
//!
//! Every evaluator result passes through [`standardize_date`] before it is
//! recorded, so the consensus step compares like with like. Rules are tried in
//! order and the first rule whose *shape* matches decides the outcome; a shape
//! match with out-of-range values yields an empty string rather than falling
//! through to later rules.
//!
//! ```text
//! "2021"          bare year          -> 2021-01-01
//! "7/21"          month/year         -> 2021-07-01
//! "2021.7"        year/month         -> 2021-07-01
//! "05-03-2021"    month/day/year     -> 2021-05-03
//! "25-12-2020"    day/month/year     -> 2020-12-25   (swap fallback)
//! "Q3"            no digit run       -> ""
//! anything else   fuzzy parse        -> year must be plausible
//! ```

use crate::Options;
use crate::fuzzy;
use chrono::{Datelike, NaiveDate};

/// Date used to fill components the fuzzy fallback cannot find.
const FUZZY_DEFAULT: (i32, u32, u32) = (2000, 1, 1);

/// Standardize `text` to `YYYY-MM-DD`, or return an empty string.
pub fn standardize_date(text: &str, options: &Options) -> String {
    standardize(text.trim(), options).unwrap_or_default()
}

fn standardize(s: &str, options: &Options) -> Option<String> {
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = regex!(r"^([0-9]{4})$").captures(s) {
        let year: i32 = caps[1].parse().ok()?;
        return options.is_plausible_year(year).then(|| format!("{year:04}-01-01"));
    }

    if let Some(caps) = regex!(r"^([0-9]{1,2})[-_/\\.]([0-9]{2,4})$").captures(s) {
        let month = month_value(&caps[1])?;
        let year = options.expand_year_field(&caps[2])?;
        return Some(canonical(year, month, 1));
    }

    if let Some(caps) = regex!(r"^([0-9]{4})[-_/\\.]([0-9]{1,2})$").captures(s) {
        let year = options.expand_year_field(&caps[1])?;
        let month = month_value(&caps[2])?;
        return Some(canonical(year, month, 1));
    }

    if let Some(caps) = regex!(r"^([0-9]{1,2})[-_/\\.]([0-9]{1,2})[-_/\\.]([0-9]{2,4})$").captures(s) {
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let year = options.expand_year_field(&caps[3])?;
        if (1..=12).contains(&first) && (1..=31).contains(&second) {
            return Some(canonical(year, first, second));
        }
        if (1..=12).contains(&second) && (1..=31).contains(&first) {
            return Some(canonical(year, second, first));
        }
        return None;
    }

    if !regex!(r"[0-9]{2}").is_match(s) {
        return None;
    }

    let (y, m, d) = FUZZY_DEFAULT;
    let date = fuzzy::parse(s, NaiveDate::from_ymd_opt(y, m, d)?)?;
    options.is_plausible_year(date.year()).then(|| date.format("%Y-%m-%d").to_string())
}

fn month_value(field: &str) -> Option<u32> {
    let month: u32 = field.parse().ok()?;
    (1..=12).contains(&month).then_some(month)
}

fn canonical(year: i32, month: u32, day: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standardized(text: &str) -> String {
        standardize_date(text, &Options::default())
    }

    #[test]
    fn standardize_examples() {
        // (expected, input)
        let cases: Vec<(&str, &str)> = vec![
            ("2021-01-01", "2021"),
            ("2039-01-01", "2039"),
            ("1980-01-01", "1980"),
            ("2021-07-01", "7/21"),
            ("2021-07-01", "07-2021"),
            ("1999-12-01", "12_99"),
            ("2021-07-01", "2021.7"),
            ("2021-05-03", "05-03-2021"),
            ("2020-12-25", "25-12-2020"),
            ("2005-11-01", "11-01-05"),
            ("2014-05-01", "05_01_14"),
            ("2021-03-15", "March 15, 2021"),
            ("2021-07-15", "  2021-07-15  "),
        ];
        for (expected, input) in cases {
            assert_eq!(standardized(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn rejected_inputs_are_empty() {
        let inputs = [
            "", "   ", "2040", "1979", "13-2021", "12-2040", "2021-13", "13-13-2020", "01-01-50", "Q3", "v2", "2040-01-01",
            "1979-12-31", "2021-02-30", "July 4th",
        ];
        for input in inputs {
            assert_eq!(standardized(input), "", "input {input:?}");
        }
    }

    #[test]
    fn zero_padded_years_are_literal() {
        for input in ["0004-01-21", "0021-03-15", "Jan 5 0021", "01-15-0021", "3-0021", "0021.3"] {
            assert_eq!(standardized(input), "", "input {input:?}");
        }
    }

    #[test]
    fn canonical_input_is_unchanged() {
        for input in ["2021-07-15", "1980-01-01", "2039-12-31", "2005-11-01", "2020-02-29"] {
            assert_eq!(standardized(input), input);
        }
    }

    #[test]
    fn window_is_configurable() {
        let opts = Options { min_year: 1900, max_year: 2100, ..Options::default() };
        assert_eq!(standardize_date("2040", &opts), "2040-01-01");
        assert_eq!(standardize_date("01-01-50", &opts), "1950-01-01");
    }
}
