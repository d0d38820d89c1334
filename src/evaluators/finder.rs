//! Fuzzy multi-format date finder.
//!
//! Scans the element with a table of date-shaped patterns, orders every hit by
//! position (longest first on ties) and returns the first hit that the fuzzy
//! parser turns into a date the standardizer accepts.

use super::digit_bounded_matches;
use crate::fuzzy::{self, MONTH_PATTERN};
use crate::standardize::standardize_date;
use crate::{Context, Options};
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

/// A named date shape the finder looks for.
struct FinderRule {
    name: &'static str,
    pattern: &'static Regex,
}

static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)[0-9]{{1,2}}(?:st|nd|rd|th)?[\s\-_./,]*(?:of\s+)?{MONTH_PATTERN}\b[\s\-_./,]*[0-9]{{2,4}}"))
        .unwrap()
});

static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i){MONTH_PATTERN}\b[\s\-_./,]*[0-9]{{1,2}}(?:st|nd|rd|th)?[\s\-_./,]+[0-9]{{2,4}}")).unwrap()
});

static MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"(?i){MONTH_PATTERN}\b[\s\-_./,]*[0-9]{{4}}")).unwrap());

fn rules() -> [FinderRule; 6] {
    [
        FinderRule { name: "yyyy-mm-dd", pattern: regex!(r"[0-9]{4}[-_/\\.][0-9]{1,2}[-_/\\.][0-9]{1,2}") },
        FinderRule { name: "mm-dd-yy(yy)", pattern: regex!(r"[0-9]{1,2}[-_/\\.][0-9]{1,2}[-_/\\.][0-9]{2,4}") },
        FinderRule { name: "yyyymmdd", pattern: regex!(r"[0-9]{8}") },
        FinderRule { name: "dd month yyyy", pattern: &DAY_MONTH_YEAR },
        FinderRule { name: "month dd yyyy", pattern: &MONTH_DAY_YEAR },
        FinderRule { name: "month yyyy", pattern: &MONTH_YEAR },
    ]
}

struct Hit<'t> {
    rule: &'static str,
    start: usize,
    text: &'t str,
}

pub(crate) fn find_date(element: &str, context: &Context, options: &Options) -> Option<String> {
    let mut hits: Vec<Hit<'_>> = Vec::new();
    for rule in rules() {
        hits.extend(
            digit_bounded_matches(rule.pattern, element).map(|m| Hit { rule: rule.name, start: m.start(), text: m.as_str() }),
        );
    }
    hits.sort_by_key(|h| (h.start, std::cmp::Reverse(h.text.len())));

    // Missing components come from the start of the reference year.
    let default = NaiveDate::from_ymd_opt(context.reference_time.year(), 1, 1)?;
    hits.iter().find_map(|hit| {
        let date = fuzzy::parse(hit.text, default)?;
        let iso = standardize_date(&date.format("%Y-%m-%d").to_string(), options);
        if iso.is_empty() {
            tracing::trace!(rule = hit.rule, hit = hit.text, "finder hit not standardizable");
            return None;
        }
        Some(iso)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(element: &str) -> Option<String> {
        find_date(element, &Context::default(), &Options::default())
    }

    #[test]
    fn finds_numeric_shapes() {
        assert_eq!(find("2021-07-15").as_deref(), Some("2021-07-15"));
        assert_eq!(find("11-01-05").as_deref(), Some("2005-11-01"));
        assert_eq!(find("20210715").as_deref(), Some("2021-07-15"));
    }

    #[test]
    fn finds_month_name_shapes() {
        assert_eq!(find("signed 15 March 2021").as_deref(), Some("2021-03-15"));
        assert_eq!(find("Mar 15, 2021 minutes").as_deref(), Some("2021-03-15"));
        assert_eq!(find("budget june 2019").as_deref(), Some("2019-06-01"));
    }

    #[test]
    fn leftmost_acceptable_hit_wins() {
        // The first hit has an implausible year, so the next one is used.
        assert_eq!(find("01-01-1970 and 02-02-2002").as_deref(), Some("2002-02-02"));
    }

    #[test]
    fn nothing_date_shaped() {
        assert_eq!(find("v12"), None);
        assert_eq!(find("123456789"), None);
    }
}
