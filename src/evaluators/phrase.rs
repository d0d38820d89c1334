//! Calendar-phrase evaluator.
//!
//! A small rule table in the style of a calendar parser: every rule pairs a
//! pattern with a production that turns its captures into a datetime. Date and
//! time rules are matched independently; the leftmost date hit and the leftmost
//! time hit are combined, and the status records which parts were found. Only
//! results carrying a date component count as a date.

use super::is_digit_bounded;
use crate::Context;
use crate::fuzzy::{MONTH_PATTERN, month_from_name, year_from};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;

/// What a phrase parse found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    None,
    Date,
    Time,
    DateTime,
}

impl fmt::Display for ParseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParseStatus::None => "none",
            ParseStatus::Date => "date",
            ParseStatus::Time => "time",
            ParseStatus::DateTime => "datetime",
        };
        f.write_str(s)
    }
}

pub(crate) type Production = Box<dyn Fn(&Captures<'_>, &Context) -> Option<NaiveDateTime> + Send + Sync>;

pub(crate) struct PhraseRule {
    pub name: &'static str,
    pub pattern: &'static Regex,
    /// `Date` or `Time`; combined results are reported as `DateTime`.
    pub status: ParseStatus,
    pub production: Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PhraseMatch {
    pub datetime: NaiveDateTime,
    pub status: ParseStatus,
}

impl PhraseMatch {
    /// `YYYY-MM-DD` when the parse found a date component.
    pub fn date_string(&self) -> Option<String> {
        match self.status {
            ParseStatus::Date | ParseStatus::DateTime => Some(self.datetime.format("%Y-%m-%d").to_string()),
            ParseStatus::Time | ParseStatus::None => None,
        }
    }
}

static MONTH_DAY_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b({MONTH_PATTERN})\.?\s+([0-9]{{1,2}})(?:st|nd|rd|th)?,?\s+([0-9]{{4}})")).unwrap()
});

static DAY_MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)([0-9]{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({MONTH_PATTERN})\b\.?,?\s+([0-9]{{4}})")).unwrap()
});

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn num(caps: &Captures<'_>, i: usize) -> Option<u32> {
    caps.get(i)?.as_str().parse().ok()
}

fn year_group(caps: &Captures<'_>, i: usize) -> Option<i32> {
    let raw = caps.get(i)?.as_str();
    let value: u32 = raw.parse().ok()?;
    Some(if raw.len() == 4 { value as i32 } else { year_from(value) })
}

static RULES: Lazy<Vec<PhraseRule>> = Lazy::new(|| {
    vec![
        rule! {
            name: "year-month-day",
            pattern: regex!(r"([0-9]{4})[-_/\\.]([0-9]{1,2})[-_/\\.]([0-9]{1,2})"),
            status: ParseStatus::Date,
            prod: |caps, _ctx| {
                let date = NaiveDate::from_ymd_opt(year_group(caps, 1)?, num(caps, 2)?, num(caps, 3)?)?;
                Some(midnight(date))
            }
        },
        rule! {
            name: "month-day-year",
            pattern: regex!(r"([0-9]{1,2})[-_/\\.]([0-9]{1,2})[-_/\\.]([0-9]{4}|[0-9]{2})"),
            status: ParseStatus::Date,
            prod: |caps, _ctx| {
                let date = NaiveDate::from_ymd_opt(year_group(caps, 3)?, num(caps, 1)?, num(caps, 2)?)?;
                Some(midnight(date))
            }
        },
        rule! {
            name: "<month> <day> <year>",
            pattern: &MONTH_DAY_YEAR,
            status: ParseStatus::Date,
            prod: |caps, _ctx| {
                let month = month_from_name(caps.get(1)?.as_str())?;
                let date = NaiveDate::from_ymd_opt(year_group(caps, 3)?, month, num(caps, 2)?)?;
                Some(midnight(date))
            }
        },
        rule! {
            name: "<day> <month> <year>",
            pattern: &DAY_MONTH_YEAR,
            status: ParseStatus::Date,
            prod: |caps, _ctx| {
                let month = month_from_name(caps.get(2)?.as_str())?;
                let date = NaiveDate::from_ymd_opt(year_group(caps, 3)?, month, num(caps, 1)?)?;
                Some(midnight(date))
            }
        },
        rule! {
            name: "today / tomorrow / yesterday",
            pattern: regex!(r"(?i)\b(today|tomorrow|yesterday)\b"),
            status: ParseStatus::Date,
            prod: |caps, ctx| {
                let today = ctx.reference_time.date();
                let date = match caps.get(1)?.as_str().to_ascii_lowercase().as_str() {
                    "today" => today,
                    "tomorrow" => today + Duration::days(1),
                    _ => today - Duration::days(1),
                };
                Some(midnight(date))
            }
        },
        rule! {
            name: "hh:mm[:ss] [am|pm]",
            pattern: regex!(r"(?i)([0-9]{1,2}):([0-5][0-9])(?::([0-5][0-9]))?\s*(am|pm)?"),
            status: ParseStatus::Time,
            prod: |caps, ctx| {
                let mut hour = num(caps, 1)?;
                let minute = num(caps, 2)?;
                let second = caps.get(3).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
                match caps.get(4).map(|m| m.as_str().to_ascii_lowercase()) {
                    Some(meridiem) => {
                        if !(1..=12).contains(&hour) {
                            return None;
                        }
                        hour = match (meridiem.as_str(), hour) {
                            ("am", 12) => 0,
                            ("pm", h) if h < 12 => h + 12,
                            (_, h) => h,
                        };
                    }
                    None if hour > 23 => return None,
                    None => {}
                }
                let time = NaiveTime::from_hms_opt(hour, minute, second)?;
                Some(ctx.reference_time.date().and_time(time))
            }
        },
    ]
});

struct Hit {
    start: usize,
    len: usize,
    status: ParseStatus,
    datetime: NaiveDateTime,
}

fn collect_hits(element: &str, context: &Context) -> Vec<Hit> {
    let mut hits = Vec::new();
    for rule in RULES.iter() {
        for caps in rule.pattern.captures_iter(element) {
            let Some(whole) = caps.get(0) else { continue };
            if !is_digit_bounded(element, whole.start(), whole.end()) {
                continue;
            }
            match (rule.production)(&caps, context) {
                Some(datetime) => hits.push(Hit { start: whole.start(), len: whole.len(), status: rule.status, datetime }),
                None => tracing::trace!(rule = rule.name, text = whole.as_str(), "phrase production rejected"),
            }
        }
    }
    hits
}

fn leftmost(hits: &[Hit], status: ParseStatus) -> Option<&Hit> {
    hits.iter().filter(|h| h.status == status).min_by_key(|h| (h.start, std::cmp::Reverse(h.len)))
}

/// Parse the element as a calendar phrase. `None` when no rule produced a value.
pub(crate) fn parse_phrase(element: &str, context: &Context) -> Option<PhraseMatch> {
    let hits = collect_hits(element, context);
    let date = leftmost(&hits, ParseStatus::Date);
    let time = leftmost(&hits, ParseStatus::Time);

    match (date, time) {
        (Some(d), Some(t)) => {
            Some(PhraseMatch { datetime: d.datetime.date().and_time(t.datetime.time()), status: ParseStatus::DateTime })
        }
        (Some(d), None) => Some(PhraseMatch { datetime: d.datetime, status: ParseStatus::Date }),
        (None, Some(t)) => Some(PhraseMatch { datetime: t.datetime, status: ParseStatus::Time }),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn parse(element: &str) -> Option<PhraseMatch> {
        parse_phrase(element, &Context::default())
    }

    #[test]
    fn date_phrases() {
        // (expected, input)
        let cases: Vec<(&str, &str)> = vec![
            ("2021-07-15", "2021-07-15"),
            ("2021-07-15", "2021.7.15"),
            ("2005-11-01", "11-01-05"),
            ("2019-03-07", "3.7.2019"),
            ("2021-03-15", "March 15th, 2021"),
            ("2021-03-15", "15 Mar 2021"),
            ("2013-02-12", "due today"),
            ("2013-02-11", "Yesterday"),
        ];
        for (expected, input) in cases {
            let m = parse(input).unwrap_or_else(|| panic!("no parse for {input:?}"));
            assert_eq!(m.status, ParseStatus::Date, "input {input:?}");
            assert_eq!(m.date_string().as_deref(), Some(expected), "input {input:?}");
        }
    }

    #[test]
    fn date_and_time_combine() {
        let m = parse("minutes 2021-07-15 10:30pm").unwrap();
        assert_eq!(m.status, ParseStatus::DateTime);
        assert_eq!(m.date_string().as_deref(), Some("2021-07-15"));
        assert_eq!(m.datetime.hour(), 22);
        assert_eq!(m.datetime.minute(), 30);
    }

    #[test]
    fn time_only_is_not_a_date() {
        let m = parse("standup 9:15").unwrap();
        assert_eq!(m.status, ParseStatus::Time);
        assert_eq!(m.date_string(), None);
    }

    #[test]
    fn invalid_fields_are_rejected() {
        assert!(parse("13-45-2021").is_none());
        assert!(parse("25:61").is_none());
        assert!(parse("notes").is_none());
    }

    #[test]
    fn status_labels() {
        assert_eq!(ParseStatus::DateTime.to_string(), "datetime");
        assert_eq!(ParseStatus::None.to_string(), "none");
    }
}
