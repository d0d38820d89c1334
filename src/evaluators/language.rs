//! Natural-language date parsing backed by `chrono-english`.

use crate::Context;
use chrono::{Datelike, TimeZone, Utc};
use chrono_english::{Dialect, parse_date_string};

/// Parse the whole element as an English date expression, US dialect.
///
/// Relative expressions ("tomorrow", "next friday") resolve against the
/// context's reference time. Elements using `-`, `_`, `\` or `.` between
/// fields are read in their `/`-separated US form first, then as written.
/// Results before the year 100 are dropped: they come from reading a
/// two-digit field as a literal year (`04-01-21` as year 4).
pub(crate) fn parse_date(element: &str, context: &Context) -> Option<String> {
    let now = Utc.from_utc_datetime(&context.reference_time);
    let element = element.trim();
    let slashed: String = element.chars().map(|c| if matches!(c, '-' | '_' | '\\' | '.') { '/' } else { c }).collect();

    let mut readings = vec![slashed.as_str()];
    if slashed != element {
        readings.push(element);
    }

    readings.into_iter().find_map(|reading| {
        let parsed = parse_date_string(reading, now, Dialect::Us).ok()?;
        if parsed.year() < 100 {
            tracing::trace!(reading, year = parsed.year(), "literal short year dropped");
            return None;
        }
        Some(parsed.date_naive().format("%Y-%m-%d").to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_dates() {
        let ctx = Context::default();
        assert_eq!(parse_date("2021-07-15", &ctx).as_deref(), Some("2021-07-15"));
    }

    #[test]
    fn relative_words_use_reference_time() {
        let ctx = Context::default();
        assert_eq!(parse_date("tomorrow", &ctx).as_deref(), Some("2013-02-13"));
    }

    #[test]
    fn short_year_elements_never_read_as_literal_years() {
        let ctx = Context::default();
        // Either the US reading or nothing; never year 4 or year 11.
        let cases: Vec<(&str, &str)> = vec![("04-01-21", "2021-04-01"), ("11-01-05", "2005-11-01"), ("03-15-21", "2021-03-15")];
        for (element, us_reading) in cases {
            let parsed = parse_date(element, &ctx);
            assert!(parsed.is_none() || parsed.as_deref() == Some(us_reading), "{element:?} gave {parsed:?}");
        }
    }

    #[test]
    fn gibberish_is_none() {
        let ctx = Context::default();
        assert_eq!(parse_date("quarterly report", &ctx), None);
    }
}
