//! Rightmost numeric-group location.
//!
//! The locator answers one question: *which delimiter-joined run of 2 or 3
//! numeric fields, furthest to the right, reads as a plausible date?*
//!
//! ## Scan order
//!
//! ```text
//! for delimiter in options.delimiters          (precedence: - _ / \ .)
//!   for shape in shapes(requested count)       (fixed precedence)
//!     for match in shape_regex.find_iter(reversed input)
//!       reject if a digit borders the match
//!       reject if no field order resolves      (resolve.rs)
//!       accept  ──▶ return
//! ```
//!
//! The shapes are matched against the *reversed* input. Matches are leftmost
//! and non-overlapping on the reversed text, so the first accepted match is the
//! rightmost one in the original. A delimiter or shape earlier in precedence
//! still beats a later one that would sit further right.
//!
//! Because the match text is ASCII, its byte span in the reversed string maps
//! directly onto the original: `start = len - rev_end`, `end = len - rev_start`.
//! Candidates are always read from the original input, never un-reversed.
//!
//! ## Invariants
//!
//! - Every field is a non-empty run of ASCII digits.
//! - A shape regex only contains one delimiter character, so mixed-delimiter
//!   runs like `12-01.2021` can never form a single group.
//! - An accepted group is never bordered by an ASCII digit, so `20120108`
//!   is never split into smaller groups.

use super::metrics::{AttemptOutcome, LocatorAttempt};
use super::resolve::resolve_fields;
use super::trigger::InputSignals;
use crate::{Delimiter, FieldCount, GroupMatch, Options, Range};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Structural shape of a candidate group, in original orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// 2-4, 1-2, 1-2 digits (`2021-07-15`).
    LongShortShort,
    /// 1-2, 1-2, 2-4 digits (`03-15-21`).
    ShortShortLong,
    /// 2-4, 1-2 digits (`2021_07`).
    LongShort,
    /// 1-2, 2-4 digits (`4-2021`).
    ShortLong,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::LongShortShort, Shape::ShortShortLong, Shape::LongShort, Shape::ShortLong];

    /// Shapes for a request, in precedence order.
    pub fn for_count(count: FieldCount) -> &'static [Shape] {
        match count {
            FieldCount::Three => &Shape::ALL[..2],
            FieldCount::Two => &Shape::ALL[2..],
        }
    }

    pub fn field_count(self) -> FieldCount {
        match self {
            Shape::LongShortShort | Shape::ShortShortLong => FieldCount::Three,
            Shape::LongShort | Shape::ShortLong => FieldCount::Two,
        }
    }

    /// Field widths as they appear in the *reversed* input.
    fn reversed_widths(self) -> &'static [&'static str] {
        match self {
            Shape::LongShortShort => &["{1,2}", "{1,2}", "{2,4}"],
            Shape::ShortShortLong => &["{2,4}", "{1,2}", "{1,2}"],
            Shape::LongShort => &["{1,2}", "{2,4}"],
            Shape::ShortLong => &["{2,4}", "{1,2}"],
        }
    }

    fn reversed_pattern(self, delimiter: Delimiter) -> String {
        let delim = regex::escape(&delimiter.to_string());
        self.reversed_widths().iter().map(|w| format!("[0-9]{w}")).collect::<Vec<_>>().join(&delim)
    }
}

static SHAPE_REGEXES: Lazy<HashMap<(Delimiter, Shape), Regex>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for delimiter in Delimiter::ALL {
        for shape in Shape::ALL {
            let re = Regex::new(&shape.reversed_pattern(delimiter)).unwrap();
            map.insert((delimiter, shape), re);
        }
    }
    map
});

/// Find the rightmost accepted group with `count` fields.
///
/// Returns `None` for empty input, input without ASCII digits, or when every
/// candidate is digit-bordered or implausible.
pub fn locate_group(text: &str, count: FieldCount, options: &Options) -> Option<GroupMatch> {
    locate_group_traced(text, count, options, None)
}

/// Like [`locate_group`], recording every candidate into `trace` when given.
pub(crate) fn locate_group_traced(
    text: &str,
    count: FieldCount,
    options: &Options,
    mut trace: Option<&mut Vec<LocatorAttempt>>,
) -> Option<GroupMatch> {
    let signals = InputSignals::scan(text);
    if !signals.has_digits() {
        return None;
    }

    let reversed: String = text.chars().rev().collect();
    let len = text.len();

    for &delimiter in &options.delimiters {
        if !signals.contains_delimiter(delimiter) {
            continue;
        }

        for &shape in Shape::for_count(count) {
            let Some(re) = SHAPE_REGEXES.get(&(delimiter, shape)) else {
                continue;
            };

            for m in re.find_iter(&reversed) {
                let range = Range { start: len - m.end(), end: len - m.start() };
                let candidate = &text[range.start..range.end];

                let (outcome, accepted) = if digit_bordered(text, &range) {
                    (AttemptOutcome::DigitBordered, None)
                } else {
                    let fields: Vec<&str> = candidate.split(delimiter.as_char()).collect();
                    match resolve_fields(&fields, options) {
                        Some(resolved) => (AttemptOutcome::Accepted(resolved.order), Some((fields, resolved))),
                        None => (AttemptOutcome::Implausible, None),
                    }
                };

                if let Some(sink) = trace.as_mut() {
                    sink.push(LocatorAttempt {
                        requested: count,
                        delimiter,
                        shape,
                        candidate: candidate.to_string(),
                        range: range.clone(),
                        outcome,
                    });
                }

                let Some((fields, resolved)) = accepted else {
                    tracing::trace!(candidate, ?delimiter, ?shape, ?outcome, "candidate rejected");
                    continue;
                };

                return Some(GroupMatch {
                    text: candidate.to_string(),
                    delimiter,
                    fields: fields.into_iter().map(str::to_string).collect(),
                    range,
                    shape,
                    resolved,
                });
            }
        }
    }

    None
}

fn digit_bordered(text: &str, range: &Range) -> bool {
    let before = text[..range.start].chars().next_back();
    let after = text[range.end..].chars().next();
    before.is_some_and(|c| c.is_ascii_digit()) || after.is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldOrder;

    fn locate(text: &str, count: FieldCount) -> Option<String> {
        locate_group(text, count, &Options::default()).map(|g| g.text)
    }

    #[test]
    fn rightmost_three_field_group_wins() {
        assert_eq!(locate("2020-01-01_report_03-15-21.pdf", FieldCount::Three).as_deref(), Some("03-15-21"));
        assert_eq!(locate("Report_2021-07-15_final.xlsx", FieldCount::Three).as_deref(), Some("2021-07-15"));
    }

    #[test]
    fn span_points_into_original_input() {
        let text = "αβ_2020-01-01_report_03-15-21.pdf";
        let group = locate_group(text, FieldCount::Three, &Options::default()).unwrap();
        assert_eq!(&text[group.range.start..group.range.end], "03-15-21");
        assert_eq!(group.fields, vec!["03", "15", "21"]);
        assert_eq!(group.delimiter, Delimiter::Hyphen);
        assert_eq!(group.shape, Shape::LongShortShort);
        assert_eq!(group.resolved.order, FieldOrder::MonthDayYear);
        assert_eq!(group.resolved.year, 2021);
    }

    #[test]
    fn delimiter_precedence_beats_position() {
        // The underscore group is further right, but hyphen comes first.
        assert_eq!(locate("2019-03-04 copy 05_06_2020", FieldCount::Three).as_deref(), Some("2019-03-04"));
    }

    #[test]
    fn digit_bordered_runs_are_not_split() {
        assert_eq!(locate("scan_20120108.pdf", FieldCount::Three), None);
        assert_eq!(locate("scan_20120108.pdf", FieldCount::Two), None);
        assert_eq!(locate("id-123456-7", FieldCount::Two), None);
    }

    #[test]
    fn implausible_candidates_fall_through_to_the_left() {
        // 45-67-89 cannot be a date; the earlier group can.
        assert_eq!(locate("03-15-2021 then 45-67-89", FieldCount::Three).as_deref(), Some("03-15-2021"));
        assert_eq!(locate("batch 12-2040", FieldCount::Two), None);
        assert_eq!(locate("batch 12-1979", FieldCount::Two), None);
    }

    #[test]
    fn mixed_delimiters_never_form_one_group() {
        assert_eq!(locate("12-01.2021", FieldCount::Three), None);
        let two = locate("12-01.2021", FieldCount::Two).unwrap();
        assert!(!(two.contains('-') && two.contains('.')));
        assert_eq!(two, "12-01");
    }

    #[test]
    fn two_field_groups() {
        assert_eq!(locate("Analysis_Contracts-11-05.pdf", FieldCount::Two).as_deref(), Some("11-05"));
        assert_eq!(locate("Analysis_05_14.XLSX", FieldCount::Two).as_deref(), Some("05_14"));
        assert_eq!(locate("budget 2021.07", FieldCount::Two).as_deref(), Some("2021.07"));
    }

    #[test]
    fn no_digits_or_empty_input() {
        assert_eq!(locate("", FieldCount::Three), None);
        assert_eq!(locate("no_numbers_here.txt", FieldCount::Two), None);
    }

    #[test]
    fn custom_delimiter_list_is_respected() {
        let opts = Options { delimiters: vec![Delimiter::Underscore], ..Options::default() };
        let group = locate_group("2019-03-04 copy 05_06_2020", FieldCount::Three, &opts).unwrap();
        assert_eq!(group.text, "05_06_2020");
    }

    #[test]
    fn trace_records_rejections_in_scan_order() {
        let mut trace = Vec::new();
        let found = locate_group_traced("03-15-2021 then 45-67-89", FieldCount::Three, &Options::default(), Some(&mut trace));
        assert_eq!(found.map(|g| g.text).as_deref(), Some("03-15-2021"));
        assert!(trace.iter().any(|a| a.candidate == "45-67-89" && a.outcome == AttemptOutcome::Implausible));
        assert!(matches!(trace.last().map(|a| a.outcome), Some(AttemptOutcome::Accepted(FieldOrder::MonthDayYear))));
    }
}
