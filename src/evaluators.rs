//! The four independent date evaluators.
//!
//! Each evaluator sees only the evaluated element (never the original input)
//! and shares one contract: element in, raw date string or nothing out. Raw
//! results are standardized before they are recorded. None of them returns an
//! error; a failure inside an evaluator is an empty contribution.
//!
//! ```text
//! element ──┬─ Finder    fuzzy multi-format scan     (finder.rs)
//!           ├─ Language  chrono-english parse        (language.rs)
//!           ├─ Phrase    calendar-phrase rule table  (phrase.rs)
//!           └─ Regex     shape + field-order permute (regex_order.rs)
//!                 │
//!                 v
//!          standardize_date ──▶ consensus
//! ```
//!
//! The order of [`Evaluator::ALL`] is part of the output contract: consensus
//! ties are broken by it.

#[path = "evaluators/finder.rs"]
mod finder;
#[path = "evaluators/language.rs"]
mod language;
#[path = "evaluators/phrase.rs"]
pub(crate) mod phrase;
#[path = "evaluators/regex_order.rs"]
mod regex_order;

pub use phrase::ParseStatus;

use crate::standardize::standardize_date;
use crate::{Context, Options};
use regex::{Match, Regex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Evaluator {
    Finder,
    Language,
    Phrase,
    Regex,
}

impl Evaluator {
    /// Fixed evaluation order.
    pub const ALL: [Evaluator; 4] = [Evaluator::Finder, Evaluator::Language, Evaluator::Phrase, Evaluator::Regex];

    pub fn name(self) -> &'static str {
        match self {
            Evaluator::Finder => "finder",
            Evaluator::Language => "language",
            Evaluator::Phrase => "phrase",
            Evaluator::Regex => "regex",
        }
    }

    /// Output column holding this evaluator's standardized result.
    pub fn column(self) -> &'static str {
        match self {
            Evaluator::Finder => "datefinder_date",
            Evaluator::Language => "dateparser_date",
            Evaluator::Phrase => "parsedatetime_date",
            Evaluator::Regex => "regex_date",
        }
    }

    /// Raw result before standardization; `None` for an empty element.
    pub fn raw(self, element: &str, context: &Context, options: &Options) -> Option<String> {
        if element.trim().is_empty() {
            return None;
        }
        let raw = match self {
            Evaluator::Finder => finder::find_date(element, context, options),
            Evaluator::Language => language::parse_date(element, context),
            Evaluator::Phrase => phrase::parse_phrase(element, context).and_then(|m| m.date_string()),
            Evaluator::Regex => regex_order::permute_date(element, options),
        };
        if raw.is_none() {
            tracing::trace!(evaluator = self.name(), element, "no date");
        }
        raw
    }

    /// Standardized result, or an empty string.
    pub fn evaluate(self, element: &str, context: &Context, options: &Options) -> String {
        self.raw(element, context, options).map(|raw| standardize_date(&raw, options)).unwrap_or_default()
    }
}

/// Matches of `re` in `text` that are not glued to another ASCII digit.
pub(crate) fn digit_bounded_matches<'t>(re: &Regex, text: &'t str) -> impl Iterator<Item = Match<'t>> {
    re.find_iter(text).filter(move |m| is_digit_bounded(text, m.start(), m.end()))
}

pub(crate) fn is_digit_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| c.is_ascii_digit()) && !after.is_some_and(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_element_short_circuits() {
        let ctx = Context::default();
        let opts = Options::default();
        for evaluator in Evaluator::ALL {
            assert_eq!(evaluator.raw("", &ctx, &opts), None);
            assert_eq!(evaluator.evaluate("  ", &ctx, &opts), "");
        }
    }

    #[test]
    fn deterministic_evaluators_agree_on_numeric_elements() {
        let ctx = Context::default();
        let opts = Options::default();
        let cases: Vec<(&str, &str)> = vec![
            ("2021-07-15", "2021-07-15"),
            ("11-01-05", "2005-11-01"),
            ("03-15-21", "2021-03-15"),
            ("05_01_14", "2014-05-01"),
            ("2021_01_07", "2021-01-07"),
            ("3.7.2019", "2019-03-07"),
        ];
        for (element, expected) in cases {
            for evaluator in [Evaluator::Finder, Evaluator::Phrase, Evaluator::Regex] {
                assert_eq!(evaluator.evaluate(element, &ctx, &opts), expected, "{} on {element:?}", evaluator.name());
            }
            // The language parser may decline, but it must never disagree.
            let language = Evaluator::Language.evaluate(element, &ctx, &opts);
            assert!(language.is_empty() || language == expected, "language on {element:?} gave {language:?}");
        }
    }

    #[test]
    fn columns_follow_evaluation_order() {
        let columns: Vec<&str> = Evaluator::ALL.iter().map(|e| e.column()).collect();
        assert_eq!(columns, vec!["datefinder_date", "dateparser_date", "parsedatetime_date", "regex_date"]);
    }

    #[test]
    fn digit_bounded_matches_skip_glued_runs() {
        let re = regex!(r"[0-9]{2}-[0-9]{2}");
        let hits: Vec<&str> = digit_bounded_matches(re, "112-34 and 56-78").map(|m| m.as_str()).collect();
        assert_eq!(hits, vec!["56-78"]);
    }
}
