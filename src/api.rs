use crate::consensus::consensus_date;
use crate::engine::{self, LocatorAttempt, RunMetrics};
use crate::evaluators::Evaluator;
use crate::standardize::standardize_date;
use crate::{Delimiter, GroupMatch};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use std::time::Instant;

/// Evaluation context.
///
/// This holds the environment needed by evaluators that understand relative
/// phrases (like "yesterday"). Numeric groups never depend on it.
#[derive(Debug, Clone)]
pub struct Context {
    /// Reference datetime used to resolve relative expressions.
    pub reference_time: NaiveDateTime,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            let date = NaiveDate::from_ymd_opt(2013, 2, 12).unwrap();
            let time = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
            Self { reference_time: NaiveDateTime::new(date, time) }
        } else {
            Self { reference_time: Local::now().naive_local() }
        }
    }
}

/// Options that affect extraction and standardization.
///
/// Every bound the heuristics rely on lives here rather than inline. Loaded
/// from the `[extraction]` table of a settings file; missing keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Smallest plausible year (inclusive).
    pub min_year: i32,
    /// Largest plausible year (inclusive).
    pub max_year: i32,
    /// Centuries tried, in order, when expanding a two-digit year.
    pub century_bases: Vec<i32>,
    /// Delimiter precedence for the group locator.
    pub delimiters: Vec<Delimiter>,
    /// Day inserted between the fields of a two-field group.
    pub placeholder_day: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            min_year: 1980,
            max_year: 2039,
            century_bases: vec![1900, 2000],
            delimiters: Delimiter::ALL.to_vec(),
            placeholder_day: "01".to_string(),
        }
    }
}

impl Options {
    /// Whether `year` falls inside the configured window.
    pub fn is_plausible_year(&self, year: i32) -> bool {
        (self.min_year..=self.max_year).contains(&year)
    }

    /// Turn a raw year field into a plausible four-digit year.
    ///
    /// Values below 100 are tried against each century base in order; the
    /// first plausible result wins. Larger values must already be plausible.
    pub fn expand_year(&self, raw: u32) -> Option<i32> {
        let raw = i32::try_from(raw).ok()?;
        if raw < 100 {
            return self.century_bases.iter().map(|base| base + raw).find(|y| self.is_plausible_year(*y));
        }
        self.is_plausible_year(raw).then_some(raw)
    }

    /// [`Options::expand_year`] for a digit field, keyed on its written width.
    ///
    /// Only one- and two-digit fields are century-expanded; `"0021"` is the
    /// year 21 and is never plausible.
    pub fn expand_year_field(&self, field: &str) -> Option<i32> {
        let value: u32 = field.parse().ok()?;
        if field.len() <= 2 {
            return self.expand_year(value);
        }
        let year = i32::try_from(value).ok()?;
        self.is_plausible_year(year).then_some(year)
    }
}

/// The fixed output record for one input string.
///
/// Empty strings mean "nothing found"; a record with every field empty is a
/// valid outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationRecord {
    /// Substring handed to the evaluators (synthesized for two-field groups).
    pub evaluated: String,
    pub finder: String,
    pub language: String,
    pub phrase: String,
    pub regex: String,
    pub consensus: String,
    /// Set when `evaluated` was expanded from a month/year group.
    pub two_group: bool,
}

impl EvaluationRecord {
    /// Output column names, in the order of [`EvaluationRecord::fields`].
    pub const COLUMNS: [&'static str; 6] = [
        "Evaluated string element",
        "datefinder_date",
        "dateparser_date",
        "parsedatetime_date",
        "regex_date",
        "consensus_date",
    ];

    pub fn fields(&self) -> [&str; 6] {
        [&self.evaluated, &self.finder, &self.language, &self.phrase, &self.regex, &self.consensus]
    }

    /// Standardized result of one evaluator.
    pub fn date(&self, evaluator: Evaluator) -> &str {
        match evaluator {
            Evaluator::Finder => &self.finder,
            Evaluator::Language => &self.language,
            Evaluator::Phrase => &self.phrase,
            Evaluator::Regex => &self.regex,
        }
    }

    fn set_date(&mut self, evaluator: Evaluator, value: String) {
        match evaluator {
            Evaluator::Finder => self.finder = value,
            Evaluator::Language => self.language = value,
            Evaluator::Phrase => self.phrase = value,
            Evaluator::Regex => self.regex = value,
        }
    }
}

/// Additional details returned by [`extract_verbose_with`].
#[derive(Debug, Clone)]
pub struct EvaluationDetails {
    /// Whether the input had any ASCII digit at all.
    pub has_digits: bool,
    /// Delimiters (in precedence order) present in the input.
    pub delimiters_present: Vec<Delimiter>,
    /// The accepted group, if any.
    pub group: Option<GroupMatch>,
    /// Every candidate the locator looked at, in scan order.
    pub attempts: Vec<LocatorAttempt>,
    /// Raw (pre-standardization) evaluator outputs, in evaluator order.
    pub raw: Vec<(Evaluator, Option<String>)>,
    pub metrics: RunMetrics,
}

/// Result from [`extract_verbose_with`].
#[derive(Debug, Clone)]
pub struct EvaluationVerbose {
    pub text: String,
    pub record: EvaluationRecord,
    pub details: EvaluationDetails,
}

/// Extract using a default [`Context`] and [`Options`].
///
/// # Example
/// ```
/// use datestamp::extract;
///
/// let rec = extract("Report_2021-07-15_final.xlsx");
/// assert_eq!(rec.evaluated, "2021-07-15");
/// assert_eq!(rec.consensus, "2021-07-15");
/// ```
pub fn extract(text: &str) -> EvaluationRecord {
    extract_with(text, &Context::default(), &Options::default())
}

/// Extract with the provided `context`/`options`.
pub fn extract_with(text: &str, context: &Context, options: &Options) -> EvaluationRecord {
    let selection = engine::select_element(text, options, None);

    let mut record = EvaluationRecord {
        evaluated: selection.element,
        two_group: selection.two_group,
        ..EvaluationRecord::default()
    };
    for evaluator in Evaluator::ALL {
        let value = evaluator.evaluate(&record.evaluated, context, options);
        record.set_date(evaluator, value);
    }
    record.consensus = consensus_date(&[&record.finder, &record.language, &record.phrase, &record.regex], record.two_group);

    tracing::debug!(input = text, evaluated = %record.evaluated, consensus = %record.consensus, "extracted");
    record
}

/// Extract with `context`/`options` and return the locator trace and timings.
///
/// The default [`extract_with`] path does not allocate these traces.
pub fn extract_verbose_with(text: &str, context: &Context, options: &Options) -> EvaluationVerbose {
    let started = Instant::now();
    let signals = engine::InputSignals::scan(text);

    let mut attempts = Vec::new();
    let locate_started = Instant::now();
    let selection = engine::select_element(text, options, Some(&mut attempts));
    let locate = locate_started.elapsed();

    let mut record = EvaluationRecord {
        evaluated: selection.element,
        two_group: selection.two_group,
        ..EvaluationRecord::default()
    };

    let evaluate_started = Instant::now();
    let mut raw = Vec::with_capacity(Evaluator::ALL.len());
    for evaluator in Evaluator::ALL {
        let raw_value = evaluator.raw(&record.evaluated, context, options);
        let value = raw_value.as_deref().map(|r| standardize_date(r, options)).unwrap_or_default();
        raw.push((evaluator, raw_value));
        record.set_date(evaluator, value);
    }
    let evaluate = evaluate_started.elapsed();

    let consensus_started = Instant::now();
    record.consensus = consensus_date(&[&record.finder, &record.language, &record.phrase, &record.regex], record.two_group);
    let consensus = consensus_started.elapsed();

    let details = EvaluationDetails {
        has_digits: signals.has_digits(),
        delimiters_present: options.delimiters.iter().copied().filter(|d| signals.contains_delimiter(*d)).collect(),
        group: selection.group,
        attempts,
        raw,
        metrics: RunMetrics { total: started.elapsed(), locate, evaluate, consensus },
    };

    EvaluationVerbose { text: text.to_string(), record, details }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_year_tries_centuries_in_order() {
        let opts = Options::default();
        assert_eq!(opts.expand_year(99), Some(1999));
        assert_eq!(opts.expand_year(5), Some(2005));
        assert_eq!(opts.expand_year(21), Some(2021));
        // 1950 and 2050 are both outside the window.
        assert_eq!(opts.expand_year(50), None);
        assert_eq!(opts.expand_year(2021), Some(2021));
        assert_eq!(opts.expand_year(2040), None);
        assert_eq!(opts.expand_year(1979), None);
        assert_eq!(opts.expand_year(123), None);
    }

    #[test]
    fn expand_year_field_uses_written_width() {
        let opts = Options::default();
        assert_eq!(opts.expand_year_field("05"), Some(2005));
        assert_eq!(opts.expand_year_field("5"), Some(2005));
        assert_eq!(opts.expand_year_field("2021"), Some(2021));
        assert_eq!(opts.expand_year_field("0021"), None);
        assert_eq!(opts.expand_year_field("005"), None);
        assert_eq!(opts.expand_year_field(""), None);
    }

    #[test]
    fn narrower_window_changes_expansion() {
        let opts = Options { min_year: 1990, max_year: 1999, ..Options::default() };
        assert_eq!(opts.expand_year(95), Some(1995));
        assert_eq!(opts.expand_year(5), None);
    }

    #[test]
    fn extract_with_fills_every_field() {
        let rec = extract_with("Report_2021-07-15_final.xlsx", &Context::default(), &Options::default());

        assert_eq!(rec.evaluated, "2021-07-15");
        assert_eq!(rec.finder, "2021-07-15");
        assert_eq!(rec.phrase, "2021-07-15");
        assert_eq!(rec.regex, "2021-07-15");
        assert!(matches!(rec.language.as_str(), "" | "2021-07-15"), "language {:?}", rec.language);
        assert_eq!(rec.consensus, "2021-07-15");
        assert!(!rec.two_group);
    }

    #[test]
    fn month_year_group_language_column() {
        let rec = extract_with("Contract_Smith-04-21.pdf", &Context::default(), &Options::default());
        assert_eq!(rec.evaluated, "04-01-21");
        assert!(matches!(rec.language.as_str(), "" | "2021-04-01"), "language {:?}", rec.language);
        assert_eq!(rec.consensus, "2021-04-01");
    }

    #[test]
    fn verbose_includes_trace_and_metrics() {
        let res = extract_verbose_with("Analysis_Contracts-11-05.pdf", &Context::default(), &Options::default());

        assert_eq!(res.text, "Analysis_Contracts-11-05.pdf");
        assert_eq!(res.record.evaluated, "11-01-05");
        assert!(res.record.two_group);
        assert!(res.details.has_digits);
        assert_eq!(res.details.delimiters_present, vec![Delimiter::Hyphen, Delimiter::Underscore, Delimiter::Period]);
        assert!(!res.details.attempts.is_empty());
        assert_eq!(res.details.raw.len(), 4);
        assert!(res.details.metrics.locate <= res.details.metrics.total);

        let group = res.details.group.expect("group");
        assert_eq!(group.text, "11-05");
        assert_eq!(group.resolved.year, 2005);
    }

    #[test]
    fn verbose_and_plain_agree() {
        for input in ["Contract_Smith-04-21.pdf", "2020-01-01_report_03-15-21.pdf", "nothing", ""] {
            let plain = extract_with(input, &Context::default(), &Options::default());
            let verbose = extract_verbose_with(input, &Context::default(), &Options::default());
            assert_eq!(plain, verbose.record, "input {input:?}");
        }
    }
}
