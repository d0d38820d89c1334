#[macro_use]
mod macros;
mod api;
mod config;
mod consensus;
mod engine;
mod error;
mod evaluators;
mod fuzzy;
pub mod logging;
mod standardize;
pub mod table;

pub use api::{
    Context, EvaluationDetails, EvaluationRecord, EvaluationVerbose, Options, extract, extract_verbose_with,
    extract_with,
};
pub use config::{Settings, TableOptions};
pub use consensus::consensus_date;
pub use engine::{AttemptOutcome, LocatorAttempt, RunMetrics, Shape, locate_group};
pub use error::{DatestampError, Result};
pub use evaluators::{Evaluator, ParseStatus};
pub use standardize::standardize_date;

use serde::Deserialize;

// --- Core types ---------------------------------------------------------------

/// Field separator inside a numeric group.
///
/// A group always uses a single delimiter; `"12-01.2021"` is never one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "char")]
pub enum Delimiter {
    Hyphen,
    Underscore,
    Slash,
    Backslash,
    Period,
}

impl Delimiter {
    /// Default precedence used by the group locator.
    pub const ALL: [Delimiter; 5] =
        [Delimiter::Hyphen, Delimiter::Underscore, Delimiter::Slash, Delimiter::Backslash, Delimiter::Period];

    pub fn as_char(self) -> char {
        match self {
            Delimiter::Hyphen => '-',
            Delimiter::Underscore => '_',
            Delimiter::Slash => '/',
            Delimiter::Backslash => '\\',
            Delimiter::Period => '.',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Delimiter::ALL.into_iter().find(|d| d.as_char() == c)
    }
}

impl TryFrom<char> for Delimiter {
    type Error = String;

    fn try_from(c: char) -> std::result::Result<Self, Self::Error> {
        Delimiter::from_char(c).ok_or_else(|| format!("unsupported delimiter '{c}' (expected one of - _ / \\ .)"))
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Number of numeric fields a locator request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCount {
    Two,
    Three,
}

impl FieldCount {
    pub fn get(self) -> usize {
        match self {
            FieldCount::Two => 2,
            FieldCount::Three => 3,
        }
    }
}

/// The interpretation that accepted a numeric group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldOrder {
    MonthDayYear,
    YearMonthDay,
    MonthYear,
    YearMonth,
}

impl FieldOrder {
    pub fn label(self) -> &'static str {
        match self {
            FieldOrder::MonthDayYear => "month-day-year",
            FieldOrder::YearMonthDay => "year-month-day",
            FieldOrder::MonthYear => "month-year",
            FieldOrder::YearMonth => "year-month",
        }
    }
}

/// Year/month/day values produced by a successful field-order interpretation.
///
/// Two-field interpretations carry `day == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub order: FieldOrder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

/// An accepted numeric group, in original (left-to-right) orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMatch {
    /// The raw substring, e.g. `"03-15-21"`.
    pub text: String,
    pub delimiter: Delimiter,
    pub fields: Vec<String>,
    /// Byte span of `text` in the scanned input.
    pub range: Range,
    pub shape: Shape,
    pub resolved: ResolvedDate,
}

impl GroupMatch {
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
