//! Run metrics and locator traces.
//!
//! Collected only by [`crate::extract_verbose_with`]; the plain extraction
//! path passes no trace sink and allocates nothing here.

use super::locator::Shape;
use crate::{Delimiter, FieldCount, FieldOrder, Range};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the verbose extraction.
    pub total: Duration,
    /// Time spent locating and selecting the evaluated element.
    pub locate: Duration,
    /// Time spent in the four evaluators (including standardization).
    pub evaluate: Duration,
    /// Time spent picking the consensus date.
    pub consensus: Duration,
}

/// Why a candidate was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Accepted(FieldOrder),
    /// Another digit touches the candidate; it is part of a longer numeral.
    DigitBordered,
    /// No field-order interpretation passed the range checks.
    Implausible,
}

/// One candidate the locator considered, in scan order.
#[derive(Debug, Clone)]
pub struct LocatorAttempt {
    pub requested: FieldCount,
    pub delimiter: Delimiter,
    pub shape: Shape,
    /// Candidate text in original orientation.
    pub candidate: String,
    /// Byte span in the original input.
    pub range: Range,
    pub outcome: AttemptOutcome,
}
