//! Group location and evaluated-element selection.
//!
//! This module is the *disambiguation core*: given a raw string, find the one
//! substring worth handing to the date evaluators.
//!
//! ## How the parts work together
//!
//! ```text
//! input ── InputSignals::scan ──┐   (trigger.rs)
//!                               │   digits? which delimiters?
//!                               v
//!              locate_group(Three)      (locator.rs)
//!                - reverse the input
//!                - delimiters in precedence order
//!                  - shapes in precedence order
//!                    - matches left to right on the reversed text
//!                      - digit-border check
//!                      - resolve_fields  (resolve.rs)
//!                               │
//!                  found? ──────┤ no
//!                    │          v
//!                    │  locate_group(Two) ─▶ expand_two_group (normalize.rs)
//!                    v          │
//!                 Selection { element, two_group, group }
//! ```
//!
//! Scanning the reversed string from its start is what makes the rightmost
//! group in the original win: the first acceptable match on the reversed text
//! is the last one in the original.
//!
//! ## Responsibilities by module
//!
//! - `trigger.rs`: cheap input classification used to skip delimiters that
//!   cannot possibly match.
//! - `locator.rs`: the reversed scan, shape regexes and candidate bookkeeping.
//! - `resolve.rs`: the ordered list of field-order interpretations.
//! - `normalize.rs`: two-field expansion and the 3-then-2 selection policy.
//! - `metrics.rs`: timing and trace data for verbose runs.
//!
//! ## Debugging
//!
//! Run with `RUST_LOG=datestamp=trace` to see every rejected candidate.

#[path = "engine/locator.rs"]
mod locator;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/resolve.rs"]
mod resolve;
#[path = "engine/trigger.rs"]
mod trigger;


pub use locator::{Shape, locate_group};
pub use metrics::{AttemptOutcome, LocatorAttempt, RunMetrics};
pub(crate) use normalize::select_element;
pub(crate) use resolve::resolve_two_fields;
pub(crate) use trigger::InputSignals;
