//! Field-order resolution.
//!
//! A numeric group such as `03-15-21` or `2021_07` can be read several ways.
//! Resolution walks a fixed, ordered list of interpretations and keeps the
//! first one whose values pass the range checks:
//!
//! ```text
//! 3 fields ──▶ MonthDayYear ──▶ YearMonthDay ──▶ rejected
//! 2 fields ──▶ MonthYear    ──▶ YearMonth    ──▶ rejected
//! ```
//!
//! Month-day-year always wins over year-month-day when both are valid; there is
//! no signal-based disambiguation. Day-month-year is never considered here (the
//! standardizer has its own swap fallback).
//!
//! Ranges: month 1..=12, day 1..=31, year inside the configured window after
//! century expansion of one- and two-digit fields
//! ([`Options::expand_year_field`]). Month lengths and leap years are
//! not checked.

use crate::{FieldOrder, Options, ResolvedDate};

const THREE_FIELD_ORDERS: [FieldOrder; 2] = [FieldOrder::MonthDayYear, FieldOrder::YearMonthDay];
const TWO_FIELD_ORDERS: [FieldOrder; 2] = [FieldOrder::MonthYear, FieldOrder::YearMonth];

/// Resolve a 2- or 3-field group; any other arity is rejected.
pub(crate) fn resolve_fields(fields: &[&str], options: &Options) -> Option<ResolvedDate> {
    let orders: &[FieldOrder] = match fields.len() {
        3 => &THREE_FIELD_ORDERS,
        2 => &TWO_FIELD_ORDERS,
        _ => return None,
    };
    if fields.iter().any(|f| f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    orders.iter().find_map(|order| interpret(*order, fields, options))
}

/// Two-field resolution on its own (used by the regex evaluator).
pub(crate) fn resolve_two_fields(first: &str, second: &str, options: &Options) -> Option<ResolvedDate> {
    resolve_fields(&[first, second], options)
}

fn interpret(order: FieldOrder, fields: &[&str], options: &Options) -> Option<ResolvedDate> {
    match (order, fields) {
        (FieldOrder::MonthDayYear, [m, d, y]) => full_date(order, m, d, y, options),
        (FieldOrder::YearMonthDay, [y, m, d]) => full_date(order, m, d, y, options),
        (FieldOrder::MonthYear, [m, y]) if is_month_len(m) && is_year_len(y) => month_year(order, m, y, options),
        (FieldOrder::YearMonth, [y, m]) if is_year_len(y) && is_month_len(m) => month_year(order, m, y, options),
        _ => None,
    }
}

fn full_date(order: FieldOrder, month: &str, day: &str, year: &str, options: &Options) -> Option<ResolvedDate> {
    let month = valid_month(month)?;
    let day: u32 = day.parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }
    let year = options.expand_year_field(year)?;
    Some(ResolvedDate { year, month, day, order })
}

fn month_year(order: FieldOrder, month: &str, year: &str, options: &Options) -> Option<ResolvedDate> {
    let month = valid_month(month)?;
    let year = options.expand_year_field(year)?;
    Some(ResolvedDate { year, month, day: 1, order })
}

fn valid_month(field: &str) -> Option<u32> {
    let month: u32 = field.parse().ok()?;
    (1..=12).contains(&month).then_some(month)
}

fn is_month_len(field: &str) -> bool {
    (1..=2).contains(&field.len())
}

fn is_year_len(field: &str) -> bool {
    field.len() == 2 || field.len() == 4
}
