//! Consensus over the four standardized evaluator results.

/// Most frequent well-formed `YYYY-MM-DD` among `dates`.
///
/// Ties go to the value seen first, so callers must pass results in evaluator
/// order (finder, language, phrase, regex). With `two_group` set the winner is
/// reduced to month precision (`YYYY-MM-01`), whatever day the evaluators
/// produced. Returns an empty string when no input is well-formed.
pub fn consensus_date<S: AsRef<str>>(dates: &[S], two_group: bool) -> String {
    let mut tally: Vec<(&str, usize)> = Vec::new();
    for date in dates {
        let date = date.as_ref().trim();
        if !regex!(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").is_match(date) {
            continue;
        }
        match tally.iter_mut().find(|(seen, _)| *seen == date) {
            Some((_, count)) => *count += 1,
            None => tally.push((date, 1)),
        }
    }

    let mut winner: Option<(&str, usize)> = None;
    for (date, count) in tally {
        if winner.is_none_or(|(_, best)| count > best) {
            winner = Some((date, count));
        }
    }

    match winner {
        Some((date, _)) if two_group => format!("{}-01", &date[..7]),
        Some((date, _)) => date.to_string(),
        None => String::new(),
    }
}
