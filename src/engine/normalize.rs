//! Evaluated-element selection and two-field expansion.

use super::locator::locate_group_traced;
use super::metrics::LocatorAttempt;
use crate::{FieldCount, GroupMatch, Options};

/// Outcome of the 3-then-2 selection policy for one input.
#[derive(Debug, Clone, Default)]
pub(crate) struct Selection {
    /// Raw 3-field group, synthesized 3-field string, or empty.
    pub element: String,
    pub two_group: bool,
    pub group: Option<GroupMatch>,
}

/// `field1 + delim + placeholder + delim + field2`.
///
/// A month/year group stands for the first day of that month, so `11-05`
/// becomes `11-01-05` and `2021_07` becomes `2021_01_07`.
pub(crate) fn expand_two_group(group: &GroupMatch, placeholder: &str) -> Option<String> {
    let [first, second] = group.fields.as_slice() else {
        return None;
    };
    let d = group.delimiter.as_char();
    Some(format!("{first}{d}{placeholder}{d}{second}"))
}

/// Pick the evaluated element for `text`.
///
/// A 3-field group is used verbatim. Otherwise a 2-field group is expanded
/// and the selection is flagged `two_group`. Otherwise the element is empty.
///
/// The 3-field request runs over every delimiter before any 2-field request,
/// so a 3-field group under a later delimiter beats a 2-field group under an
/// earlier one, wherever they sit in the input.
pub(crate) fn select_element(
    text: &str,
    options: &Options,
    mut trace: Option<&mut Vec<LocatorAttempt>>,
) -> Selection {
    if let Some(group) = locate_group_traced(text, FieldCount::Three, options, trace.as_deref_mut()) {
        if group.field_count() == 3 {
            return Selection { element: group.text.clone(), two_group: false, group: Some(group) };
        }
    }

    if let Some(group) = locate_group_traced(text, FieldCount::Two, options, trace.as_deref_mut()) {
        if let Some(element) = expand_two_group(&group, &options.placeholder_day) {
            return Selection { element, two_group: true, group: Some(group) };
        }
    }

    Selection::default()
}
