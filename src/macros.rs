#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a `PhraseRule` for the calendar-phrase evaluator.
///
/// `pattern` is a `&'static Regex` (usually from `regex!`), `status` the parse
/// status reported when the production succeeds.
#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        pattern: $pat:expr,
        status: $status:expr
        , prod: |$caps:ident, $ctx:ident| $body:block
        $(,)?
    ) => {{
        $crate::evaluators::phrase::PhraseRule {
            name: $name,
            pattern: $pat,
            status: $status,
            production: Box::new(
                move |$caps: &regex::Captures<'_>, $ctx: &$crate::Context| -> Option<chrono::NaiveDateTime> { $body },
            ),
        }
    }};
}
