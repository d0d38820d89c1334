use datestamp::{AttemptOutcome, EvaluationVerbose, Evaluator, LocatorAttempt};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(run: &EvaluationVerbose, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Evaluating: \"{}\"", run.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Signals ━━━", ansi::GRAY));
    print_signals(run, &palette);

    println!("\n{}", palette.paint("━━━ Locator ━━━", ansi::GRAY));
    if run.details.attempts.is_empty() {
        println!("{}", palette.dim("  No candidates"));
    } else {
        for attempt in run.details.attempts.iter().take(12) {
            println!("  {}", fmt_attempt(attempt, &palette));
        }
        if run.details.attempts.len() > 12 {
            println!("  {}", palette.dim(format!("... +{} more", run.details.attempts.len() - 12)));
        }
    }

    println!("\n{}", palette.paint("━━━ Evaluators ━━━", ansi::GRAY));
    print_evaluators(run, &palette);

    println!("\n{}", palette.paint("━━━ Result ━━━", ansi::GRAY));
    let record = &run.record;
    if record.evaluated.is_empty() {
        println!("{}", palette.dim("  No date-like group found"));
    } else {
        println!(
            "  {} {}  {} {}",
            palette.dim("element:"),
            palette.paint(&record.evaluated, ansi::YELLOW),
            palette.dim("│ two-field:"),
            palette.paint(record.two_group.to_string(), ansi::BLUE),
        );
    }
    let consensus = if record.consensus.is_empty() {
        palette.dim("(none)")
    } else {
        palette.bold(palette.paint(&record.consensus, ansi::GREEN))
    };
    println!("  {} {}", palette.dim("consensus:"), consensus);

    let metrics = &run.details.metrics;
    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Locate: {}  │  Evaluate: {}  │  Consensus: {}",
        palette.paint(format!("{:?}", metrics.total), ansi::GREEN),
        palette.paint(format!("{:?}", metrics.locate), ansi::CYAN),
        palette.paint(format!("{:?}", metrics.evaluate), ansi::CYAN),
        palette.dim(format!("{:?}", metrics.consensus)),
    );
    println!();
}

fn print_signals(run: &EvaluationVerbose, palette: &ansi::Palette) {
    let digits = if run.details.has_digits { palette.paint("✓ digits", ansi::GREEN) } else { palette.dim("✗ no digits") };
    let delimiters: Vec<String> = run.details.delimiters_present.iter().map(|d| format!("'{d}'")).collect();
    println!(
        "  {}  {} {}",
        digits,
        palette.dim("delimiters:"),
        if delimiters.is_empty() { palette.dim("none") } else { palette.paint(delimiters.join(" "), ansi::BLUE) }
    );
}

fn print_evaluators(run: &EvaluationVerbose, palette: &ansi::Palette) {
    for evaluator in Evaluator::ALL {
        let raw = run.details.raw.iter().find(|(e, _)| *e == evaluator).and_then(|(_, r)| r.as_deref());
        let standardized = run.record.date(evaluator);
        println!(
            "  {:<10} {} {} {}",
            palette.paint(evaluator.name(), ansi::BLUE),
            if standardized.is_empty() {
                palette.dim("✗ ----------")
            } else {
                palette.paint(format!("✓ {standardized}"), ansi::GREEN)
            },
            palette.dim("│ raw:"),
            palette.dim(raw.unwrap_or("-")),
        );
    }
}

fn fmt_attempt(attempt: &LocatorAttempt, palette: &ansi::Palette) -> String {
    let outcome = match attempt.outcome {
        AttemptOutcome::Accepted(order) => palette.paint(format!("✓ {}", order.label()), ansi::GREEN),
        AttemptOutcome::DigitBordered => palette.paint("✗ digit-bordered", ansi::RED),
        AttemptOutcome::Implausible => palette.paint("✗ implausible", ansi::RED),
    };
    format!(
        "{} {} {} {} {}",
        palette.paint(format!("{}..{}", attempt.range.start, attempt.range.end), ansi::YELLOW),
        palette.paint(format!("'{}' {:?}", attempt.delimiter, attempt.shape), ansi::BLUE),
        palette.bold(&attempt.candidate),
        palette.dim("│"),
        outcome
    )
}
