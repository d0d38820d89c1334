mod debug_report;

use chrono::NaiveDateTime;
use clap::{CommandFactory, Parser};
use datestamp::{Context, DatestampError, Settings, extract_verbose_with, logging, table};
use std::io::{self, IsTerminal};
use std::path::PathBuf;

/// Extract dates embedded in filenames listed in a CSV file.
#[derive(Debug, Parser)]
#[command(name = "datestamp", version)]
struct Cli {
    /// CSV file; the last column is evaluated unless --column is given.
    input: Option<PathBuf>,

    /// Evaluate a single string and print a report instead of processing a file.
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Header name of the column to evaluate.
    #[arg(long)]
    column: Option<String>,

    /// Rows per written chunk.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Smallest plausible year.
    #[arg(long)]
    min_year: Option<i32>,

    /// Largest plausible year.
    #[arg(long)]
    max_year: Option<i32>,

    /// TOML settings file with [extraction] and [table] sections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference time for relative phrases, YYYY-MM-DDTHH:MM:SS (default: now).
    #[arg(long, value_parser = parse_reference)]
    reference: Option<NaiveDateTime>,

    /// Force ANSI color output.
    #[arg(long, overrides_with = "no_color")]
    color: bool,

    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,

    /// Debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> datestamp::Result<()> {
    let settings = load_settings(&cli)?;
    let context = match cli.reference {
        Some(reference_time) => Context { reference_time },
        None => Context::default(),
    };

    if let Some(text) = &cli.text {
        let color = if cli.no_color { false } else { cli.color || io::stdout().is_terminal() };
        let run = extract_verbose_with(text, &context, &settings.extraction);
        debug_report::print_run(&run, color);
        return Ok(());
    }

    let Some(input) = &cli.input else {
        // Nothing to do is not a failure.
        let _ = Cli::command().print_help();
        return Ok(());
    };

    match table::process_file(input, &settings, &context) {
        Ok(summary) => {
            if let Some(output) = &summary.output {
                println!("All done. Results written to {}", output.display());
            }
            Ok(())
        }
        Err(err @ DatestampError::MissingInputFile { .. }) => {
            println!("{err}");
            Ok(())
        }
        Err(err) => Err(err),
    }
}

fn load_settings(cli: &Cli) -> datestamp::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_toml_file(path)?,
        None => Settings::default(),
    };

    if let Some(min_year) = cli.min_year {
        settings.extraction.min_year = min_year;
    }
    if let Some(max_year) = cli.max_year {
        settings.extraction.max_year = max_year;
    }
    if let Some(chunk_size) = cli.chunk_size {
        settings.table.chunk_size = chunk_size;
    }
    if let Some(column) = &cli.column {
        settings.table.text_column = Some(column.clone());
    }

    if let Err(err) = settings.validate() {
        tracing::warn!(%err, "rejected settings");
        return Err(err);
    }
    Ok(settings)
}

fn parse_reference(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .map_err(|_| format!("invalid reference '{value}' (expected YYYY-MM-DDTHH:MM:SS)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_file_values() {
        let cli = Cli::parse_from(["datestamp", "--min-year", "1990", "--chunk-size", "5", "--column", "name", "in.csv"]);
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.extraction.min_year, 1990);
        assert_eq!(settings.extraction.max_year, 2039);
        assert_eq!(settings.table.chunk_size, 5);
        assert_eq!(settings.table.text_column.as_deref(), Some("name"));
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let cli = Cli::parse_from(["datestamp", "--min-year", "2050", "in.csv"]);
        assert!(matches!(load_settings(&cli), Err(DatestampError::InvalidOptions { field: "min_year", .. })));
    }

    #[test]
    fn reference_format() {
        assert!(parse_reference("2013-02-12T04:30:00").is_ok());
        assert!(parse_reference("2013-02-12").is_err());
    }

    #[test]
    fn text_and_input_conflict() {
        assert!(Cli::try_parse_from(["datestamp", "--text", "a_01-05", "in.csv"]).is_err());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let cli = Cli::parse_from(["datestamp", "/definitely/not/here.csv"]);
        assert!(run(cli).is_ok());
    }
}
