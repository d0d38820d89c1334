//! Settings files.
//!
//! ```toml
//! [extraction]
//! min_year = 1980
//! max_year = 2039
//! century_bases = [1900, 2000]
//! delimiters = ["-", "_", "/", "\\", "."]
//! placeholder_day = "01"
//!
//! [table]
//! chunk_size = 100
//! text_column = "filename"
//! ```
//!
//! Every key is optional.

use crate::Options;
use crate::error::{DatestampError, Result};
use serde::Deserialize;
use std::path::Path;

/// Orchestrator settings for CSV processing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableOptions {
    /// Rows evaluated and written per chunk.
    pub chunk_size: usize,
    /// Header name of the column to evaluate; the last column when unset.
    pub text_column: Option<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self { chunk_size: 100, text_column: None }
    }
}

impl TableOptions {
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(invalid("chunk_size", "must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub extraction: Options,
    pub table: TableOptions,
}

impl Settings {
    /// Load and validate a TOML settings file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(raw)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.extraction.validate()?;
        self.table.validate()
    }
}

impl Options {
    /// Check the bounds are usable.
    pub fn validate(&self) -> Result<()> {
        if self.min_year > self.max_year {
            return Err(invalid(
                "min_year",
                format!("{} is greater than max_year {}", self.min_year, self.max_year),
            ));
        }
        if self.century_bases.is_empty() {
            return Err(invalid("century_bases", "at least one century is required"));
        }
        if self.delimiters.is_empty() {
            return Err(invalid("delimiters", "at least one delimiter is required"));
        }
        for (i, d) in self.delimiters.iter().enumerate() {
            if self.delimiters[..i].contains(d) {
                return Err(invalid("delimiters", format!("`{d}` listed twice")));
            }
        }
        let day_ok = (1..=2).contains(&self.placeholder_day.len())
            && self.placeholder_day.bytes().all(|b| b.is_ascii_digit())
            && self.placeholder_day.parse::<u32>().is_ok_and(|d| (1..=31).contains(&d));
        if !day_ok {
            return Err(invalid("placeholder_day", format!("`{}` is not a day of month", self.placeholder_day)));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> DatestampError {
    DatestampError::InvalidOptions { field, reason: reason.into() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Delimiter;

    #[test]
    fn empty_file_is_all_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.table.chunk_size, 100);
        assert_eq!(settings.extraction.min_year, 1980);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let raw = r#"
            [extraction]
            max_year = 2050
            delimiters = ["_", "-"]

            [table]
            text_column = "filename"
        "#;
        let settings = Settings::from_toml_str(raw).unwrap();
        assert_eq!(settings.extraction.max_year, 2050);
        assert_eq!(settings.extraction.min_year, 1980);
        assert_eq!(settings.extraction.delimiters, vec![Delimiter::Underscore, Delimiter::Hyphen]);
        assert_eq!(settings.table.text_column.as_deref(), Some("filename"));
        assert_eq!(settings.table.chunk_size, 100);
    }

    #[test]
    fn unknown_keys_and_bad_delimiters_are_config_errors() {
        assert!(matches!(Settings::from_toml_str("[extraction]\nmin_yeer = 1990"), Err(DatestampError::Config(_))));
        assert!(matches!(
            Settings::from_toml_str("[extraction]\ndelimiters = [\"+\"]"),
            Err(DatestampError::Config(_))
        ));
    }

    #[test]
    fn validation_failures() {
        let cases: Vec<(&str, &str)> = vec![
            ("min_year", "[extraction]\nmin_year = 2050"),
            ("delimiters", "[extraction]\ndelimiters = []"),
            ("delimiters", "[extraction]\ndelimiters = [\"-\", \"-\"]"),
            ("century_bases", "[extraction]\ncentury_bases = []"),
            ("placeholder_day", "[extraction]\nplaceholder_day = \"x1\""),
            ("placeholder_day", "[extraction]\nplaceholder_day = \"32\""),
            ("chunk_size", "[table]\nchunk_size = 0"),
        ];
        for (field, raw) in cases {
            match Settings::from_toml_str(raw) {
                Err(DatestampError::InvalidOptions { field: f, .. }) => assert_eq!(f, field, "{raw}"),
                other => panic!("expected InvalidOptions for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("datestamp.toml");
        std::fs::write(&path, "[table]\nchunk_size = 7\n").unwrap();
        assert_eq!(Settings::from_toml_file(&path).unwrap().table.chunk_size, 7);
        assert!(matches!(Settings::from_toml_file(dir.path().join("nope.toml")), Err(DatestampError::Io(_))));
    }
}
