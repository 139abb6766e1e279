//! Export format selection.

use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;

/// Output framing for an export job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Newline-delimited JSON, one compact object per line.
    #[default]
    Jsonl,
    /// A single top-level JSON array.
    Json,
    /// Header plus RFC 4180 rows.
    Csv,
}

impl ExportFormat {
    /// File extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jsonl => "jsonl",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" | "ndjson" => Ok(Self::Jsonl),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(ExportError::InvalidFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_known_formats_case_insensitively() {
        assert_eq!("JSONL".parse::<ExportFormat>().unwrap(), ExportFormat::Jsonl);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("Csv".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
    }

    #[test]
    fn rejects_unknown_format_with_accepted_list() {
        let err = "xml".parse::<ExportFormat>().unwrap_err();
        assert!(err.to_string().contains("jsonl, json, or csv"));
    }
}
