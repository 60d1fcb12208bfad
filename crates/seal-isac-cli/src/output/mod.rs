//! Output formatting for different formats.

use clap::ValueEnum;
use colored::Colorize;
use seal_isac::{Content, ContentKind, Status};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `[+]` progress lines
    #[default]
    Pretty,
    /// JSON output
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => anyhow::bail!(
                "Unknown output format: {}\n\
                 Valid formats: pretty, json",
                s
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Machine-readable status line
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusReport {
    /// Content value as given
    pub content: String,
    /// STIX type of the content
    pub kind: ContentKind,
    /// Three-state status
    pub status: Status,
}

impl StatusReport {
    /// Report for `content`
    pub fn new(content: &Content, status: Status) -> Self {
        Self {
            content: content.value.clone(),
            kind: content.kind,
            status,
        }
    }
}

/// Print a `[+]` progress line
pub fn progress(message: impl std::fmt::Display) {
    println!("{} {message}", "[+]".green().bold());
}

/// Colored status word
pub fn status_word(status: Status) -> String {
    match status {
        Status::Blocked => status.as_str().red().bold().to_string(),
        Status::Trusted => status.as_str().green().bold().to_string(),
        Status::Unknown => status.as_str().dimmed().to_string(),
    }
}

/// Print a status report in the requested format
pub fn print_status(format: OutputFormat, report: &StatusReport) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(report)?),
        OutputFormat::Pretty => progress(format_args!(
            "{} is {}",
            report.content,
            status_word(report.status)
        )),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("PRETTY".parse::<OutputFormat>().unwrap(), OutputFormat::Pretty);
        assert!("csv".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_status_report_json() {
        let report = StatusReport::new(&Content::ipv4("192.0.2.1"), Status::Blocked);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "content": "192.0.2.1",
                "kind": "ipv4-addr",
                "status": "blocked",
            })
        );
    }
}
