//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure
//! - [`ExportFormat`] - message export formats accepted on the command line
//!
//! `Args` also knows how to turn itself into the library's configuration
//! types, so the binary stays a thin driver:
//!
//! ```rust
//! use chatpulse::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatpulse", "chat.txt", "--window-days", "14", "-v"]);
//! let config = args.analysis_config()?;
//! assert_eq!(config.window_days, 14);
//! assert_eq!(args.log_directive(), "chatpulse=info");
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

use clap::{ArgAction, Parser, ValueEnum};

use crate::config::{AnalysisConfig, TranscriptConfig};
use crate::core::FilterConfig;
use crate::error::Result;
use crate::format::OutputFormat;

/// Default report path.
pub const DEFAULT_REPORT_PATH: &str = "chat_report.json";

/// Analyze a bracketed chat transcript: activity over time, vocabulary,
/// sentiment and how the conversation's rhythm shifts.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatpulse")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatpulse chat.txt
    chatpulse chat.txt -o report.json --compact
    chatpulse chat.txt --messages messages.csv
    chatpulse chat.txt --window-days 14 --threshold 0.5
    chatpulse chat.txt --after 2024-01-01 --from Alice -vv")]
pub struct Args {
    /// Path to the transcript
    pub input: String,

    /// Path of the analysis report (JSON)
    #[arg(short, long, default_value = DEFAULT_REPORT_PATH)]
    pub output: String,

    /// Also export the parsed messages to this path
    #[arg(long, value_name = "PATH")]
    pub messages: Option<String>,

    /// Format of the message export (default: from the file extension)
    #[arg(long, value_enum, requires = "messages")]
    pub messages_format: Option<ExportFormat>,

    /// Distinct days per relationship window
    #[arg(long, value_name = "N")]
    pub window_days: Option<usize>,

    /// Days between window starts (default: half the window)
    #[arg(long, value_name = "N")]
    pub window_step: Option<usize>,

    /// Relative change that marks a pattern shift
    #[arg(long, value_name = "F")]
    pub threshold: Option<f64>,

    /// JSON file with analysis settings; flags override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Keep messages from this sender only
    #[arg(long, value_name = "USER")]
    pub from: Option<String>,

    /// Detect media/deletion markers in continuation lines too
    #[arg(long)]
    pub recompute_flags: bool,

    /// Write the report without indentation
    #[arg(long)]
    pub compact: bool,

    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Analysis settings: the `--config` file (or defaults) with flags
    /// applied on top, validated.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(days) = self.window_days {
            config = config.with_window_days(days);
        }
        if let Some(step) = self.window_step {
            config = config.with_window_step(step);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_shift_threshold(threshold);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn transcript_config(&self) -> TranscriptConfig {
        TranscriptConfig::new().with_recompute_flags(self.recompute_flags)
    }

    pub fn filter_config(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new();
        if let Some(ref after) = self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(ref before) = self.before {
            filter = filter.with_date_to(before)?;
        }
        if let Some(ref from) = self.from {
            filter = filter.with_sender(from.clone());
        }
        Ok(filter)
    }

    /// Format for `--messages`: the explicit flag, else the extension, else CSV.
    pub fn messages_output_format(&self) -> Option<OutputFormat> {
        let path = self.messages.as_deref()?;
        Some(match self.messages_format {
            Some(format) => format.into(),
            None => OutputFormat::from_path(path).unwrap_or_default(),
        })
    }

    /// Default tracing directive for the verbosity level.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "chatpulse=warn",
            1 => "chatpulse=info",
            _ => "chatpulse=debug",
        }
    }
}

/// Message export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ExportFormat {
    /// CSV with semicolon delimiter
    Csv,
    /// JSON array of messages
    Json,
    /// JSON Lines, one message per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl From<ExportFormat> for OutputFormat {
    fn from(format: ExportFormat) -> OutputFormat {
        match format {
            ExportFormat::Csv => OutputFormat::Csv,
            ExportFormat::Json => OutputFormat::Json,
            ExportFormat::Jsonl => OutputFormat::Jsonl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::parse_from(std::iter::once("chatpulse").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["chat.txt"]);
        assert_eq!(args.input, "chat.txt");
        assert_eq!(args.output, DEFAULT_REPORT_PATH);
        assert!(args.messages_output_format().is_none());
        assert_eq!(args.analysis_config().unwrap(), AnalysisConfig::default());
        assert!(!args.filter_config().unwrap().is_active());
        assert!(!args.transcript_config().recompute_flags_on_continuation);
        assert_eq!(args.log_directive(), "chatpulse=warn");
    }

    #[test]
    fn test_analysis_overrides() {
        let args = parse(&[
            "chat.txt",
            "--window-days",
            "10",
            "--window-step",
            "3",
            "--threshold",
            "0.5",
        ]);
        let config = args.analysis_config().unwrap();
        assert_eq!(config.window_days, 10);
        assert_eq!(config.effective_step(), 3);
        assert!((config.shift_threshold - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_window_rejected() {
        let args = parse(&["chat.txt", "--window-days", "0"]);
        assert!(args.analysis_config().unwrap_err().is_invalid_config());
    }

    #[test]
    fn test_messages_format_resolution() {
        let args = parse(&["chat.txt", "--messages", "out.jsonl"]);
        assert_eq!(args.messages_output_format(), Some(OutputFormat::Jsonl));

        let args = parse(&["chat.txt", "--messages", "out.txt"]);
        assert_eq!(args.messages_output_format(), Some(OutputFormat::Csv));

        let args = parse(&["chat.txt", "--messages", "out.txt", "--messages-format", "json"]);
        assert_eq!(args.messages_output_format(), Some(OutputFormat::Json));
    }

    #[test]
    fn test_filter_flags() {
        let args = parse(&["chat.txt", "--after", "2024-01-01", "--from", "Alice"]);
        let filter = args.filter_config().unwrap();
        assert!(filter.has_date_filter());
        assert_eq!(filter.from.as_deref(), Some("Alice"));

        let args = parse(&["chat.txt", "--before", "yesterday"]);
        assert!(args.filter_config().unwrap_err().is_invalid_date());
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&["chat.txt", "-vv"]).log_directive(), "chatpulse=debug");
        assert_eq!(parse(&["chat.txt", "-vvvv"]).log_directive(), "chatpulse=debug");
    }
}
