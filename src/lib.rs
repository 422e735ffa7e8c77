//! # Chatpulse
//!
//! A Rust library for parsing bracketed chat transcripts and measuring how a
//! conversation behaves over time.
//!
//! ## Overview
//!
//! Transcripts are lines of the form
//!
//! ```text
//! [01/02/23, 9:15:04 PM] Alice: Are you coming?
//! still at the office
//! [01/02/23, 9:16 PM] Bob: Yes!
//! ```
//!
//! Chatpulse assembles them into [`Message`]s (continuation lines folded into
//! the message above) and runs an analysis pipeline over the result:
//!
//! - **Temporal**: messages per day, hour and month; reply latencies per sender
//! - **Content**: word and emoji counts, message length, media per sender,
//!   tf-idf topics per month
//! - **Sentiment**: pluggable scoring averaged per month and sender
//! - **Relationship**: sliding day windows with volume, balance and reply
//!   cadence, plus the pattern shifts between neighbouring windows
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatpulse::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let messages = TranscriptParser::new().parse(Path::new("chat.txt"))?;
//!     let report = Analyzer::new().analyze(&messages)?;
//!
//!     for shift in &report.relationship_analysis.pattern_shifts {
//!         println!("{}: {:?}", shift.date, shift.frequency_change);
//!     }
//!
//!     write_report(&report, "report.json", true)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`TranscriptParser`](parser::TranscriptParser), orphan-line diagnostics
//! - [`parsing`] - header patterns and timestamp parsing
//! - [`analysis`] - the analysis stages and [`Analyzer`](analysis::Analyzer)
//! - [`config`] - [`TranscriptConfig`](config::TranscriptConfig), [`AnalysisConfig`](config::AnalysisConfig)
//! - [`core`] - message filtering and writers
//! - [`format`] - message export formats
//! - [`cli`] - CLI arguments (feature `cli`)
//! - [`error`] - [`ChatpulseError`], [`Result`]
//! - [`prelude`] - convenient re-exports

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;

pub use error::{ChatpulseError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatpulse::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;

    pub use crate::error::{ChatpulseError, Result};

    pub use crate::parser::{ParseWarning, ParsedTranscript, TranscriptParser};

    pub use crate::config::{AnalysisConfig, TranscriptConfig};

    pub use crate::analysis::{
        AnalysisReport, Analyzer, BasicStats, LexiconScorer, PatternShift, SentimentScore,
        SentimentScorer, WindowMetrics, analyze,
    };

    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::models::OutputConfig;

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{
        to_json, to_jsonl, to_report_json, write_json, write_jsonl, write_report,
    };

    pub use crate::format::OutputFormat;
}
