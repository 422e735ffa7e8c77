//! Analysis pipeline over an assembled message sequence.
//!
//! Every stage is a pure function of the messages it is given, so the same
//! code serves the whole transcript and each relationship window:
//!
//! - [`temporal`] - day/hour/month volume and reply latencies
//! - [`content`] - words, emoji, message length, media, monthly topics
//! - [`sentiment`] - pluggable scoring aggregated by month and sender
//! - [`relationship`] - sliding windows and pattern shifts
//!
//! [`Analyzer`] runs all of them and adds [`BasicStats`].
//!
//! # Example
//!
//! ```rust
//! use chatpulse::analysis::Analyzer;
//! use chatpulse::parser::TranscriptParser;
//!
//! let messages = TranscriptParser::new().parse_str("\
//! [01/02/23, 9:15 PM] Alice: Dinner was great
//! [01/02/23, 9:20 PM] Bob: Glad you liked it")?;
//!
//! let report = Analyzer::new().analyze(&messages)?;
//! assert_eq!(report.basic_stats.total_messages, 2);
//! assert_eq!(report.basic_stats.participants, vec!["Alice", "Bob"]);
//! assert_eq!(report.temporal_analysis.avg_response_times["Bob"], 5.0);
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

pub mod content;
pub mod keys;
mod lexicon;
pub mod relationship;
pub mod sentiment;
pub mod temporal;
pub mod text;
pub mod topics;

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

pub use content::{ContentAnalysis, SenderContent};
pub use keys::{DayKey, MonthKey, Sender};
pub use relationship::{PatternShift, RelationshipAnalysis, WindowMetrics};
pub use sentiment::{LexiconScorer, SentimentAnalysis, SentimentScore, SentimentScorer};
pub use temporal::TemporalAnalysis;
pub use topics::{TermWeight, TfIdfIndex};

use crate::Message;
use crate::config::AnalysisConfig;
use crate::error::{ChatpulseError, Result};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Corpus-level figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicStats {
    pub total_messages: usize,
    /// Distinct senders in order of first appearance.
    pub participants: Vec<String>,
    /// Date text of the first message, as written.
    pub first_message_date: String,
    /// Date text of the last message, as written.
    pub last_message_date: String,
    /// Days between the first and last message; absent if either timestamp
    /// is invalid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<f64>,
}

impl BasicStats {
    /// Computes the figures for a non-empty sequence.
    pub fn from_messages(messages: &[Message]) -> Result<Self> {
        let (Some(first), Some(last)) = (messages.first(), messages.last()) else {
            return Err(ChatpulseError::EmptyTranscript);
        };

        let mut participants: Vec<String> = Vec::new();
        for msg in messages {
            if !participants.iter().any(|p| *p == msg.sender) {
                participants.push(msg.sender.clone());
            }
        }

        let duration_days = first
            .timestamp
            .zip(last.timestamp)
            .map(|(from, to)| (to - from).num_seconds() as f64 / SECONDS_PER_DAY);

        Ok(Self {
            total_messages: messages.len(),
            participants,
            first_message_date: first.date_text.clone(),
            last_message_date: last.date_text.clone(),
            duration_days,
        })
    }
}

/// Everything the pipeline computes for one transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub basic_stats: BasicStats,
    pub temporal_analysis: TemporalAnalysis,
    pub content_analysis: ContentAnalysis,
    pub sentiment_analysis: SentimentAnalysis,
    pub relationship_analysis: RelationshipAnalysis,
}

/// Runs the analysis stages with one configuration and scorer.
pub struct Analyzer {
    config: AnalysisConfig,
    scorer: Box<dyn SentimentScorer>,
}

impl fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analyzer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::with_config(AnalysisConfig::default())
    }
}

impl Analyzer {
    /// Creates an analyzer with default configuration and [`LexiconScorer`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AnalysisConfig) -> Self {
        Self {
            config,
            scorer: Box::new(LexiconScorer::new()),
        }
    }

    /// Replaces the sentiment scorer.
    #[must_use]
    pub fn with_scorer(mut self, scorer: impl SentimentScorer + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyzes `messages`.
    ///
    /// Fails on an invalid configuration or an empty sequence; no partial
    /// report is produced.
    pub fn analyze(&self, messages: &[Message]) -> Result<AnalysisReport> {
        self.config.validate()?;
        let basic_stats = BasicStats::from_messages(messages)?;
        let scorer = self.scorer.as_ref();

        let report = AnalysisReport {
            basic_stats,
            temporal_analysis: temporal::analyze_temporal(
                messages,
                self.config.response_outlier_minutes,
            ),
            content_analysis: content::analyze_content(messages, self.config.topics_per_month),
            sentiment_analysis: sentiment::analyze_sentiment(messages, scorer),
            relationship_analysis: relationship::analyze_relationship(
                messages,
                &self.config,
                scorer,
            ),
        };

        info!(
            messages = report.basic_stats.total_messages,
            participants = report.basic_stats.participants.len(),
            windows = report.relationship_analysis.window_metrics.len(),
            "analysis complete"
        );
        Ok(report)
    }
}

/// Analyzes `messages` with the default configuration.
pub fn analyze(messages: &[Message]) -> Result<AnalysisReport> {
    Analyzer::new().analyze(messages)
}

/// Arithmetic mean, `None` for no values.
pub(crate) fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
