//! Sentiment scoring and aggregation.
//!
//! Scoring is pluggable through [`SentimentScorer`]. Any
//! `Fn(&str) -> SentimentScore` closure is a scorer, and [`LexiconScorer`] is
//! the built-in word-valence implementation.
//!
//! ```rust
//! use chatpulse::analysis::sentiment::{LexiconScorer, SentimentScorer};
//!
//! let scorer = LexiconScorer::new();
//! assert!(scorer.score("what a great day").score > 0.0);
//! assert!(scorer.score("not good").score < 0.0);
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::keys::{MonthKey, Sender};
use super::lexicon::{is_negator, valence};
use super::mean;
use super::text::tokenize;
use crate::Message;

/// Result of scoring one piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Overall polarity; positive is favorable.
    pub score: f64,
    /// Score normalized by text length.
    pub comparative: f64,
}

/// Scores message text.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> SentimentScore;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> SentimentScore + Send + Sync,
{
    fn score(&self, text: &str) -> SentimentScore {
        self(text)
    }
}

/// Sums AFINN-style word valences.
///
/// A word directly preceded by a negator (`not`, `never`, `don't`, ...)
/// contributes its valence with the sign flipped. `comparative` is the score
/// divided by the number of tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    pub fn new() -> Self {
        Self
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> SentimentScore {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SentimentScore::default();
        }

        let mut total = 0;
        let mut negated = false;
        for token in &tokens {
            if let Some(v) = valence(token) {
                total += if negated { -v } else { v };
            }
            negated = is_negator(token);
        }

        let score = f64::from(total);
        SentimentScore {
            score,
            comparative: score / tokens.len() as f64,
        }
    }
}

/// One scored message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
    pub sender: Sender,
    pub score: f64,
    pub comparative: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentAnalysis {
    /// Scored messages in sequence order.
    pub sentiment_timeline: Vec<SentimentPoint>,
    pub avg_sentiment_by_month: BTreeMap<MonthKey, f64>,
    pub avg_sentiment_by_sender: BTreeMap<Sender, f64>,
}

/// Scores every textual message and averages the scores by month and by
/// sender. Media and deleted messages are skipped; messages without a valid
/// timestamp still count toward their sender's average.
pub fn analyze_sentiment<'a, I>(messages: I, scorer: &dyn SentimentScorer) -> SentimentAnalysis
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut by_month: BTreeMap<MonthKey, Vec<f64>> = BTreeMap::new();
    let mut by_sender: BTreeMap<Sender, Vec<f64>> = BTreeMap::new();
    let mut timeline = Vec::new();

    for msg in messages.into_iter().filter(|m| m.is_textual()) {
        let SentimentScore { score, comparative } = scorer.score(&msg.content);
        let sender = Sender::new(msg.sender.as_str());

        if let Some(ts) = msg.timestamp {
            by_month.entry(MonthKey::of(ts)).or_default().push(score);
        }
        by_sender.entry(sender.clone()).or_default().push(score);
        timeline.push(SentimentPoint {
            timestamp: msg.timestamp,
            sender,
            score,
            comparative,
        });
    }

    SentimentAnalysis {
        sentiment_timeline: timeline,
        avg_sentiment_by_month: averages(by_month),
        avg_sentiment_by_sender: averages(by_sender),
    }
}

fn averages<K: Ord>(groups: BTreeMap<K, Vec<f64>>) -> BTreeMap<K, f64> {
    groups
        .into_iter()
        .filter_map(|(key, values)| mean(values).map(|m| (key, m)))
        .collect()
}
