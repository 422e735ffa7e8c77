//! Sliding-window relationship metrics and pattern-shift detection.
//!
//! Distinct message days are sorted and cut into windows of `window_days`
//! consecutive entries, starting every `step` days. A trailing window with
//! fewer than `window_days` days is never produced, so `N` distinct days
//! yield `floor((N - W) / step) + 1` windows when `N >= W` and none otherwise.
//!
//! Each window's content and sentiment figures come from the same
//! aggregators used for the whole corpus, run over the window's messages.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::content::sender_content;
use super::keys::{DayKey, Sender};
use super::sentiment::{SentimentScorer, analyze_sentiment};
use crate::Message;
use crate::config::AnalysisConfig;

/// Metrics of one window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowMetrics {
    /// First day in the window.
    pub start_date: DayKey,
    /// Last day in the window.
    pub end_date: DayKey,
    /// Distinct days with messages in the window.
    pub day_count: usize,
    pub message_count: usize,
    pub messages_by_sender: BTreeMap<Sender, usize>,
    /// `message_count / day_count`.
    pub messages_per_day: f64,
    /// Share of messages whose predecessor in the window has another sender.
    pub response_frequency: f64,
    pub avg_length_by_sender: BTreeMap<Sender, f64>,
    pub avg_sentiment_by_sender: BTreeMap<Sender, f64>,
}

/// A change of cadence between two adjacent windows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternShift {
    /// Start of the later window.
    pub date: DayKey,
    /// Relative change in messages per day; `None` when the earlier window
    /// had none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_change: Option<f64>,
    /// Relative change in response frequency; `None` when the earlier
    /// window's was zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_change: Option<f64>,
    pub previous: WindowMetrics,
    pub current: WindowMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipAnalysis {
    pub window_metrics: Vec<WindowMetrics>,
    pub pattern_shifts: Vec<PatternShift>,
}

/// Groups messages by calendar day, keeping sequence order within a day.
/// Messages without a valid timestamp are left out.
pub fn day_buckets<'a, I>(messages: I) -> BTreeMap<DayKey, Vec<&'a Message>>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut days: BTreeMap<DayKey, Vec<&'a Message>> = BTreeMap::new();
    for msg in messages {
        if let Some(ts) = msg.timestamp {
            days.entry(DayKey::of(ts)).or_default().push(msg);
        }
    }
    days
}

/// Start indices of every full window over `day_count` days.
///
/// # Example
///
/// ```rust
/// use chatpulse::analysis::relationship::window_starts;
///
/// let starts: Vec<usize> = window_starts(61, 30, 15).collect();
/// assert_eq!(starts, vec![0, 15, 30]);
/// ```
pub fn window_starts(day_count: usize, window_days: usize, step: usize) -> impl Iterator<Item = usize> {
    let last = if window_days == 0 {
        None
    } else {
        day_count.checked_sub(window_days)
    };
    (0..).step_by(step.max(1)).take_while(move |&start| last.is_some_and(|last| start <= last))
}

/// Metrics for one window of day buckets.
pub fn window_metrics(days: &[(DayKey, Vec<&Message>)], scorer: &dyn SentimentScorer) -> WindowMetrics {
    let messages: Vec<&Message> = days.iter().flat_map(|(_, msgs)| msgs.iter().copied()).collect();
    let message_count = messages.len();
    let day_count = days.len();

    let mut messages_by_sender: BTreeMap<Sender, usize> = BTreeMap::new();
    for msg in &messages {
        *messages_by_sender
            .entry(Sender::new(msg.sender.as_str()))
            .or_insert(0) += 1;
    }

    let replies = messages
        .windows(2)
        .filter(|pair| pair[0].sender != pair[1].sender)
        .count();

    WindowMetrics {
        start_date: days.first().map(|(day, _)| *day).unwrap_or_default(),
        end_date: days.last().map(|(day, _)| *day).unwrap_or_default(),
        day_count,
        message_count,
        messages_by_sender,
        messages_per_day: ratio(message_count, day_count),
        response_frequency: ratio(replies, message_count),
        avg_length_by_sender: sender_content(messages.iter().copied()).avg_length_by_sender,
        avg_sentiment_by_sender: analyze_sentiment(messages.iter().copied(), scorer)
            .avg_sentiment_by_sender,
    }
}

/// `(curr - prev) / prev`, or `None` when `prev` is zero.
pub fn relative_change(prev: f64, curr: f64) -> Option<f64> {
    (prev != 0.0).then(|| (curr - prev) / prev)
}

/// Compares each window with the one before it. A shift is recorded when
/// either relative change exceeds `threshold` in absolute value.
pub fn detect_shifts(windows: &[WindowMetrics], threshold: f64) -> Vec<PatternShift> {
    windows
        .windows(2)
        .filter_map(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            let frequency_change = relative_change(previous.messages_per_day, current.messages_per_day);
            let response_change =
                relative_change(previous.response_frequency, current.response_frequency);

            let exceeds = |change: Option<f64>| change.is_some_and(|c| c.abs() > threshold);
            if !exceeds(frequency_change) && !exceeds(response_change) {
                return None;
            }

            debug!(
                date = %current.start_date,
                ?frequency_change,
                ?response_change,
                "pattern shift"
            );
            Some(PatternShift {
                date: current.start_date,
                frequency_change,
                response_change,
                previous: previous.clone(),
                current: current.clone(),
            })
        })
        .collect()
}

/// Builds every window and detects shifts between neighbours.
pub fn analyze_relationship(
    messages: &[Message],
    config: &AnalysisConfig,
    scorer: &dyn SentimentScorer,
) -> RelationshipAnalysis {
    let days: Vec<(DayKey, Vec<&Message>)> = day_buckets(messages).into_iter().collect();
    let window_days = config.window_days;

    let window_metrics: Vec<WindowMetrics> =
        window_starts(days.len(), window_days, config.effective_step())
            .map(|start| window_metrics(&days[start..start + window_days], scorer))
            .collect();
    let pattern_shifts = detect_shifts(&window_metrics, config.shift_threshold);

    info!(
        days = days.len(),
        windows = window_metrics.len(),
        shifts = pattern_shifts.len(),
        "relationship windows analyzed"
    );
    RelationshipAnalysis {
        window_metrics,
        pattern_shifts,
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
