//! Day/hour/month bucketing and response latencies.

use std::collections::BTreeMap;

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use super::keys::{DayKey, MonthKey, Sender};
use super::mean;
use crate::Message;

/// Message volume over time and how quickly participants answer each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalAnalysis {
    pub messages_by_day: BTreeMap<DayKey, usize>,
    pub messages_by_hour: [usize; 24],
    pub messages_by_month: BTreeMap<MonthKey, usize>,
    /// Minutes between a message and the preceding one, whenever the sender
    /// changed. Outliers are removed.
    pub response_times_by_sender: BTreeMap<Sender, Vec<f64>>,
    pub avg_response_times: BTreeMap<Sender, f64>,
}

/// Buckets messages in sequence order and collects reply latencies.
///
/// A latency sample is taken for every adjacent pair whose senders differ
/// and whose timestamps are both valid. Samples of `outlier_minutes` or more
/// are discarded. Order is not checked, so out-of-order timestamps give
/// negative samples.
pub fn analyze_temporal<'a, I>(messages: I, outlier_minutes: f64) -> TemporalAnalysis
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut out = TemporalAnalysis::default();
    let mut previous: Option<&Message> = None;

    for msg in messages {
        if let Some(ts) = msg.timestamp {
            *out.messages_by_day.entry(DayKey::of(ts)).or_insert(0) += 1;
            out.messages_by_hour[ts.hour() as usize] += 1;
            *out.messages_by_month.entry(MonthKey::of(ts)).or_insert(0) += 1;
        }

        if let Some(prev) = previous.filter(|p| p.sender != msg.sender) {
            if let Some(minutes) = latency_minutes(prev, msg) {
                if minutes < outlier_minutes {
                    out.response_times_by_sender
                        .entry(Sender::new(msg.sender.as_str()))
                        .or_default()
                        .push(minutes);
                }
            }
        }
        previous = Some(msg);
    }

    out.avg_response_times = out
        .response_times_by_sender
        .iter()
        .filter_map(|(sender, samples)| mean(samples.iter().copied()).map(|m| (sender.clone(), m)))
        .collect();
    out
}

/// Minutes from `prev` to `msg`, if both carry a valid timestamp.
fn latency_minutes(prev: &Message, msg: &Message) -> Option<f64> {
    let (from, to) = (prev.timestamp?, msg.timestamp?);
    Some((to - from).num_seconds() as f64 / 60.0)
}
