//! Lexical statistics per sender and monthly topics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::keys::{MonthKey, Sender};
use super::text::{emojis, tokenize};
use super::topics::{TermWeight, TfIdfIndex};
use crate::Message;

/// Per-sender lexical statistics over any message subsequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderContent {
    /// Case-folded word counts from non-media messages.
    pub words_by_sender: BTreeMap<Sender, BTreeMap<String, usize>>,
    pub emojis_by_sender: BTreeMap<Sender, BTreeMap<String, usize>>,
    /// Mean content length in characters, placeholders included.
    pub avg_length_by_sender: BTreeMap<Sender, f64>,
    /// Media messages per sender; every sender appears, possibly with 0.
    pub media_by_sender: BTreeMap<Sender, usize>,
}

/// Whole-corpus content report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysis {
    pub words_by_sender: BTreeMap<Sender, BTreeMap<String, usize>>,
    pub emojis_by_sender: BTreeMap<Sender, BTreeMap<String, usize>>,
    pub avg_length_by_sender: BTreeMap<Sender, f64>,
    pub media_by_sender: BTreeMap<Sender, usize>,
    /// Top-weighted terms of each month, heaviest first.
    pub topics_by_month: BTreeMap<MonthKey, Vec<TermWeight>>,
}

/// Computes [`SenderContent`] for `messages`.
pub fn sender_content<'a, I>(messages: I) -> SenderContent
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut out = SenderContent::default();
    let mut lengths: BTreeMap<Sender, (usize, usize)> = BTreeMap::new();

    for msg in messages {
        let sender = Sender::new(msg.sender.as_str());

        let (total, count) = lengths.entry(sender.clone()).or_insert((0, 0));
        *total += msg.content.chars().count();
        *count += 1;

        let media = out.media_by_sender.entry(sender.clone()).or_insert(0);
        if msg.is_media {
            *media += 1;
        } else {
            let words = out.words_by_sender.entry(sender.clone()).or_default();
            for word in tokenize(&msg.content) {
                *words.entry(word).or_insert(0) += 1;
            }
        }

        let mut found = emojis(&msg.content).peekable();
        if found.peek().is_some() {
            let counts = out.emojis_by_sender.entry(sender).or_default();
            for emoji in found {
                *counts.entry(emoji.to_string()).or_insert(0) += 1;
            }
        }
    }

    out.avg_length_by_sender = lengths
        .into_iter()
        .map(|(sender, (total, count))| (sender, total as f64 / count as f64))
        .collect();
    out
}

/// Ranks the terms of each month's non-media messages. Every month is an
/// independent corpus; messages without a valid timestamp are left out.
pub fn topics_by_month<'a, I>(messages: I, per_month: usize) -> BTreeMap<MonthKey, Vec<TermWeight>>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut indexes: BTreeMap<MonthKey, TfIdfIndex> = BTreeMap::new();
    for msg in messages.into_iter().filter(|m| !m.is_media) {
        if let Some(ts) = msg.timestamp {
            indexes
                .entry(MonthKey::of(ts))
                .or_default()
                .add_document(&msg.content);
        }
    }

    indexes
        .into_iter()
        .map(|(month, index)| (month, index.top_terms(per_month)))
        .collect()
}

/// Runs both content stages over the same messages.
pub fn analyze_content(messages: &[Message], topics_per_month: usize) -> ContentAnalysis {
    let SenderContent {
        words_by_sender,
        emojis_by_sender,
        avg_length_by_sender,
        media_by_sender,
    } = sender_content(messages);

    ContentAnalysis {
        words_by_sender,
        emojis_by_sender,
        avg_length_by_sender,
        media_by_sender,
        topics_by_month: topics_by_month(messages, topics_per_month),
    }
}
