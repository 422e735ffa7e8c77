//! Message type produced by the transcript parser.
//!
//! This module provides [`Message`], the structured representation of one
//! transcript entry. The parser creates a message for every header line and
//! folds the continuation lines that follow it into `content`; afterwards the
//! record is treated as immutable by every analysis stage.
//!
//! # Overview
//!
//! A message consists of:
//! - **Source text**: `date_text`, `time_text` exactly as they appeared
//! - **Parsed fields**: `timestamp` (absent when the date/time is not a real
//!   calendar instant), `sender`, `content`
//! - **Derived flags**: `is_media`, `is_deleted`
//! - **Diagnostics**: `line_number` of the header line
//!
//! # Examples
//!
//! ```
//! use chatpulse::Message;
//!
//! let msg = Message::new("Alice", "<Media omitted>");
//! assert!(msg.is_media());
//! assert!(!msg.is_deleted());
//! ```
//!
//! ## Builder Pattern
//!
//! ```
//! use chatpulse::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 2, 1).unwrap().and_hms_opt(21, 15, 0).unwrap();
//! let msg = Message::new("Bob", "See you!")
//!     .with_timestamp(ts)
//!     .with_source_text("01/02/23", "9:15 PM")
//!     .with_line_number(12);
//!
//! assert_eq!(msg.date_text(), "01/02/23");
//! assert_eq!(msg.line_number(), 12);
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Content fragments that mark an attachment which was left out of the export.
pub const MEDIA_MARKERS: &[&str] = &[
    "<Media omitted>",
    "<attached:",
    "image omitted",
    "video omitted",
    "audio omitted",
    "sticker omitted",
    "GIF omitted",
    "document omitted",
    "Contact card omitted",
];

/// Content fragments that replace the text of a deleted message.
pub const DELETED_MARKERS: &[&str] = &["This message was deleted", "You deleted this message"];

/// Returns `true` if `content` contains any media-omission marker.
pub fn contains_media_marker(content: &str) -> bool {
    MEDIA_MARKERS.iter().any(|marker| content.contains(marker))
}

/// Returns `true` if `content` contains any deletion marker.
pub fn contains_deleted_marker(content: &str) -> bool {
    DELETED_MARKERS.iter().any(|marker| content.contains(marker))
}

/// One assembled transcript message.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `Option<NaiveDateTime>` | Parsed date-time; `None` if calendar-invalid |
/// | `date_text` | `String` | Date exactly as written, e.g. `01/02/23` |
/// | `time_text` | `String` | Time exactly as written, e.g. `9:15 PM` |
/// | `sender` | `String` | Trimmed display name |
/// | `content` | `String` | Text, continuation lines joined with `\n` |
/// | `is_media` | `bool` | Header content carried a media marker |
/// | `is_deleted` | `bool` | Header content carried a deletion marker |
/// | `line_number` | `usize` | 1-based line of the header |
///
/// # Serialization
///
/// Fields serialize in camelCase (`dateText`, `isMedia`, ...) to match the
/// report schema consumed by visualization tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// When the message was sent, if the written date and time form a valid instant.
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,

    /// Original date field.
    #[serde(default)]
    pub date_text: String,

    /// Original time field, including the AM/PM designator.
    #[serde(default)]
    pub time_text: String,

    /// Display name of the author.
    pub sender: String,

    /// Text content of the message.
    pub content: String,

    /// `true` if the header content contained a media-omission marker.
    #[serde(default)]
    pub is_media: bool,

    /// `true` if the header content contained a deletion marker.
    #[serde(default)]
    pub is_deleted: bool,

    /// 1-based source line of the header; `0` for messages built in code.
    #[serde(default)]
    pub line_number: usize,
}

impl Message {
    /// Creates a message from sender and content, deriving the media and
    /// deletion flags from `content`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatpulse::Message;
    ///
    /// let msg = Message::new("Alice", "This message was deleted");
    /// assert!(msg.is_deleted());
    /// assert!(msg.timestamp().is_none());
    /// ```
    pub fn new(sender: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            timestamp: None,
            date_text: String::new(),
            time_text: String::new(),
            sender: sender.into(),
            is_media: contains_media_marker(&content),
            is_deleted: contains_deleted_marker(&content),
            content,
            line_number: 0,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: NaiveDateTime) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Builder method to set the original date and time text.
    #[must_use]
    pub fn with_source_text(
        mut self,
        date_text: impl Into<String>,
        time_text: impl Into<String>,
    ) -> Self {
        self.date_text = date_text.into();
        self.time_text = time_text.into();
        self
    }

    /// Builder method to set the header line number.
    #[must_use]
    pub fn with_line_number(mut self, line_number: usize) -> Self {
        self.line_number = line_number;
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the timestamp, if it is a valid instant.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    /// Returns the calendar day of the timestamp.
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date())
    }

    /// Returns the original date text.
    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    /// Returns the original time text.
    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    /// Returns `true` if the message stands in for omitted media.
    pub fn is_media(&self) -> bool {
        self.is_media
    }

    /// Returns `true` if the message was deleted by its author.
    pub fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Returns the 1-based header line number.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns `true` if the message carries text worth scoring
    /// (neither media nor deleted).
    pub fn is_textual(&self) -> bool {
        !self.is_media && !self.is_deleted
    }

    /// Re-derives `is_media` and `is_deleted` from the full content.
    pub fn refresh_flags(&mut self) {
        self.is_media = contains_media_marker(&self.content);
        self.is_deleted = contains_deleted_marker(&self.content);
    }

    /// Returns `true` if this message's content is empty or whitespace-only.
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl Default for Message {
    fn default() -> Self {
        Self::new("", "")
    }
}
