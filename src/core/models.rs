//! Export settings and the record shape shared by the JSON writers.

#[cfg(feature = "json-output")]
use serde::Serialize;

#[cfg(feature = "json-output")]
use crate::Message;

/// Controls which message fields exports include besides sender and content.
///
/// # Example
///
/// ```rust
/// use chatpulse::core::models::OutputConfig;
///
/// let config = OutputConfig::new().with_timestamps().with_flags();
/// assert!(config.include_timestamps);
/// assert!(!config.include_line_numbers);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Include the parsed timestamp plus the original date and time text
    pub include_timestamps: bool,
    /// Include the source line of each message
    pub include_line_numbers: bool,
    /// Include the media and deletion flags
    pub include_flags: bool,
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every optional field enabled.
    pub fn all() -> Self {
        Self {
            include_timestamps: true,
            include_line_numbers: true,
            include_flags: true,
        }
    }

    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.include_timestamps = true;
        self
    }

    #[must_use]
    pub fn with_line_numbers(mut self) -> Self {
        self.include_line_numbers = true;
        self
    }

    #[must_use]
    pub fn with_flags(mut self) -> Self {
        self.include_flags = true;
        self
    }
}

/// Timestamp format used by every export.
#[cfg(any(feature = "csv-output", feature = "json-output"))]
pub(crate) const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A message reduced to the fields an [`OutputConfig`] enables.
#[cfg(feature = "json-output")]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExportMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_text: Option<&'a str>,
    pub sender: &'a str,
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_media: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
}

#[cfg(feature = "json-output")]
impl<'a> ExportMessage<'a> {
    pub fn new(msg: &'a Message, config: &OutputConfig) -> Self {
        let timestamps = config.include_timestamps;
        Self {
            line_number: config.include_line_numbers.then_some(msg.line_number),
            timestamp: msg
                .timestamp
                .filter(|_| timestamps)
                .map(|ts| ts.format(EXPORT_TIMESTAMP_FORMAT).to_string()),
            date_text: timestamps.then_some(msg.date_text.as_str()),
            time_text: timestamps.then_some(msg.time_text.as_str()),
            sender: &msg.sender,
            content: &msg.content,
            is_media: config.include_flags.then_some(msg.is_media),
            is_deleted: config.include_flags.then_some(msg.is_deleted),
        }
    }
}
