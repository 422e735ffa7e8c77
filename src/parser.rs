//! Transcript parser: raw lines to an ordered message sequence.
//!
//! The parser walks the transcript once. Every header line opens a new
//! message; following lines that are not headers are folded into it; blank
//! lines are ignored. The message being assembled is an explicit
//! [`MessageBuilder`] threaded through each step, so no state outlives a call.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::parser::TranscriptParser;
//!
//! let transcript = "\
//! [01/02/23, 9:15 PM] Alice: Are you coming?
//! first extra line
//! [01/02/23, 9:16:05 PM] Bob: Yes!";
//!
//! let messages = TranscriptParser::new().parse_str(transcript)?;
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[0].content, "Are you coming?\nfirst extra line");
//! assert_eq!(messages[1].line_number, 3);
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```
//!
//! Orphan lines (text before the first header) are not errors. Use
//! [`TranscriptParser::parse_lines`] to receive them as [`ParseWarning`]s;
//! they are also logged at `warn` level.

use std::fs;
use std::io::BufRead;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Message;
use crate::config::TranscriptConfig;
use crate::error::{ChatpulseError, Result};
use crate::parsing::{HeaderFields, LineClassifier, LineKind};

/// Longest excerpt of an orphan line kept in a warning.
const WARNING_EXCERPT_CHARS: usize = 80;

/// A non-header line that appeared while no message was open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseWarning {
    /// 1-based line number.
    pub line_number: usize,
    /// The discarded line, truncated to a short excerpt.
    pub excerpt: String,
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: no open message, discarding \"{}\"",
            self.line_number, self.excerpt
        )
    }
}

/// Messages and diagnostics produced from one transcript.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTranscript {
    /// Messages in the order their header lines appeared.
    pub messages: Vec<Message>,
    /// Orphan lines that were dropped.
    pub warnings: Vec<ParseWarning>,
}

/// A message whose content may still grow.
#[derive(Debug)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    /// Opens a message from header fields. Media and deletion flags are
    /// derived from the header content here.
    pub fn start(fields: &HeaderFields<'_>, line_number: usize) -> Self {
        let mut message = Message::new(fields.sender, fields.content)
            .with_source_text(fields.date_text, fields.time_text)
            .with_line_number(line_number);
        message.timestamp = fields.timestamp;
        Self { message }
    }

    /// Appends a continuation line, separated by a newline.
    pub fn append_line(&mut self, line: &str) {
        self.message.content.push('\n');
        self.message.content.push_str(line);
    }

    /// Closes the message.
    pub fn finish(mut self, recompute_flags: bool) -> Message {
        if recompute_flags {
            self.message.refresh_flags();
        }
        self.message
    }
}

/// Parser for bracketed 12-hour transcripts.
///
/// # Example
///
/// ```rust,no_run
/// use chatpulse::parser::TranscriptParser;
/// use std::path::Path;
///
/// let parser = TranscriptParser::new();
/// let messages = parser.parse(Path::new("chat.txt"))?;
/// # Ok::<(), chatpulse::ChatpulseError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranscriptParser {
    config: TranscriptConfig,
}

impl TranscriptParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: TranscriptConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &TranscriptConfig {
        &self.config
    }

    /// Parses a transcript file.
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let content = fs::read_to_string(path)?;
        let classifier = self.classifier().map_err(|e| {
            ChatpulseError::transcript_parse(e.to_string(), Some(path.to_path_buf()))
        })?;
        Ok(self.assemble(&classifier, content.lines()).messages)
    }

    /// Parses transcript content from a string.
    pub fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        Ok(self.parse_lines(content.lines())?.messages)
    }

    /// Parses transcript lines from a buffered reader.
    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<ParsedTranscript> {
        let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;
        self.parse_lines(&lines)
    }

    /// Parses an ordered sequence of lines, keeping diagnostics.
    pub fn parse_lines<I>(&self, lines: I) -> Result<ParsedTranscript>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let classifier = self
            .classifier()
            .map_err(|e| ChatpulseError::transcript_parse(e.to_string(), None))?;
        Ok(self.assemble(&classifier, lines))
    }

    fn classifier(&self) -> std::result::Result<LineClassifier, regex::Error> {
        LineClassifier::new(self.config.strip_direction_marks)
    }

    fn assemble<I>(&self, classifier: &LineClassifier, lines: I) -> ParsedTranscript
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut out = ParsedTranscript::default();
        let mut open: Option<MessageBuilder> = None;

        for (index, line) in lines.into_iter().enumerate() {
            open = self.step(classifier, open, index + 1, line.as_ref(), &mut out);
        }

        if let Some(builder) = open {
            out.messages
                .push(builder.finish(self.config.recompute_flags_on_continuation));
        }

        debug!(
            messages = out.messages.len(),
            orphans = out.warnings.len(),
            "transcript assembled"
        );
        out
    }

    /// Processes one line and returns the message that is open afterwards.
    fn step(
        &self,
        classifier: &LineClassifier,
        open: Option<MessageBuilder>,
        line_number: usize,
        line: &str,
        out: &mut ParsedTranscript,
    ) -> Option<MessageBuilder> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        match classifier.classify(line) {
            LineKind::Blank => open,
            LineKind::Header(fields) => {
                if let Some(previous) = open {
                    out.messages
                        .push(previous.finish(self.config.recompute_flags_on_continuation));
                }
                Some(MessageBuilder::start(&fields, line_number))
            }
            LineKind::Text(text) => match open {
                Some(mut builder) => {
                    builder.append_line(text);
                    Some(builder)
                }
                None => {
                    let warning = ParseWarning {
                        line_number,
                        excerpt: text.chars().take(WARNING_EXCERPT_CHARS).collect(),
                    };
                    warn!("{warning}");
                    out.warnings.push(warning);
                    None
                }
            },
        }
    }
}
