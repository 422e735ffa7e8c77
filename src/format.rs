//! Export formats for parsed messages.
//!
//! Reports are always JSON. The messages behind a report can also be dumped as
//! CSV, a JSON array or JSON Lines, chosen explicitly or from the file extension:
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn example() -> chatpulse::Result<()> {
//! use chatpulse::core::models::OutputConfig;
//! use chatpulse::format::{OutputFormat, to_format_string};
//! use chatpulse::parser::TranscriptParser;
//!
//! let messages = TranscriptParser::new()
//!     .parse_str("[15/01/24, 10:30 AM] Alice: Coffee?\n[15/01/24, 10:31 AM] Bob: Sure\n")?;
//!
//! let format = OutputFormat::from_path("out/messages.CSV")?;
//! let csv = to_format_string(&messages, format, &OutputConfig::new())?;
//! assert_eq!(csv.lines().next(), Some("Sender;Content"));
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::models::OutputConfig;
use crate::error::{ChatpulseError, Result};

/// How a message sequence is laid out on disk.
///
/// Serialized in lowercase, so config files and `--messages-format` share the
/// same spelling. `ndjson` is accepted as an alias for [`Jsonl`](Self::Jsonl).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Semicolon-delimited table
    #[default]
    Csv,
    /// Single array, pretty-printed
    Json,
    /// One object per line
    Jsonl,
}

impl OutputFormat {
    /// File extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Names accepted by [`FromStr`](std::str::FromStr), aliases included.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// Picks the export format from the extension of `path`, case-insensitively.
    ///
    /// ```rust
    /// use chatpulse::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("export/alice.ndjson").unwrap(), OutputFormat::Jsonl);
    /// assert!(OutputFormat::from_path("chat.txt").is_err());
    /// ```
    pub fn from_path(path: &str) -> Result<Self> {
        let ext = std::path::Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        Self::from_name(ext).ok_or_else(|| ChatpulseError::InvalidFormat {
            format: "output",
            message: format!(
                "cannot export messages to '{}': expected a .csv, .json, .jsonl or .ndjson file",
                path
            ),
        })
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            "jsonl" | "ndjson" => Some(OutputFormat::Jsonl),
            _ => None,
        }
    }

    /// Cargo feature that compiles in the writer for this format.
    fn required_feature(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    fn disabled(self) -> ChatpulseError {
        ChatpulseError::InvalidFormat {
            format: "output",
            message: format!(
                "{} export needs the '{}' feature",
                self,
                self.required_feature()
            ),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.extension().to_ascii_uppercase())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )
        })
    }
}

/// Writes `messages` to `path` in the given format.
///
/// ```rust,no_run
/// # #[cfg(all(feature = "csv-output", feature = "json-output"))]
/// # fn example() -> chatpulse::Result<()> {
/// use chatpulse::format::{OutputFormat, write_to_format};
/// use chatpulse::core::models::OutputConfig;
/// use chatpulse::parser::TranscriptParser;
///
/// let messages = TranscriptParser::new().parse_str("[15/01/24, 10:30 AM] Alice: Hello!\n")?;
/// write_to_format(&messages, "messages.jsonl", OutputFormat::Jsonl, &OutputConfig::all())?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Fails when the writer for `format` is compiled out or the file cannot be written.
#[allow(unused_variables)]
pub fn write_to_format(
    messages: &[Message],
    path: &str,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(messages, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(messages, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(format.disabled()),
    }
}

/// Same as [`write_to_format`], rendered into a string.
#[allow(unused_variables)]
pub fn to_format_string(
    messages: &[Message],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(messages, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(messages, config),
        #[allow(unreachable_patterns)]
        _ => Err(format.disabled()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_names_and_extensions() {
        for &format in OutputFormat::all() {
            assert_eq!(OutputFormat::from_str(format.extension()), Ok(format));
            assert_eq!(format.to_string(), format.extension().to_uppercase());
        }
        assert_eq!(OutputFormat::from_str("NDJSON"), Ok(OutputFormat::Jsonl));
        assert!(OutputFormat::from_str("xml").unwrap_err().contains("ndjson"));
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    }

    #[test]
    fn test_from_path_uses_last_extension() {
        let cases = [
            ("alice.csv", Some(OutputFormat::Csv)),
            ("exports/2024.01/chat.JSON", Some(OutputFormat::Json)),
            ("chat.txt.ndjson", Some(OutputFormat::Jsonl)),
            ("chat.json.txt", None),
            ("exports.jsonl/messages", None),
        ];
        for (path, expected) in cases {
            assert_eq!(OutputFormat::from_path(path).ok(), expected, "{path}");
        }

        let err = OutputFormat::from_path("chat.txt").unwrap_err();
        assert!(err.to_string().contains("chat.txt"));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&OutputFormat::Jsonl).unwrap(), "\"jsonl\"");
        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
    }

    #[test]
    fn test_required_feature() {
        assert_eq!(OutputFormat::Csv.required_feature(), "csv-output");
        assert_eq!(OutputFormat::Jsonl.required_feature(), "json-output");
        assert!(OutputFormat::Json.disabled().to_string().contains("json-output"));
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_parsed_transcript_in_every_format() {
        let transcript = "[15/01/24, 10:30 AM] Alice: Coffee?\nor tea\n[15/01/24, 10:31 AM] Bob: <Media omitted>\n";
        let messages = crate::parser::TranscriptParser::new().parse_str(transcript).unwrap();
        let config = OutputConfig::all();

        let csv = to_format_string(&messages, OutputFormat::Csv, &config).unwrap();
        assert!(csv.starts_with("Line;Timestamp;"));
        assert_eq!(csv.lines().filter(|l| l.starts_with(char::is_numeric)).count(), 2);

        let jsonl = to_format_string(&messages, OutputFormat::Jsonl, &config).unwrap();
        assert_eq!(jsonl.lines().count(), 2);

        let json = to_format_string(&messages, OutputFormat::Json, &config).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["content"], "Coffee?\nor tea");
        assert_eq!(parsed[1]["isMedia"], true);
    }
}
