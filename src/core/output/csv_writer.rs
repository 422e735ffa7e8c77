//! CSV output writer.

use std::fs::File;
use std::io::Write;

use crate::Message;
use crate::core::models::{EXPORT_TIMESTAMP_FORMAT, OutputConfig};
use crate::error::{ChatpulseError, Result};

/// Writes messages to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: depend on [`OutputConfig`]
///   - Basic: `Sender`, `Content`
///   - With line numbers: `Line` first
///   - With timestamps: `Timestamp`, `Date`, `Time` before `Sender`
///   - With flags: `IsMedia`, `IsDeleted` last
/// - Multi-line content is quoted, newlines kept
pub fn write_csv(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(file, messages, config)
}

/// Converts messages to a CSV string.
pub fn to_csv(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, messages, config)?;
    String::from_utf8(buffer).map_err(|e| ChatpulseError::Utf8 {
        context: "CSV output".to_string(),
        source: e,
    })
}

fn write_records<W: Write>(out: W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(build_header(config))?;
    for msg in messages {
        writer.write_record(build_record(msg, config))?;
    }

    writer.flush()?;
    Ok(())
}

/// Build CSV header based on output configuration.
fn build_header(config: &OutputConfig) -> Vec<&'static str> {
    let mut header = Vec::new();

    if config.include_line_numbers {
        header.push("Line");
    }
    if config.include_timestamps {
        header.extend(["Timestamp", "Date", "Time"]);
    }

    header.push("Sender");
    header.push("Content");

    if config.include_flags {
        header.extend(["IsMedia", "IsDeleted"]);
    }

    header
}

/// Build CSV record for a single message.
fn build_record(msg: &Message, config: &OutputConfig) -> Vec<String> {
    let mut record = Vec::new();

    if config.include_line_numbers {
        record.push(msg.line_number.to_string());
    }
    if config.include_timestamps {
        record.push(
            msg.timestamp
                .map(|ts| ts.format(EXPORT_TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
        );
        record.push(msg.date_text.clone());
        record.push(msg.time_text.clone());
    }

    record.push(msg.sender.clone());
    record.push(msg.content.clone());

    if config.include_flags {
        record.push(msg.is_media.to_string());
        record.push(msg.is_deleted.to_string());
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_csv_basic() {
        let messages = vec![
            Message::new("Alice", "Hello"),
            Message::new("Bob", "Hi there"),
        ];

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap();

        write_csv(&messages, path, &OutputConfig::new()).unwrap();
        let content = std::fs::read_to_string(path).unwrap();

        assert!(content.contains("Sender;Content"));
        assert!(content.contains("Alice;Hello"));
        assert!(content.contains("Bob;Hi there"));
    }

    #[test]
    fn test_to_csv_all_columns() {
        let ts = NaiveDate::from_ymd_opt(2023, 2, 1)
            .unwrap()
            .and_hms_opt(21, 15, 0)
            .unwrap();
        let msg = Message::new("Alice", "<Media omitted>")
            .with_timestamp(ts)
            .with_source_text("01/02/23", "9:15 PM")
            .with_line_number(3);

        let csv = to_csv(&[msg], &OutputConfig::all()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Line;Timestamp;Date;Time;Sender;Content;IsMedia;IsDeleted")
        );
        assert_eq!(
            lines.next(),
            Some("3;2023-02-01T21:15:00;01/02/23;9:15 PM;Alice;<Media omitted>;true;false")
        );
    }

    #[test]
    fn test_multiline_content_quoted() {
        let csv = to_csv(&[Message::new("Alice", "one\ntwo")], &OutputConfig::new()).unwrap();
        assert!(csv.contains("Alice;\"one\ntwo\""));
    }
}
