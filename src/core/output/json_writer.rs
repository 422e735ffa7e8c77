//! JSON output writer for message sequences and analysis reports.

use std::fs::File;
use std::io::Write;

use crate::Message;
use crate::analysis::AnalysisReport;
use crate::core::models::{ExportMessage, OutputConfig};
use crate::error::Result;

/// Writes messages to JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"sender": "Alice", "content": "Hello"},
///   {"sender": "Bob", "content": "Hi"}
/// ]
/// ```
pub fn write_json(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let json = to_json(messages, config)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to a pretty-printed JSON array.
pub fn to_json(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let records: Vec<ExportMessage<'_>> = messages
        .iter()
        .map(|m| ExportMessage::new(m, config))
        .collect();

    Ok(serde_json::to_string_pretty(&records)?)
}

/// Serializes an analysis report, indented when `pretty` is set.
///
/// Map keys are emitted in sorted order, so equal reports always produce
/// identical text.
pub fn to_report_json(report: &AnalysisReport, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(json)
}

/// Writes an analysis report to a JSON file.
pub fn write_report(report: &AnalysisReport, output_path: &str, pretty: bool) -> Result<()> {
    let json = to_report_json(report, pretty)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}
