//! JSON Lines (JSONL) output writer.
//!
//! One message per line keeps exports greppable and lets downstream tools
//! read them a record at a time.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::Message;
use crate::core::models::{ExportMessage, OutputConfig};
use crate::error::Result;

/// Writes messages to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"sender":"Alice","content":"Hello"}
/// {"sender":"Bob","content":"Hi"}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: &str, config: &OutputConfig) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, messages, config)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[Message], config: &OutputConfig) -> Result<String> {
    let mut out = Vec::new();
    write_lines(&mut out, messages, config)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn write_lines<W: Write>(out: &mut W, messages: &[Message], config: &OutputConfig) -> Result<()> {
    for msg in messages {
        serde_json::to_writer(&mut *out, &ExportMessage::new(msg, config))?;
        out.write_all(b"\n")?;
    }
    Ok(())
}
