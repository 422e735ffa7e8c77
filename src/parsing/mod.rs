//! Line-level parsing helpers for bracketed transcripts.
//!
//! This module holds the pieces the [`TranscriptParser`](crate::parser::TranscriptParser)
//! is assembled from: header patterns, the ordered line classifier and the
//! date/time conversion rules.

pub mod header;

pub use header::{
    HeaderFields, HeaderMatcher, HeaderPattern, LineClassifier, LineKind, Meridiem,
    parse_header_date, parse_header_time, parse_header_timestamp,
};
