//! Message filtering and export.
//!
//! This module contains:
//! - [`filter`] - Message filtering by date and sender
//! - [`models`] - Export settings
//! - [`output`] - Format writers (CSV, JSON, JSONL, report JSON)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatpulse::core::{
//!     Message, OutputConfig, FilterConfig,
//!     apply_filters,
//!     write_csv, write_json, write_jsonl, write_report,
//! };
//! # }
//! ```

pub mod filter;
pub mod models;
pub mod output;

pub use filter::{FilterConfig, apply_filters};
pub use models::OutputConfig;

pub use crate::Message;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, to_report_json, write_json, write_jsonl, write_report};
