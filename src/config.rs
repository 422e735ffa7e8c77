//! Configuration types for parsing and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`TranscriptConfig`] - how transcript lines are classified and assembled
//! - [`AnalysisConfig`] - window sizes, thresholds and limits of the analysis
//!
//! # Example
//!
//! ```rust
//! use chatpulse::config::{AnalysisConfig, TranscriptConfig};
//!
//! let transcript = TranscriptConfig::new().with_recompute_flags(true);
//! let analysis = AnalysisConfig::new()
//!     .with_window_days(14)
//!     .with_shift_threshold(0.5);
//!
//! assert_eq!(analysis.effective_step(), 7);
//! assert!(analysis.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ChatpulseError, Result};

/// Default number of distinct days per relationship window.
pub const DEFAULT_WINDOW_DAYS: usize = 30;

/// Default relative change above which a window boundary is a pattern shift.
pub const DEFAULT_SHIFT_THRESHOLD: f64 = 0.3;

/// Default latency (in minutes) at or above which a reply is an outlier.
pub const DEFAULT_RESPONSE_OUTLIER_MINUTES: f64 = 1440.0;

/// Default number of ranked terms kept per month.
pub const DEFAULT_TOPICS_PER_MONTH: usize = 10;

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatpulse::config::TranscriptConfig;
///
/// let config = TranscriptConfig::new()
///     .with_strip_direction_marks(false);
/// assert!(!config.recompute_flags_on_continuation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Re-derive media/deletion flags from the folded content when a message
    /// is finalized (default: false, flags come from the header line only)
    pub recompute_flags_on_continuation: bool,

    /// Ignore leading U+200E/U+200F/BOM characters when looking for a header
    /// (default: true)
    pub strip_direction_marks: bool,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            recompute_flags_on_continuation: false,
            strip_direction_marks: true,
        }
    }
}

impl TranscriptConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether flags are recomputed after continuation lines are folded in.
    #[must_use]
    pub fn with_recompute_flags(mut self, enabled: bool) -> Self {
        self.recompute_flags_on_continuation = enabled;
        self
    }

    /// Sets whether leading direction marks are ignored.
    #[must_use]
    pub fn with_strip_direction_marks(mut self, enabled: bool) -> Self {
        self.strip_direction_marks = enabled;
        self
    }
}

/// Configuration for the analysis pipeline.
///
/// All fields have defaults, so partial JSON documents are accepted:
///
/// ```rust
/// # #[cfg(feature = "json-output")]
/// # fn main() -> chatpulse::Result<()> {
/// use chatpulse::config::AnalysisConfig;
///
/// let config = AnalysisConfig::from_json_str(r#"{"window_days": 10}"#)?;
/// assert_eq!(config.window_days, 10);
/// assert_eq!(config.effective_step(), 5);
/// assert_eq!(config.topics_per_month, 10);
/// # Ok(())
/// # }
/// # #[cfg(not(feature = "json-output"))]
/// # fn main() {}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Distinct days per relationship window (default: 30)
    pub window_days: usize,

    /// Days between window starts (default: half the window, rounded up)
    pub window_step: Option<usize>,

    /// Relative change that marks a pattern shift (default: 0.3)
    pub shift_threshold: f64,

    /// Response latencies at or above this many minutes are dropped (default: 1440)
    pub response_outlier_minutes: f64,

    /// Ranked terms kept per month (default: 10)
    pub topics_per_month: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            window_step: None,
            shift_threshold: DEFAULT_SHIFT_THRESHOLD,
            response_outlier_minutes: DEFAULT_RESPONSE_OUTLIER_MINUTES,
            topics_per_month: DEFAULT_TOPICS_PER_MONTH,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the window size in days.
    #[must_use]
    pub fn with_window_days(mut self, days: usize) -> Self {
        self.window_days = days;
        self
    }

    /// Sets an explicit step between window starts.
    #[must_use]
    pub fn with_window_step(mut self, step: usize) -> Self {
        self.window_step = Some(step);
        self
    }

    /// Sets the pattern-shift threshold.
    #[must_use]
    pub fn with_shift_threshold(mut self, threshold: f64) -> Self {
        self.shift_threshold = threshold;
        self
    }

    /// Sets the response-latency outlier cutoff in minutes.
    #[must_use]
    pub fn with_response_outlier_minutes(mut self, minutes: f64) -> Self {
        self.response_outlier_minutes = minutes;
        self
    }

    /// Sets how many ranked terms each month keeps.
    #[must_use]
    pub fn with_topics_per_month(mut self, count: usize) -> Self {
        self.topics_per_month = count;
        self
    }

    /// Returns the step between window starts: the explicit step if set,
    /// otherwise `ceil(window_days / 2)`.
    pub fn effective_step(&self) -> usize {
        self.window_step
            .unwrap_or_else(|| self.window_days.div_ceil(2))
    }

    /// Checks that every setting is in range.
    pub fn validate(&self) -> Result<()> {
        if self.window_days == 0 {
            return Err(ChatpulseError::invalid_config(
                "window_days",
                "must be at least 1",
            ));
        }
        if self.effective_step() == 0 {
            return Err(ChatpulseError::invalid_config(
                "window_step",
                "must be at least 1",
            ));
        }
        if !self.shift_threshold.is_finite() || self.shift_threshold < 0.0 {
            return Err(ChatpulseError::invalid_config(
                "shift_threshold",
                format!("must be a finite non-negative number, got {}", self.shift_threshold),
            ));
        }
        if self.response_outlier_minutes.is_nan() || self.response_outlier_minutes <= 0.0 {
            return Err(ChatpulseError::invalid_config(
                "response_outlier_minutes",
                format!("must be positive, got {}", self.response_outlier_minutes),
            ));
        }
        Ok(())
    }

    /// Parses and validates a configuration from JSON.
    #[cfg(feature = "json-output")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    #[cfg(feature = "json-output")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
