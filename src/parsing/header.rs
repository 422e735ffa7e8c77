//! Header line recognition for bracketed transcripts.
//!
//! A header line opens a new message:
//!
//! ```text
//! [DD/MM/YY, H:MM:SS AM] Sender: Content
//! [DD/MM/YY, H:MM PM] Sender: Content
//! ```
//!
//! Each accepted shape is a [`HeaderPattern`]. A [`LineClassifier`] tries the
//! patterns in priority order (seconds first) and returns a typed
//! [`LineKind`] for every line.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use tracing::debug;

/// Characters some exporters prepend to lines (LRM, RLM, BOM).
const DIRECTION_MARKS: &[char] = &['\u{200E}', '\u{200F}', '\u{FEFF}'];

/// Header shapes, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderPattern {
    /// `[01/02/23, 10:30:45 AM] Alice: Hello`
    WithSeconds,
    /// `[01/02/23, 10:30 AM] Alice: Hello`
    WithoutSeconds,
}

impl HeaderPattern {
    /// Returns the regex for this header shape.
    ///
    /// Named groups: `date`, `time`, `sender`, `content`.
    pub fn pattern(self) -> &'static str {
        match self {
            HeaderPattern::WithSeconds => {
                r"^\[(?P<date>\d{1,2}/\d{1,2}/(?:\d{4}|\d{2})),\s(?P<time>\d{1,2}:\d{2}:\d{2}\s?[AaPp][Mm])\]\s(?P<sender>[^:]+):\s?(?P<content>.*)$"
            }
            HeaderPattern::WithoutSeconds => {
                r"^\[(?P<date>\d{1,2}/\d{1,2}/(?:\d{4}|\d{2})),\s(?P<time>\d{1,2}:\d{2}\s?[AaPp][Mm])\]\s(?P<sender>[^:]+):\s?(?P<content>.*)$"
            }
        }
    }

    /// Returns all header shapes in priority order.
    pub fn all() -> &'static [HeaderPattern] {
        &[HeaderPattern::WithSeconds, HeaderPattern::WithoutSeconds]
    }
}

/// Fields captured from a header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFields<'a> {
    /// Which shape matched.
    pub pattern: HeaderPattern,
    /// Date text as written.
    pub date_text: &'a str,
    /// Time text as written, including the designator.
    pub time_text: &'a str,
    /// Sender with surrounding whitespace removed.
    pub sender: &'a str,
    /// Content after the `Sender: ` prefix.
    pub content: &'a str,
    /// Parsed instant; `None` if the components are not a real date/time.
    pub timestamp: Option<NaiveDateTime>,
}

/// Classification of a single transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// Starts a new message.
    Header(HeaderFields<'a>),
    /// Anything else: a continuation if a message is open, an orphan otherwise.
    Text(&'a str),
}

/// One compiled header shape.
#[derive(Debug, Clone)]
pub struct HeaderMatcher {
    pattern: HeaderPattern,
    regex: Regex,
}

impl HeaderMatcher {
    /// Compiles the regex for `pattern`.
    pub fn new(pattern: HeaderPattern) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern,
            regex: Regex::new(pattern.pattern())?,
        })
    }

    /// Returns the shape this matcher recognizes.
    pub fn pattern(&self) -> HeaderPattern {
        self.pattern
    }

    /// Returns `true` if `line` has this header shape.
    pub fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Extracts header fields from `line`.
    pub fn match_line<'a>(&self, line: &'a str) -> Option<HeaderFields<'a>> {
        let caps = self.regex.captures(line)?;
        let date_text = caps.name("date").map_or("", |m| m.as_str());
        let time_text = caps.name("time").map_or("", |m| m.as_str());
        let sender = caps.name("sender").map_or("", |m| m.as_str().trim());
        let content = caps.name("content").map_or("", |m| m.as_str());

        let timestamp = parse_header_timestamp(date_text, time_text);
        if timestamp.is_none() {
            debug!(date = date_text, time = time_text, "header timestamp is not a valid instant");
        }

        Some(HeaderFields {
            pattern: self.pattern,
            date_text,
            time_text,
            sender,
            content,
            timestamp,
        })
    }
}

/// Ordered list of header matchers.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    matchers: Vec<HeaderMatcher>,
    strip_direction_marks: bool,
}

impl LineClassifier {
    /// Builds a classifier for every [`HeaderPattern`] in priority order.
    pub fn new(strip_direction_marks: bool) -> Result<Self, regex::Error> {
        Self::with_patterns(HeaderPattern::all(), strip_direction_marks)
    }

    /// Builds a classifier trying `patterns` in the given order.
    pub fn with_patterns(
        patterns: &[HeaderPattern],
        strip_direction_marks: bool,
    ) -> Result<Self, regex::Error> {
        let matchers = patterns
            .iter()
            .map(|&p| HeaderMatcher::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            matchers,
            strip_direction_marks,
        })
    }

    /// Classifies one line. The first matching pattern wins.
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if line.trim().is_empty() {
            return LineKind::Blank;
        }

        let candidate = if self.strip_direction_marks {
            line.trim_start_matches(DIRECTION_MARKS)
        } else {
            line
        };

        self.matchers
            .iter()
            .find_map(|m| m.match_line(candidate))
            .map_or(LineKind::Text(line), LineKind::Header)
    }
}

/// 12-hour clock designator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Converts a 12-hour clock hour to 24-hour time.
    ///
    /// `12 AM` is midnight (0) and `12 PM` is noon (12); other PM hours gain 12.
    /// Out-of-range hours are converted arithmetically and rejected later.
    pub fn to_24_hour(self, hour: u32) -> u32 {
        match (self, hour) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h.saturating_add(12),
            (Meridiem::Am, h) => h,
        }
    }
}

/// Parses header date and time texts into an instant.
///
/// Dates are `DD/MM/YY` (two-digit years become `2000 + YY`) or `DD/MM/YYYY`.
/// Times are `H:MM[:SS]` followed by `AM`/`PM`; without a designator the
/// clock is read as 24-hour. Returns `None` when a component is not numeric
/// or the result is not a calendar-valid instant.
///
/// # Example
///
/// ```rust
/// use chatpulse::parsing::parse_header_timestamp;
/// use chrono::{Datelike, Timelike};
///
/// let ts = parse_header_timestamp("01/02/23", "9:15 PM").unwrap();
/// assert_eq!((ts.year(), ts.month(), ts.day()), (2023, 2, 1));
/// assert_eq!(ts.hour(), 21);
///
/// assert!(parse_header_timestamp("31/02/23", "9:15 PM").is_none());
/// ```
pub fn parse_header_timestamp(date_text: &str, time_text: &str) -> Option<NaiveDateTime> {
    let date = parse_header_date(date_text)?;
    let time = parse_header_time(time_text)?;
    Some(date.and_time(time))
}

/// Parses `DD/MM/YY` or `DD/MM/YYYY`.
pub fn parse_header_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().split('/');
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year_text = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    let year: i32 = year_text.parse().ok()?;
    let year = if year_text.len() <= 2 { 2000 + year } else { year };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parses `H:MM[:SS] [AM|PM]`; seconds default to 0.
pub fn parse_header_time(text: &str) -> Option<NaiveTime> {
    let (clock, meridiem) = split_meridiem(text.trim());

    let mut parts = clock.split(':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = parts.next()?.parse().ok()?;
    let second: u32 = match parts.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if parts.next().is_some() {
        return None;
    }

    let hour = meridiem.map_or(hour, |m| m.to_24_hour(hour));
    NaiveTime::from_hms_opt(hour, minute, second)
}

fn split_meridiem(text: &str) -> (&str, Option<Meridiem>) {
    let Some(split) = text.len().checked_sub(2) else {
        return (text, None);
    };
    if !text.is_char_boundary(split) {
        return (text, None);
    }

    let (clock, suffix) = text.split_at(split);
    let meridiem = if suffix.eq_ignore_ascii_case("am") {
        Meridiem::Am
    } else if suffix.eq_ignore_ascii_case("pm") {
        Meridiem::Pm
    } else {
        return (text, None);
    };

    (clock.trim_end(), Some(meridiem))
}
