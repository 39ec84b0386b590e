//! Date normalization for server-supplied date strings.
//!
//! The message API hands out dates as free-form strings. Each string is
//! tried against an ordered list of calendar formats, then against generic
//! timestamp forms; whatever matches none of them is classified
//! [`Normalized::Unparseable`] and shown verbatim.

mod format;

use std::cmp::{Ordering, Reverse};
use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub use format::{DEFAULT_PATTERN, DateFormatter};

/// A raw date string as received from the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateToken(String);

impl DateToken {
    /// Wraps a raw date string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for an empty (or whitespace-only) token.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Normalizes the token. Never fails; see [`normalize`].
    #[must_use]
    pub fn normalize(&self) -> Normalized {
        normalize(&self.0)
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DateToken {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for DateToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Which parsing strategy recognized a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateFormat {
    /// `yyyy-MM-dd`.
    IsoDate,
    /// `dd/MM/yyyy`.
    DayMonthYearSlash,
    /// `MM/dd/yyyy`.
    MonthDayYearSlash,
    /// `dd-MM-yyyy`.
    DayMonthYearDash,
    /// `yyyyMMdd`.
    Compact,
    /// A generic timestamp (RFC 3339, RFC 2822 or naive date-time).
    Timestamp,
}

impl DateFormat {
    /// Calendar formats in precedence order.
    pub const CALENDAR: [Self; 5] = [
        Self::IsoDate,
        Self::DayMonthYearSlash,
        Self::MonthDayYearSlash,
        Self::DayMonthYearDash,
        Self::Compact,
    ];

    /// The `strftime` pattern for calendar formats.
    #[must_use]
    pub const fn pattern(self) -> Option<&'static str> {
        match self {
            Self::IsoDate => Some("%Y-%m-%d"),
            Self::DayMonthYearSlash => Some("%d/%m/%Y"),
            Self::MonthDayYearSlash => Some("%m/%d/%Y"),
            Self::DayMonthYearDash => Some("%d-%m-%Y"),
            Self::Compact => Some("%Y%m%d"),
            Self::Timestamp => None,
        }
    }
}

/// Naive date-time layouts accepted by the timestamp fallback.
const NAIVE_TIMESTAMP_PATTERNS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Loose date-only layouts accepted after the timestamp forms.
const LOOSE_DATE_PATTERNS: [&str; 2] = ["%Y/%m/%d", "%B %d, %Y"];

/// A token that was recognized as a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedDate {
    /// Calendar day.
    pub date: NaiveDate,
    /// Local wall-clock instant used for ordering (midnight for plain dates).
    pub instant: NaiveDateTime,
    /// Strategy that matched.
    pub format: DateFormat,
}

/// Outcome of normalizing a [`DateToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalized {
    /// The token names a calendar date.
    Parsed(ParsedDate),
    /// No strategy matched, or the token was empty.
    Unparseable,
}

impl Normalized {
    /// Returns the parsed date, if any.
    #[must_use]
    pub const fn parsed(&self) -> Option<&ParsedDate> {
        match self {
            Self::Parsed(parsed) => Some(parsed),
            Self::Unparseable => None,
        }
    }

    /// Returns the calendar day, if any.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Parsed(parsed) => Some(parsed.date),
            Self::Unparseable => None,
        }
    }

    /// Returns true if the token was recognized.
    #[must_use]
    pub const fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    /// Sort key: parsed before unparseable, parsed ones most recent first.
    fn sort_key(&self) -> (bool, Reverse<Option<NaiveDateTime>>) {
        match self {
            Self::Parsed(parsed) => (false, Reverse(Some(parsed.instant))),
            Self::Unparseable => (true, Reverse(None)),
        }
    }
}

/// Normalizes a raw date string.
///
/// Calendar formats are tried first in [`DateFormat::CALENDAR`] order and
/// the first one yielding a valid date wins. Then RFC 3339, RFC 2822,
/// naive date-time layouts and loose forms (`2024/03/01`, `March 1, 2024`)
/// are tried. Zoned timestamps are converted to
/// local time.
#[must_use]
pub fn normalize(raw: &str) -> Normalized {
    let input = raw.trim();
    if input.is_empty() {
        return Normalized::Unparseable;
    }

    for format in DateFormat::CALENDAR {
        let Some(pattern) = format.pattern() else {
            continue;
        };
        if let Ok(date) = NaiveDate::parse_from_str(input, pattern) {
            return Normalized::Parsed(ParsedDate {
                date,
                instant: date.and_time(NaiveTime::MIN),
                format,
            });
        }
    }

    parse_timestamp(input).map_or(Normalized::Unparseable, |instant| {
        Normalized::Parsed(ParsedDate {
            date: instant.date(),
            instant,
            format: DateFormat::Timestamp,
        })
    })
}

fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NAIVE_TIMESTAMP_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(input, pattern).ok())
        .or_else(|| {
            LOOSE_DATE_PATTERNS.iter().find_map(|pattern| {
                NaiveDate::parse_from_str(input, pattern)
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
        })
}

/// Orders two normalized tokens: most recent first, unparseable last.
///
/// Unparseable tokens compare equal to each other.
#[must_use]
pub fn compare(a: &Normalized, b: &Normalized) -> Ordering {
    a.sort_key().cmp(&b.sort_key())
}

/// Sorts tokens most recent first with unparseable tokens last.
///
/// The sort is stable: tokens naming the same instant, and unparseable
/// tokens among themselves, keep their input order.
pub fn sort_tokens(tokens: &mut [DateToken]) {
    tokens.sort_by_cached_key(|token| token.normalize().sort_key());
}

/// Returns a sorted copy of `tokens`. See [`sort_tokens`].
#[must_use]
pub fn sorted(tokens: &[DateToken]) -> Vec<DateToken> {
    let mut out = tokens.to_vec();
    sort_tokens(&mut out);
    out
}
