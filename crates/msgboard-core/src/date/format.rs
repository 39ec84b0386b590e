//! Display labels for date tokens.

use std::fmt::Write;

use chrono::{Locale, NaiveDate, NaiveTime};

use super::{DateToken, Normalized};

/// Medium date pattern: day, abbreviated month, year.
pub const DEFAULT_PATTERN: &str = "%-d %b %Y";

/// Locale short date, used when the configured pattern cannot be rendered.
const SHORT_DATE_PATTERN: &str = "%x";

/// Renders date tokens as human-readable labels.
#[derive(Debug, Clone)]
pub struct DateFormatter {
    locale: Locale,
    pattern: String,
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(Locale::fr_FR)
    }
}

impl DateFormatter {
    /// Creates a formatter for `locale` using [`DEFAULT_PATTERN`].
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }

    /// Replaces the label pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Formats a calendar day.
    ///
    /// Falls back to the locale short date, then to ISO, if the pattern
    /// cannot be rendered.
    #[must_use]
    pub fn format_date(&self, date: NaiveDate) -> String {
        render(date, &self.pattern, self.locale)
            .or_else(|| {
                tracing::debug!(pattern = %self.pattern, "date pattern failed, using short date");
                render(date, SHORT_DATE_PATTERN, self.locale)
            })
            .unwrap_or_else(|| date.format("%Y-%m-%d").to_string())
    }

    /// Label for a token: formatted when parseable, the raw string otherwise.
    #[must_use]
    pub fn label(&self, token: &DateToken) -> String {
        match token.normalize() {
            Normalized::Parsed(parsed) => self.format_date(parsed.date),
            Normalized::Unparseable => token.as_str().to_string(),
        }
    }
}

fn render(date: NaiveDate, pattern: &str, locale: Locale) -> Option<String> {
    let stamp = date.and_time(NaiveTime::MIN).and_utc();
    let mut out = String::new();
    write!(out, "{}", stamp.format_localized(pattern, locale)).ok()?;
    Some(out)
}
