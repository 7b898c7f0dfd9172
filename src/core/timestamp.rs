//! Timestamp formatting utilities
//!
//! Provides the formats accepted for the `timestamp` field. Formatting
//! writes straight into the line buffer.

use super::encoder::ByteWriter;
use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::time::SystemTime;

/// Timestamp format options for the `timestamp` field
///
/// # Examples
///
/// ```
/// use rust_logf::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Default.format(&at), "2025-01-08T10:30:45Z");
/// assert_eq!(TimestampFormat::Unix.format(&at), "1736332245");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// RFC 3339 with up to millisecond precision, trailing zeros trimmed:
    /// `2025-01-08T10:30:45.12Z`
    ///
    /// Whole seconds drop the fraction entirely: `2025-01-08T10:30:45Z`.
    #[default]
    Default,

    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format
    ///
    /// Check it with [`TimestampFormat::validate`] before use; the logger
    /// setters do so.
    Custom(String),
}

impl TimestampFormat {
    /// Build a custom format, rejecting patterns chrono cannot render.
    pub fn custom(pattern: impl Into<String>) -> Result<Self> {
        let format = TimestampFormat::Custom(pattern.into());
        format.validate()?;
        Ok(format)
    }

    /// Reject custom patterns with unknown or malformed specifiers.
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(pattern) = self {
            if pattern.is_empty() {
                return Err(LoggerError::timestamp_format(pattern, "pattern is empty"));
            }
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::timestamp_format(
                    pattern,
                    "unknown or malformed strftime specifier",
                ));
            }
        }
        Ok(())
    }

    /// Append the formatted timestamp to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>, datetime: &DateTime<Utc>) -> fmt::Result {
        match self {
            TimestampFormat::Default => write_trimmed_millis(out, datetime),
            TimestampFormat::Iso8601 => write!(
                ByteWriter(out),
                "{}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ")
            ),
            TimestampFormat::Iso8601Micros => write!(
                ByteWriter(out),
                "{}",
                datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ")
            ),
            TimestampFormat::Rfc3339 => write!(ByteWriter(out), "{}", datetime.format("%+")),
            TimestampFormat::Unix => write!(ByteWriter(out), "{}", datetime.timestamp()),
            TimestampFormat::UnixMillis => {
                write!(ByteWriter(out), "{}", datetime.timestamp_millis())
            }
            TimestampFormat::UnixMicros => {
                write!(ByteWriter(out), "{}", datetime.timestamp_micros())
            }
            TimestampFormat::Custom(pattern) => {
                write!(ByteWriter(out), "{}", datetime.format(pattern))
            }
        }
    }

    /// Format a `DateTime<Utc>` into an owned string
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        let mut out = Vec::with_capacity(32);
        if self.write_to(&mut out, datetime).is_err() {
            return String::new();
        }
        String::from_utf8(out).unwrap_or_default()
    }

    /// Format a `SystemTime` according to this format
    #[must_use]
    pub fn format_system_time(&self, timestamp: &SystemTime) -> String {
        let datetime: DateTime<Utc> = (*timestamp).into();
        self.format(&datetime)
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }
}

fn write_trimmed_millis(out: &mut Vec<u8>, datetime: &DateTime<Utc>) -> fmt::Result {
    write!(ByteWriter(&mut *out), "{}", datetime.format("%Y-%m-%dT%H:%M:%S"))?;

    // Leap seconds report nanos >= 1e9.
    let millis = (datetime.nanosecond() / 1_000_000).min(999);
    if millis > 0 {
        let mut digits = *b"000";
        digits[0] = b'0' + (millis / 100) as u8;
        digits[1] = b'0' + (millis / 10 % 10) as u8;
        digits[2] = b'0' + (millis % 10) as u8;
        let len = digits.iter().rposition(|&d| d != b'0').map_or(0, |i| i + 1);
        out.push(b'.');
        out.extend_from_slice(&digits[..len]);
    }
    out.push(b'Z');
    Ok(())
}
