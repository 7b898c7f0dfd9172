//! Log entry structure
//!
//! A `LogEntry` only lives for the duration of one emission. It borrows the
//! message and fields from the caller instead of copying them.

use super::fields::Fields;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use std::panic::Location;

#[derive(Debug, Clone, Copy)]
pub struct LogEntry<'a> {
    pub level: LogLevel,
    pub message: &'a str,
    pub timestamp: DateTime<Utc>,
    pub location: Option<&'static Location<'static>>,
    pub fields: Option<&'a Fields>,
}

impl<'a> LogEntry<'a> {
    /// Create an entry stamped with the current time.
    pub fn new(level: LogLevel, message: &'a str) -> Self {
        Self::at(level, message, Utc::now())
    }

    /// Create an entry with an explicit timestamp.
    pub fn at(level: LogLevel, message: &'a str, timestamp: DateTime<Utc>) -> Self {
        Self {
            level,
            message,
            timestamp,
            location: None,
            fields: None,
        }
    }

    pub fn with_location(mut self, location: &'static Location<'static>) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_fields(mut self, fields: &'a Fields) -> Self {
        self.fields = Some(fields);
        self
    }
}
