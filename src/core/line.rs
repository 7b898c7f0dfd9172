//! Line assembly
//!
//! Writes one complete logfmt line for a [`LogEntry`]:
//!
//! ```text
//! timestamp=<ts> level=<lvl> message=<msg> sc=<scope> [caller=<file:line>] [k=v ...]\n
//! ```

use super::encoder;
use super::log_entry::LogEntry;
use super::log_level::{LogLevel, ANSI_RESET};
use super::timestamp::TimestampFormat;

pub const TIMESTAMP_KEY: &str = "timestamp";
pub const LEVEL_KEY: &str = "level";
pub const MESSAGE_KEY: &str = "message";
pub const SCOPE_KEY: &str = "sc";
pub const CALLER_KEY: &str = "caller";

/// Written as the caller when no location is known.
pub const UNKNOWN_CALLER: &str = "???:0";

/// Scope used when none is configured.
pub const DEFAULT_SCOPE: &str = "general";

/// Formatting options applied to every line of a logger
///
/// # Examples
///
/// ```
/// use rust_logf::core::{FormatterConfig, TimestampFormat};
///
/// let config = FormatterConfig::new()
///     .with_timestamp_format(TimestampFormat::Unix)
///     .with_color(true)
///     .with_scope("billing");
/// assert_eq!(config.scope, "billing");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    /// Format of the `timestamp` field
    pub timestamp_format: TimestampFormat,
    /// Wrap keys in the level's ANSI color
    pub color: bool,
    /// Emit the `caller` field
    pub include_caller: bool,
    /// Value of the `sc` field
    pub scope: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            timestamp_format: TimestampFormat::default(),
            color: false,
            include_caller: false,
            scope: DEFAULT_SCOPE.to_string(),
        }
    }
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_caller(mut self, include: bool) -> Self {
        self.include_caller = include;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }
}

/// Append the full line for `entry`, newline included, to `buf`.
pub fn write_line(buf: &mut Vec<u8>, config: &FormatterConfig, entry: &LogEntry<'_>) {
    let level = entry.level;
    let color = config.color;

    write_key(buf, TIMESTAMP_KEY, level, color);
    encoder::write_timestamp(buf, &config.timestamp_format, &entry.timestamp);

    buf.push(b' ');
    write_key(buf, LEVEL_KEY, level, color);
    buf.extend_from_slice(level.to_str().as_bytes());

    buf.push(b' ');
    write_key(buf, MESSAGE_KEY, level, color);
    encoder::write_str(buf, entry.message);

    buf.push(b' ');
    write_key(buf, SCOPE_KEY, level, color);
    encoder::write_str(buf, &config.scope);

    if config.include_caller {
        buf.push(b' ');
        write_key(buf, CALLER_KEY, level, color);
        match entry.location {
            Some(location) => encoder::write_args(
                buf,
                format_args!("{}:{}", location.file(), location.line()),
            ),
            None => buf.extend_from_slice(UNKNOWN_CALLER.as_bytes()),
        }
    }

    if let Some(fields) = entry.fields {
        for (key, value) in fields {
            buf.push(b' ');
            write_key(buf, key, level, color);
            encoder::write_value(buf, value, &config.timestamp_format);
        }
    }

    buf.push(b'\n');
}

/// Append `key=`, coloring the key (never the `=`) when enabled.
fn write_key(buf: &mut Vec<u8>, key: &str, level: LogLevel, color: bool) {
    if color {
        buf.extend_from_slice(level.ansi_color().as_bytes());
        encoder::write_str(buf, key);
        buf.extend_from_slice(ANSI_RESET.as_bytes());
    } else {
        encoder::write_str(buf, key);
    }
    buf.push(b'=');
}
