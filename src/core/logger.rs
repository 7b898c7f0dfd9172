//! Main logger implementation
//!
//! Every emission runs on the calling thread: level check, buffer checkout,
//! line assembly, one locked write. There is no worker thread and no queue.

use super::{
    buffer_pool::BufferPool,
    error::Result,
    fields::{FieldValue, Fields},
    line::{self, FormatterConfig},
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sink::SyncWriter,
    timestamp::TimestampFormat,
};
use crate::appenders::ConsoleAppender;
use std::io::Write;
use std::panic::Location;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Exit status of the process after a fatal-level line.
pub const FATAL_EXIT_CODE: i32 = 1;

/// logfmt logger
///
/// Cloning is cheap and clones share the destination and the minimum level.
/// The `with_*` methods return a new logger; only [`Logger::set_min_level`]
/// changes a logger in place.
///
/// # Example
///
/// ```
/// use rust_logf::prelude::*;
///
/// let logger = Logger::new().with_scope("api");
/// logger.info("server started");
/// logger
///     .with_fields(Fields::new().with_field("port", 8080))
///     .info("listening");
/// ```
#[derive(Clone)]
pub struct Logger {
    min_level: Arc<AtomicU8>,
    sink: Arc<SyncWriter>,
    format: Arc<FormatterConfig>,
    pool: &'static BufferPool,
}

impl Logger {
    /// Logger writing to stderr at `info` level with default formatting.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(ConsoleAppender::stderr())
    }

    /// Logger writing to `writer` with default settings.
    #[must_use]
    pub fn with_writer<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            min_level: Arc::new(AtomicU8::new(LogLevel::default() as u8)),
            sink: Arc::new(SyncWriter::new(writer)),
            format: Arc::new(FormatterConfig::default()),
            pool: BufferPool::global(),
        }
    }

    /// Change the minimum level of this logger and every clone sharing it.
    pub fn set_min_level(&self, level: LogLevel) {
        self.min_level.store(level as u8, Ordering::Relaxed);
    }

    pub fn min_level(&self) -> LogLevel {
        LogLevel::from_u8(self.min_level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// True if a call at `level` would produce a line.
    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level as u8 >= self.min_level.load(Ordering::Relaxed)
    }

    /// New logger with its own minimum level.
    #[must_use]
    pub fn with_level(&self, level: LogLevel) -> Self {
        Self {
            min_level: Arc::new(AtomicU8::new(level as u8)),
            ..self.clone()
        }
    }

    /// New logger writing to `writer`.
    #[must_use]
    pub fn with_output<W>(&self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            sink: Arc::new(SyncWriter::new(writer)),
            ..self.clone()
        }
    }

    /// New logger using `format` for the timestamp field.
    pub fn with_timestamp_format(&self, format: TimestampFormat) -> Result<Self> {
        format.validate()?;
        Ok(self.with_format(|config| config.timestamp_format = format))
    }

    /// New logger with key coloring switched on or off.
    #[must_use]
    pub fn with_color(&self, color: bool) -> Self {
        self.with_format(|config| config.color = color)
    }

    /// New logger with the `caller` field switched on or off.
    #[must_use]
    pub fn with_caller(&self, include: bool) -> Self {
        self.with_format(|config| config.include_caller = include)
    }

    /// New logger writing `scope` in the `sc` field.
    #[must_use]
    pub fn with_scope(&self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.with_format(|config| config.scope = scope)
    }

    /// New logger drawing buffers from `pool` instead of the global one.
    #[must_use]
    pub fn with_pool(&self, pool: &'static BufferPool) -> Self {
        Self {
            pool,
            ..self.clone()
        }
    }

    fn with_format(&self, update: impl FnOnce(&mut FormatterConfig)) -> Self {
        let mut format = (*self.format).clone();
        update(&mut format);
        Self {
            format: Arc::new(format),
            ..self.clone()
        }
    }

    pub fn formatter_config(&self) -> &FormatterConfig {
        &self.format
    }

    /// Counters of the underlying sink.
    pub fn metrics(&self) -> &LoggerMetrics {
        self.sink.metrics()
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    /// Attach fields to subsequent lines.
    #[must_use]
    pub fn with_fields(&self, fields: Fields) -> FieldLogger {
        FieldLogger {
            logger: self.clone(),
            fields,
        }
    }

    /// Attach a single field.
    #[must_use]
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<FieldValue>) -> FieldLogger {
        self.with_fields(Fields::new().with_field(key, value))
    }

    /// Attach `err` under the `error` key.
    #[must_use]
    pub fn with_error(&self, err: &dyn std::error::Error) -> FieldLogger {
        self.with_field("error", err.to_string())
    }

    /// Write a line at `level`. A fatal line exits the process like [`Logger::fatal`].
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: &str) {
        self.emit(level, message, None, Location::caller());
        exit_if_fatal(level);
    }

    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.emit(LogLevel::Debug, message, None, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: &str) {
        self.emit(LogLevel::Info, message, None, Location::caller());
    }

    #[track_caller]
    pub fn warn(&self, message: &str) {
        self.emit(LogLevel::Warn, message, None, Location::caller());
    }

    #[track_caller]
    pub fn error(&self, message: &str) {
        self.emit(LogLevel::Error, message, None, Location::caller());
    }

    /// Write a fatal line, then exit the process with [`FATAL_EXIT_CODE`].
    #[track_caller]
    pub fn fatal(&self, message: &str) -> ! {
        self.emit(LogLevel::Fatal, message, None, Location::caller());
        std::process::exit(FATAL_EXIT_CODE)
    }

    /// Write a prepared entry.
    ///
    /// The level filter still applies, and the `caller` field falls back to
    /// a placeholder if the entry carries no location. A fatal entry is
    /// written but does not exit.
    pub fn log_entry(&self, entry: &LogEntry<'_>) {
        if !self.enabled(entry.level) {
            return;
        }
        self.write_entry(entry);
    }

    fn emit(
        &self,
        level: LogLevel,
        message: &str,
        fields: Option<&Fields>,
        location: &'static Location<'static>,
    ) {
        // Nothing below this check runs for filtered calls.
        if !self.enabled(level) {
            return;
        }

        let mut entry = LogEntry::new(level, message);
        if self.format.include_caller {
            entry = entry.with_location(location);
        }
        if let Some(fields) = fields {
            entry = entry.with_fields(fields);
        }
        self.write_entry(&entry);
    }

    fn write_entry(&self, entry: &LogEntry<'_>) {
        let mut buf = self.pool.acquire();
        line::write_line(&mut buf, &self.format, entry);
        self.sink.write_line(&buf);
    }
}

fn exit_if_fatal(level: LogLevel) {
    if level == LogLevel::Fatal {
        std::process::exit(FATAL_EXIT_CODE);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.min_level())
            .field("format", &self.format)
            .field("sink", &self.sink)
            .finish()
    }
}

/// Logger with fields attached to every line it writes
#[derive(Clone, Debug)]
pub struct FieldLogger {
    logger: Logger,
    fields: Fields,
}

impl FieldLogger {
    /// Add more fields; new values win on duplicate names.
    #[must_use]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields.merge(fields);
        self
    }

    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key, value);
        self
    }

    #[must_use]
    pub fn with_error(self, err: &dyn std::error::Error) -> Self {
        self.with_field("error", err.to_string())
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.logger.enabled(level)
    }

    /// Write a line at `level`. A fatal line exits the process like [`FieldLogger::fatal`].
    #[track_caller]
    pub fn log(&self, level: LogLevel, message: &str) {
        self.logger
            .emit(level, message, Some(&self.fields), Location::caller());
        exit_if_fatal(level);
    }

    #[track_caller]
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    #[track_caller]
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    #[track_caller]
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Write a fatal line, then exit the process with [`FATAL_EXIT_CODE`].
    #[track_caller]
    pub fn fatal(&self, message: &str) -> ! {
        self.log(LogLevel::Fatal, message);
        std::process::exit(FATAL_EXIT_CODE)
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_logf::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .writer(ConsoleAppender::stdout())
///     .timestamp_format(TimestampFormat::UnixMillis)
///     .scope("worker")
///     .caller(true)
///     .build()
///     .unwrap();
/// assert!(logger.enabled(LogLevel::Debug));
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    writer: Option<Box<dyn Write + Send>>,
    format: FormatterConfig,
    pool: &'static BufferPool,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::default(),
            writer: None,
            format: FormatterConfig::default(),
            pool: BufferPool::global(),
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the destination; stderr if never called
    #[must_use = "builder methods return a new value"]
    pub fn writer<W>(mut self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Set the timestamp format; checked by `build`
    #[must_use = "builder methods return a new value"]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.format.timestamp_format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn color(mut self, color: bool) -> Self {
        self.format.color = color;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn caller(mut self, include: bool) -> Self {
        self.format.include_caller = include;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.format.scope = scope.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn pool(mut self, pool: &'static BufferPool) -> Self {
        self.pool = pool;
        self
    }

    /// Build the Logger
    pub fn build(self) -> Result<Logger> {
        self.format.timestamp_format.validate()?;

        let sink = match self.writer {
            Some(writer) => SyncWriter::new(writer),
            None => SyncWriter::new(ConsoleAppender::stderr()),
        };

        Ok(Logger {
            min_level: Arc::new(AtomicU8::new(self.min_level as u8)),
            sink: Arc::new(sink),
            format: Arc::new(self.format),
            pool: self.pool,
        })
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    /// Create a builder for Logger
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}
