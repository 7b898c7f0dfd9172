//! Logger configuration loaded from JSON
//!
//! ```json
//! {
//!     "level": "debug",
//!     "timestamp_format": "UnixMillis",
//!     "color": false,
//!     "caller": true,
//!     "scope": "api",
//!     "output": { "type": "file", "path": "/var/log/api.log" }
//! }
//! ```
//!
//! Every key is optional; missing keys take the same defaults as
//! [`Logger::new`].

use super::error::{LoggerError, Result};
use super::line::DEFAULT_SCOPE;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::timestamp::TimestampFormat;
use crate::appenders::{ConsoleAppender, FileAppender};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where lines go
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputTarget {
    Stdout,
    #[default]
    Stderr,
    /// Append to the file at `path`, creating it if needed
    File { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: LogLevel,
    pub timestamp_format: TimestampFormat,
    pub color: bool,
    pub caller: bool,
    pub scope: String,
    pub output: OutputTarget,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::default(),
            timestamp_format: TimestampFormat::default(),
            color: false,
            caller: false,
            scope: DEFAULT_SCOPE.to_string(),
            output: OutputTarget::default(),
        }
    }
}

impl LoggerConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LoggerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the settings that deserialization alone cannot.
    pub fn validate(&self) -> Result<()> {
        self.timestamp_format.validate()?;

        if self.scope.chars().any(char::is_control) {
            return Err(LoggerError::config(
                "scope",
                "must not contain control characters",
            ));
        }

        if let OutputTarget::File { path } = &self.output {
            if path.as_os_str().is_empty() {
                return Err(LoggerError::config("output", "file path is empty"));
            }
        }

        Ok(())
    }
}

impl Logger {
    /// Build a logger from a validated configuration, opening the output.
    pub fn from_config(config: &LoggerConfig) -> Result<Logger> {
        config.validate()?;

        let builder = Logger::builder()
            .min_level(config.level)
            .timestamp_format(config.timestamp_format.clone())
            .color(config.color)
            .caller(config.caller)
            .scope(config.scope.clone());

        let builder = match &config.output {
            OutputTarget::Stdout => builder.writer(ConsoleAppender::stdout()),
            OutputTarget::Stderr => builder.writer(ConsoleAppender::stderr()),
            OutputTarget::File { path } => builder.writer(FileAppender::new(path)?),
        };

        builder.build()
    }
}
