//! Logging macros for ergonomic log message formatting.
//!
//! The level macros take a [`Logger`](crate::Logger) or
//! [`FieldLogger`](crate::FieldLogger) followed by `format!` arguments. The
//! arguments are only formatted when the level is enabled.
//!
//! # Examples
//!
//! ```
//! use rust_logf::prelude::*;
//! use rust_logf::{fields, info, warn};
//!
//! let logger = Logger::new();
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//!
//! let request = logger.with_fields(fields! { "path" => "/login", "status" => 401 });
//! warn!(request, "rejected after {} attempts", 3);
//! ```

/// Log a message at a runtime level.
///
/// # Examples
///
/// ```
/// # use rust_logf::prelude::*;
/// # let logger = Logger::new();
/// use rust_logf::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level: $crate::LogLevel = $level;
        if logger.enabled(level) {
            logger.log(level, &::std::format!($($arg)+));
        }
    }};
}

/// Log a debug-level message.
///
/// ```
/// # use rust_logf::prelude::*;
/// # let logger = Logger::new();
/// use rust_logf::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a fatal-level message and exit the process with status 1.
///
/// ```no_run
/// # use rust_logf::prelude::*;
/// # let logger = Logger::new();
/// use rust_logf::fatal;
/// fatal!(logger, "cannot bind {}", "0.0.0.0:80");
/// ```
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatal(&::std::format!($($arg)+))
    };
}

/// Build a [`Fields`](crate::Fields) map.
///
/// ```
/// use rust_logf::fields;
///
/// let fields = fields! { "user" => "alice", "attempt" => 2 };
/// assert_eq!(fields.len(), 2);
/// ```
#[macro_export]
macro_rules! fields {
    () => {
        $crate::Fields::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut fields = $crate::Fields::new();
        $( fields.insert($key, $value); )+
        fields
    }};
}
