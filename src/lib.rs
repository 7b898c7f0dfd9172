//! # rust_logf
//!
//! A logfmt structured logger. Every call produces one `key=value` line:
//!
//! ```text
//! timestamp=2025-01-08T10:30:45.12Z level=info message="user login" sc=api user=alice
//! ```
//!
//! ## Features
//!
//! - **Cheap when filtered**: a call below the minimum level does no work
//! - **Safe output**: keys and values are escaped and quoted as needed
//! - **Thread safe**: concurrent lines never interleave
//! - **Caller capture**: optional `caller=<file>:<line>` via `#[track_caller]`
//!
//! ## Example
//!
//! ```
//! use rust_logf::prelude::*;
//! use rust_logf::{fields, info};
//!
//! let logger = Logger::builder()
//!     .min_level(LogLevel::Debug)
//!     .scope("api")
//!     .build()
//!     .unwrap();
//!
//! info!(logger, "listening on port {}", 8080);
//! logger
//!     .with_fields(fields! { "user" => "alice", "attempt" => 2 })
//!     .warn("login retry");
//! ```

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, ConsoleTarget, FileAppender};
    pub use crate::core::{
        FieldLogger, FieldValue, Fields, LogLevel, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, OutputTarget, Result, TimestampFormat,
    };
}

pub use appenders::{ConsoleAppender, ConsoleTarget, FileAppender};
pub use core::{
    BufferPool, FieldLogger, FieldValue, Fields, FormatterConfig, LogEntry, LogLevel, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, LoggerMetrics, OutputTarget, PoolStats, Result,
    SyncWriter, TimestampFormat, FATAL_EXIT_CODE,
};
