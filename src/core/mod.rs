//! Core logger types

pub mod buffer_pool;
pub mod config;
pub mod encoder;
pub mod error;
pub mod fields;
pub mod line;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod sink;
pub mod timestamp;

pub use buffer_pool::{BufferPool, PoolStats, PooledBuffer};
pub use config::{LoggerConfig, OutputTarget};
pub use error::{LoggerError, Result};
pub use fields::{FieldValue, Fields};
pub use line::FormatterConfig;
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{FieldLogger, Logger, LoggerBuilder, FATAL_EXIT_CODE};
pub use metrics::LoggerMetrics;
pub use sink::SyncWriter;
pub use timestamp::TimestampFormat;
