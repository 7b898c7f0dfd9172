//! Synchronized output sink
//!
//! `SyncWriter` owns the destination behind a mutex. One finished line is
//! written and flushed per lock acquisition, so bytes of two lines never
//! interleave. Failures are reported on stderr and swallowed.

use super::error::Result;
use super::metrics::LoggerMetrics;
use colored::Colorize;
use parking_lot::Mutex;
use std::fmt;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};

/// Report the first failure, then every this many.
const REPORT_EVERY: u64 = 1000;

pub struct SyncWriter {
    writer: Mutex<Box<dyn Write + Send>>,
    metrics: LoggerMetrics,
}

impl SyncWriter {
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: Mutex::new(Box::new(writer)),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Write one complete line and flush it.
    ///
    /// Returns `false` if the destination failed or panicked; the failure has
    /// already been counted and reported.
    pub fn write_line(&self, line: &[u8]) -> bool {
        let result = {
            let mut writer = self.writer.lock();
            panic::catch_unwind(AssertUnwindSafe(|| {
                writer.write_all(line)?;
                writer.flush()
            }))
        };

        match result {
            Ok(Ok(())) => {
                self.metrics.record_written(line.len());
                true
            }
            Ok(Err(e)) => {
                self.report_failure(&e);
                false
            }
            Err(panic_info) => {
                let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic_info.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                };
                self.report_failure(&format_args!("writer panicked: {}", panic_msg));
                false
            }
        }
    }

    /// Flush the destination.
    pub fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    fn report_failure(&self, reason: &dyn fmt::Display) {
        let previous = self.metrics.record_write_failure();
        let failures = previous + 1;
        if previous == 0 || failures % REPORT_EVERY == 0 {
            eprintln!(
                "{} failed to write log line ({} failed so far): {}",
                "[LOGGER ERROR]".red().bold(),
                failures,
                reason
            );
        }
    }
}

impl fmt::Debug for SyncWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncWriter")
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}
