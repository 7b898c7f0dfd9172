//! Integration tests for the logfmt logger
//!
//! These tests verify:
//! - Exact line layout and field order
//! - Log injection prevention
//! - Level filtering
//! - File output
//! - Configuration loading
//! - Caller capture and coloring

use parking_lot::Mutex;
use rust_logf::prelude::*;
use rust_logf::{fields, info, BufferPool};
use std::fs;
use std::io::{self, Write};
use std::sync::Arc;
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("log output is UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture() -> (Logger, SharedBuffer) {
    let out = SharedBuffer::default();
    (Logger::with_writer(out.clone()), out)
}

/// Split a line into its `timestamp` value and the rest.
fn strip_timestamp(line: &str) -> (&str, &str) {
    let rest = line
        .strip_prefix("timestamp=")
        .expect("line starts with timestamp");
    rest.split_once(' ').expect("fields after timestamp")
}

#[test]
#[allow(clippy::approx_constant)]
fn test_mixed_fields_line() {
    let (logger, out) = capture();
    let logger = logger.with_scope("svc");

    logger
        .with_fields(fields! { "count" => 42, "ratio" => 3.14, "name" => "ok" })
        .info("started");

    let text = out.contents();
    assert_eq!(text.lines().count(), 1);
    assert!(text.ends_with('\n'));

    let (timestamp, rest) = strip_timestamp(text.trim_end_matches('\n'));
    assert!(timestamp.ends_with('Z'), "timestamp {}", timestamp);

    let prefix = "level=info message=started sc=svc ";
    assert!(rest.starts_with(prefix), "{}", rest);

    let mut variable: Vec<&str> = rest[prefix.len()..].split(' ').collect();
    variable.sort_unstable();
    assert_eq!(variable, ["count=42", "name=ok", "ratio=3.14"]);
}

#[test]
fn test_no_fields_no_trailing_space() {
    let (logger, out) = capture();
    logger.info("started");
    assert!(out.contents().ends_with("sc=general\n"));
}

#[test]
fn test_log_injection_prevention() {
    let (logger, out) = capture();

    let malicious = "User login\nlevel=error message=\"fake\"\r\n";
    logger.with_field("user", "eve\nlevel=fatal").warn(malicious);

    let text = out.contents();
    assert_eq!(text.lines().count(), 1, "one call must yield one line");
    assert!(text.contains(r#"message="User login\nlevel=error message=\"fake\"\r\n""#));
    assert!(text.contains(r#"user="eve\nlevel=fatal""#));
}

#[test]
fn test_quoted_message() {
    let (logger, out) = capture();
    logger.info("hello \"world\"\n");
    assert!(out
        .contents()
        .contains(r#" message="hello \"world\"\n" sc=general"#));
}

#[test]
fn test_invalid_utf8_bytes() {
    let (logger, out) = capture();
    logger
        .with_field("raw", FieldValue::Bytes(vec![b'o', b'k', 0xff, b'!']))
        .info("bytes");
    assert!(out.contents().ends_with(" raw=\"ok\\ufffd!\"\n"));
}

#[test]
fn test_level_filtering() {
    static POOL: BufferPool = BufferPool::new();

    for threshold in LogLevel::ALL {
        let (logger, out) = capture();
        let logger = logger.with_pool(&POOL).with_level(threshold);

        for level in LogLevel::ALL {
            if level != LogLevel::Fatal {
                logger.log(level, "gate");
            }
        }

        let expected: Vec<String> = LogLevel::ALL
            .iter()
            .filter(|level| **level >= threshold && **level != LogLevel::Fatal)
            .map(|level| format!("level={}", level))
            .collect();
        let actual: Vec<String> = out
            .contents()
            .lines()
            .map(|line| strip_timestamp(line).1.split(' ').next().unwrap().to_string())
            .collect();
        assert_eq!(actual, expected, "threshold {}", threshold);
    }
}

#[test]
fn test_filtered_calls_do_not_touch_sink_or_pool() {
    static POOL: BufferPool = BufferPool::new();

    let (logger, out) = capture();
    let logger = logger.with_pool(&POOL).with_level(LogLevel::Error);

    for i in 0..1000 {
        logger.debug("dropped");
        logger.with_field("i", i).warn("dropped");
        info!(logger, "dropped {}", i);
    }

    assert!(out.contents().is_empty());
    assert_eq!(POOL.stats().acquired(), 0);
    assert_eq!(logger.metrics().lines_written(), 0);
    assert_eq!(logger.metrics().write_failures(), 0);
}

#[test]
fn test_runtime_level_change() {
    let (logger, out) = capture();

    logger.debug("hidden");
    logger.set_min_level(LogLevel::Debug);
    logger.debug("shown");

    let text = out.contents();
    assert!(!text.contains("hidden"));
    assert!(text.contains("message=shown"));
}

#[test]
fn test_file_output() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let appender = FileAppender::new(&log_file).expect("Failed to create appender");
    let logger = Logger::with_writer(appender).with_scope("file");

    logger.info("first");
    logger.with_field("n", 2).error("second");

    // Each line is flushed as it is written.
    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("level=info message=first sc=file"));
    assert!(lines[1].ends_with("level=error message=second sc=file n=2"));
}

#[test]
fn test_file_output_appends() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("append.log");

    for run in 0..3 {
        let logger = Logger::with_writer(FileAppender::new(&log_file).unwrap());
        logger.with_field("run", run).info("boot");
    }

    let content = fs::read_to_string(&log_file).unwrap();
    assert_eq!(content.lines().count(), 3);
}

#[test]
fn test_config_to_file_logger() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("configured.log");

    let json = format!(
        r#"{{
            "level": "debug",
            "timestamp_format": "Unix",
            "scope": "cfg",
            "output": {{ "type": "file", "path": {} }}
        }}"#,
        serde_json::to_string(&log_file).unwrap()
    );
    let config = LoggerConfig::from_json(&json).expect("valid config");
    let logger = Logger::from_config(&config).expect("logger from config");

    logger.debug("configured");

    let content = fs::read_to_string(&log_file).unwrap();
    let (timestamp, rest) = strip_timestamp(content.trim_end());
    assert!(timestamp.parse::<i64>().is_ok(), "unix timestamp {}", timestamp);
    assert_eq!(rest, "level=debug message=configured sc=cfg");
}

#[test]
fn test_invalid_config_rejected() {
    assert!(LoggerConfig::from_json(r#"{"level": "loud"}"#).is_err());
    assert!(LoggerConfig::from_json("not json").is_err());
    assert!(matches!(
        Logger::builder()
            .timestamp_format(TimestampFormat::Custom("%".to_string()))
            .build(),
        Err(LoggerError::InvalidTimestampFormat { .. })
    ));
}

#[test]
fn test_caller_capture() {
    let (logger, out) = capture();
    let logger = logger.with_caller(true);

    let line = line!() + 1;
    logger.with_field("k", "v").error("boom");

    let expected = format!(" sc=general caller={}:{} k=v\n", file!(), line);
    assert!(out.contents().ends_with(&expected), "{}", out.contents());
}

#[track_caller]
fn log_through_helper(logger: &Logger) {
    logger.info("via helper");
}

#[test]
fn test_track_caller_helper_reports_outer_site() {
    let (logger, out) = capture();
    let logger = logger.with_caller(true);

    let line = line!() + 1;
    log_through_helper(&logger);

    let expected = format!(" caller={}:{}\n", file!(), line);
    assert!(out.contents().ends_with(&expected), "{}", out.contents());
}

#[test]
fn test_colored_output() {
    let (logger, out) = capture();
    let logger = logger.with_color(true);

    logger.error("red");

    let text = out.contents();
    assert!(text.starts_with("\x1b[31mtimestamp\x1b[0m="));
    assert!(text.contains(" \x1b[31mlevel\x1b[0m=error "));
    assert!(text.contains(" \x1b[31mmessage\x1b[0m=red "));
    assert!(text.ends_with(" \x1b[31msc\x1b[0m=general\n"));
}

#[test]
fn test_with_error_field() {
    let (logger, out) = capture();
    let err = "12x".parse::<i32>().unwrap_err();

    logger.with_error(&err).error("parse failed");

    assert!(out
        .contents()
        .ends_with(" error=\"invalid digit found in string\"\n"));
}

#[test]
fn test_debug_fallback_is_escaped() {
    #[derive(Debug)]
    #[allow(dead_code)]
    struct Request {
        path: &'static str,
    }

    let (logger, out) = capture();
    logger
        .with_field("req", FieldValue::debug(Request { path: "/a b" }))
        .with_field("ok", true)
        .info("debug");

    let text = out.contents();
    assert!(text.contains(r#"req="Request { path: \"/a b\" }""#), "{}", text);
    assert!(text.contains(" ok=true"));
}
