//! Fatal-level calls terminate the process
//!
//! The test binary re-runs itself with `CHILD_ENV` set so that only the
//! child process executes the fatal call.

use rust_logf::prelude::*;
use rust_logf::FATAL_EXIT_CODE;
use std::env;
use std::process::Command;

const CHILD_ENV: &str = "RUST_LOGF_FATAL_CHILD";

fn run_child(test_name: &str) -> std::process::Output {
    let exe = env::current_exe().expect("Failed to locate test binary");
    Command::new(exe)
        .args([test_name, "--exact", "--nocapture", "--test-threads=1"])
        .env(CHILD_ENV, test_name)
        .output()
        .expect("Failed to spawn child test process")
}

/// First log line in the child's stdout.
///
/// libtest prints `test <name> ... ` without a newline before the child
/// runs, so the line may share its start with that prefix.
fn log_line(stdout: &str) -> Option<&str> {
    stdout
        .lines()
        .find_map(|line| line.find("timestamp=").map(|i| &line[i..]))
}

fn is_child(test_name: &str) -> bool {
    env::var(CHILD_ENV).is_ok_and(|name| name == test_name)
}

#[test]
fn fatal_child_logger() {
    if !is_child("fatal_child_logger") {
        return;
    }
    let logger = Logger::with_writer(ConsoleAppender::stdout()).with_scope("boot");
    logger.with_field("port", 80).fatal("cannot bind");
}

#[test]
fn fatal_child_macro() {
    if !is_child("fatal_child_macro") {
        return;
    }
    let logger = Logger::with_writer(ConsoleAppender::stdout());
    rust_logf::fatal!(logger, "disk {} is gone", "/dev/sdb");
}

#[test]
fn fatal_child_filtered_level() {
    if !is_child("fatal_child_filtered_level") {
        return;
    }
    // Fatal is the highest level, so no threshold can hide it.
    let logger = Logger::with_writer(ConsoleAppender::stdout()).with_level(LogLevel::Fatal);
    logger.error("hidden");
    logger.fatal("still exits");
}

#[test]
fn fatal_child_runtime_level() {
    if !is_child("fatal_child_runtime_level") {
        return;
    }
    let logger = Logger::with_writer(ConsoleAppender::stdout());
    logger.log(LogLevel::Fatal, "via log");
    println!("after fatal");
}

#[test]
fn fatal_child_runtime_level_fields() {
    if !is_child("fatal_child_runtime_level_fields") {
        return;
    }
    let logger = Logger::with_writer(ConsoleAppender::stdout());
    logger.with_field("attempt", 3).log(LogLevel::Fatal, "via field logger");
    println!("after fatal");
}

#[test]
fn fatal_child_runtime_level_macro() {
    if !is_child("fatal_child_runtime_level_macro") {
        return;
    }
    let logger = Logger::with_writer(ConsoleAppender::stdout());
    rust_logf::log!(logger, LogLevel::Fatal, "via {}", "macro");
    println!("after fatal");
}

#[test]
fn test_fatal_exits_after_writing_line() {
    let output = run_child("fatal_child_logger");
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = log_line(&stdout).expect("fatal line on stdout");
    assert!(
        line.ends_with(" level=fatal message=\"cannot bind\" sc=boot port=80"),
        "{}",
        line
    );
}

#[test]
fn test_fatal_macro_exits() {
    let output = run_child("fatal_child_macro");
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(" level=fatal message=\"disk /dev/sdb is gone\" sc=general"));
}

#[test]
fn test_fatal_with_highest_threshold() {
    let output = run_child("fatal_child_filtered_level");
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("hidden"));
    assert!(stdout.contains("message=\"still exits\""));
}

#[test]
fn test_log_at_fatal_level_exits() {
    let output = run_child("fatal_child_runtime_level");
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = log_line(&stdout).expect("fatal line on stdout");
    assert!(line.ends_with(" level=fatal message=\"via log\" sc=general"), "{}", line);
    assert!(!stdout.contains("after fatal"));
}

#[test]
fn test_field_logger_log_at_fatal_level_exits() {
    let output = run_child("fatal_child_runtime_level_fields");
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(" level=fatal message=\"via field logger\" sc=general attempt=3"));
    assert!(!stdout.contains("after fatal"));
}

#[test]
fn test_log_macro_at_fatal_level_exits() {
    let output = run_child("fatal_child_runtime_level_macro");
    assert_eq!(output.status.code(), Some(FATAL_EXIT_CODE));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(" level=fatal message=\"via macro\" sc=general"));
    assert!(!stdout.contains("after fatal"));
}
