//! Basic logger usage example
//!
//! Demonstrates levels, fields, scopes and caller capture on stderr.
//!
//! Run with: cargo run --example basic_usage

use rust_logf::prelude::*;
use rust_logf::{debug, fields, info, warn};

fn main() -> Result<()> {
    println!("=== rust_logf - Basic Usage Example ===\n");

    let logger = Logger::builder()
        .min_level(LogLevel::Debug)
        .writer(ConsoleAppender::stdout())
        .build()?;

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. Raising the minimum level to warn:");
    logger.set_min_level(LogLevel::Warn);
    logger.debug("Debug message (hidden)");
    logger.info("Info message (hidden)");
    logger.warn("Warning message (visible)");
    logger.set_min_level(LogLevel::Debug);

    println!("\n3. Structured fields:");
    let request = logger.with_fields(fields! {
        "method" => "POST",
        "path" => "/api/login",
        "status" => 401,
        "elapsed_ms" => 12.5,
    });
    request.warn("login rejected");
    request
        .clone()
        .with_field("user agent", "curl/8.0 \"beta\"")
        .info("values with spaces and quotes are escaped");

    println!("\n4. Format macros:");
    let port = 8080;
    info!(logger, "listening on port {}", port);
    debug!(request, "{} handlers registered", 12);

    println!("\n5. Scope, caller and colors:");
    let db = logger
        .with_scope("db")
        .with_caller(true)
        .with_color(true)
        .with_timestamp_format(TimestampFormat::UnixMillis)?;
    db.info("connection pool ready");
    warn!(db, "slow query took {}ms", 950);

    println!("\n6. Errors as fields:");
    if let Err(err) = "12x".parse::<u32>() {
        logger.with_error(&err).error("could not parse retry count");
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
