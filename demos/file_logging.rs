//! File logging example
//!
//! Builds a logger from a JSON configuration that appends to a file, then
//! logs from several threads.
//!
//! Run with: cargo run --example file_logging

use rust_logf::prelude::*;
use std::fs;
use std::thread;

fn main() -> Result<()> {
    println!("=== rust_logf - File Logging Example ===\n");

    let dir = std::env::temp_dir().join("rust_logf_demo");
    fs::create_dir_all(&dir)?;
    let path = dir.join("app.log");
    let _ = fs::remove_file(&path);

    let config = LoggerConfig {
        level: LogLevel::Debug,
        timestamp_format: TimestampFormat::Iso8601,
        scope: "demo".to_string(),
        caller: true,
        output: OutputTarget::File { path: path.clone() },
        ..LoggerConfig::default()
    };
    println!("Configuration:\n{}\n", config.to_json()?);

    let logger = Logger::from_config(&config)?;
    logger.info("application starting");

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let logger = logger.with_field("worker", worker);
            thread::spawn(move || {
                for job in 0..3 {
                    logger.clone().with_field("job", job).debug("job finished");
                }
            })
        })
        .collect();
    for handle in handles {
        if handle.join().is_err() {
            logger.error("worker thread panicked");
        }
    }

    logger.info("application stopping");
    logger.flush()?;

    let contents = fs::read_to_string(&path)?;
    println!("Wrote {} lines to {}:\n", contents.lines().count(), path.display());
    print!("{}", contents);

    let metrics = logger.metrics();
    println!(
        "\nlines={} bytes={} failures={}",
        metrics.lines_written(),
        metrics.bytes_written(),
        metrics.write_failures()
    );

    Ok(())
}
