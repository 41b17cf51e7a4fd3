//! Structured logging with global fields, contexts and a rolling file.
//!
//! Run with: cargo run --example logging

use serde_lines::{lines, Logger, Period, RollingFile, Value, WriterSink};
use std::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

fn main() -> Result<(), Box<dyn Error>> {
    let logger = Logger::new(WriterSink::stderr());
    logger.set_global("app", "demo");

    let seq = AtomicU64::new(0);
    logger.set_global_with("seq", move || Ok(Value::from(seq.fetch_add(1, Ordering::SeqCst))));

    logger.log_msg("starting", lines!({ "pid": (std::process::id()) }))?;

    let request = logger.context(lines!({ "req": "a1b2c3" }));
    let started = Instant::now();
    request.log(lines!({ "at": "/login", "user": "bob" }))?;
    request.log_msg("done", lines!({ "elapsed": (started.elapsed()) }))?;

    if let Err(err) = "forty-two".parse::<u32>() {
        request.log_error(&err, lines!({ "input": "forty-two" }))?;
    }
    logger.warn("disk almost full")?;

    // Same facade, writing to a file shelved once a week
    let dir = std::env::temp_dir().join("serde_lines_demo");
    std::fs::create_dir_all(&dir)?;
    let file = RollingFile::open(dir.join("app.log"))?
        .with_period(Period::Week)
        .with_keep(4);
    let file_logger = Logger::new(file);
    file_logger.info("written to a file")?;
    println!("wrote {}", dir.join("app.log").display());

    Ok(())
}
