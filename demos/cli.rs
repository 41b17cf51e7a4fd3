//! Command-line arguments as one line.
//!
//! The arguments are joined with spaces and decoded, so options read like log
//! fields. The result is printed as JSON.
//!
//! Run with: cargo run --example cli -- foo=333 bar=baz 'xxx=[3 4 #t]'

use serde_lines::decode;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    println!("{:?}", args);

    let line = decode(&args.join(" "))?;
    println!("{}", serde_json::to_string_pretty(&line)?);

    Ok(())
}
