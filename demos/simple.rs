//! Encoding structs and maps as lines, and reading them back.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_lines::{decode, encode, from_str, lines, to_string, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Deploy {
    app: String,
    commit: String,
    hosts: Vec<String>,
    canary: bool,
    owner: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let deploy = Deploy {
        app: "billing".to_string(),
        commit: "716f337".to_string(),
        hosts: vec!["web-1".to_string(), "web-2".to_string()],
        canary: true,
        owner: None,
    };

    let line = to_string(&deploy)?;
    println!("Struct as a line:\n{}\n", line);

    let back: Deploy = from_str(&line)?;
    println!("Read back: {:?}\n", back);
    assert_eq!(deploy, back);

    // Built by hand, with typed literals
    let line = lines!({
        "msg": "query done",
        "rows": 12,
        "elapsed": (Value::unit(31.9, "ms")),
        "user": { "id": 3, "name": "Jo Ann" },
    });
    let text = encode(&line);
    println!("Map as a line:\n{}\n", text);

    let decoded = decode(&text)?;
    for (key, value) in &decoded {
        println!("  {:<8} {:?}", key, value);
    }

    Ok(())
}
