//! Teaching the encoder about your own types.
//!
//! Run with: cargo run --example custom_renderer

use serde_lines::{encode_with_options, EncodeOptions, ExtensionRegistry, LineMap, Value};
use std::error::Error;
use std::net::SocketAddr;

#[derive(Debug)]
struct Money {
    cents: i64,
    currency: &'static str,
}

#[derive(Debug)]
struct Secret(String);

fn main() -> Result<(), Box<dyn Error>> {
    let registry = ExtensionRegistry::new()
        .with_renderer(|m: &Money| {
            Ok(Value::unit(m.cents as f64 / 100.0, m.currency))
        })
        .with_renderer(|addr: &SocketAddr| Ok(Value::from(addr.to_string())))
        .with_renderer(|_: &Secret| Err("secrets are never logged".into()));
    let options = EncodeOptions::new().with_registry(registry);

    let mut line = LineMap::new();
    line.insert("msg", "charged");
    line.insert("amount", Value::opaque(Money { cents: 1999, currency: "EUR" }));
    line.insert("peer", Value::opaque("10.0.0.7:443".parse::<SocketAddr>()?));
    line.insert("token", Value::opaque(Secret("hunter2".to_string())));
    line.insert("other", Value::opaque(std::time::Instant::now()));

    // `peer` is rendered as text and quoted because it holds a `:`.
    // `token` falls back to a type tag; `other` has no renderer and uses its Debug text.
    println!("{}", encode_with_options(&line, &options));

    Ok(())
}
