//! Encoding, decoding and merging JSON with key order preserved.
//!
//! Run with: cargo run --example round_trip

use ordered_json::{from_str, to_string, to_string_pretty, OrderedMap, Value};
use serde::{Deserialize, Serialize};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Service {
    name: String,
    port: u16,
    tags: Vec<String>,
    labels: OrderedMap<String, String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut labels = OrderedMap::new();
    labels.set("zone".to_string(), "eu-west".to_string());
    labels.set("tier".to_string(), "edge".to_string());

    let service = Service {
        name: "gateway".to_string(),
        port: 8443,
        tags: vec!["tls".to_string(), "public".to_string()],
        labels,
    };

    let compact = to_string(&service)?;
    println!("compact:\n{}\n", compact);
    println!("pretty:\n{}\n", to_string_pretty(&service)?);

    let back: Service = from_str(&compact)?;
    assert_eq!(service, back);
    println!("✓ Round-trip successful");

    // Decoding into an existing map merges in place
    let mut config: OrderedMap<String, Value> = OrderedMap::new();
    config.decode_json(br#"{"host": "localhost", "port": 80, "debug": false}"#)?;
    config.decode_json(br#"{"port": 8080, "workers": 4}"#)?;
    println!("merged: {}", Value::Object(config.clone()));

    // A failed decode reports where and in which state it stopped
    match config.decode_json(br#"{"port": 9090, "hosts": [1, 2"#) {
        Ok(()) => println!("unexpected success"),
        Err(e) => println!("error: {}", e),
    }
    assert_eq!(config.get("port"), Some(&Value::from(8080)));

    Ok(())
}
