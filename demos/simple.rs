//! Stringifying structs and dynamic values.
//!
//! Run with: cargo run --example simple

use serde::Serialize;
use std::error::Error;
use yaml_stringify::{stringify, to_string, to_value, yaml, Value};

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    email: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            roles: vec!["admin".to_string()],
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            roles: vec![],
        },
    ];

    println!("Structs:\n{}", to_string(&users)?);

    // Strings that would read back as another type get quoted
    let config = yaml!({
        "host": "localhost",
        "port": 8080,
        "version": "1.10",
        "enabled": "yes",
        "motd": "Welcome!\nHave fun.\n"
    });
    println!("Dynamic value:\n{}", stringify(&config)?);

    let first = to_value(&users[0])?;
    if let Some(Value::String(name)) = first.as_mapping().and_then(|m| m.get("name")) {
        println!("First user: {}", name);
    }

    Ok(())
}
