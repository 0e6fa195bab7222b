//! Adding a custom tag to a schema.
//!
//! Run with: cargo run --example custom_types

use std::error::Error;
use yaml_stringify::{
    default_schema, extended_schema, stringify_with_options, yaml, DumpOptions, Kind, RegExp,
    SchemaExtension, Type, Value,
};

/// Writes `{ "major": _, "minor": _ }` mappings as `!semver 1.4` scalars.
fn semver() -> Result<Type, yaml_stringify::Error> {
    Type::builder("!semver", Kind::Scalar)
        .resolve(|data| {
            data.as_str().map_or(false, |s| {
                let mut parts = s.split('.');
                matches!(
                    (parts.next(), parts.next(), parts.next()),
                    (Some(a), Some(b), None) if a.parse::<u64>().is_ok() && b.parse::<u64>().is_ok()
                )
            })
        })
        .predicate(|value| {
            value.as_mapping().map_or(false, |m| {
                m.len() == 2 && m.contains_key("major") && m.contains_key("minor")
            })
        })
        .represent(|value| {
            let part = |key: &str| {
                value
                    .as_mapping()
                    .and_then(|m| m.get(key))
                    .and_then(Value::as_i64)
                    .unwrap_or(0)
            };
            Ok(Value::String(format!("{}.{}", part("major"), part("minor"))))
        })
        .build()
}

fn main() -> Result<(), Box<dyn Error>> {
    let schema = default_schema().extend(SchemaExtension::new().explicit(semver()?))?;
    let doc = yaml!({
        "package": "demo",
        "version": { "major": 1, "minor": 4 }
    });
    let options = DumpOptions::new().with_schema(schema.clone());
    println!("Custom tag:\n{}", stringify_with_options(&doc, &options)?);

    let constructed = schema.construct_tagged("!semver", Value::from("2.0"))?;
    println!("Constructed from '2.0': {:?}\n", constructed);

    let js = yaml!({
        "pattern": (RegExp::new("^v\\d+", "i")),
        "callback": (Value::Undefined)
    });
    let options = DumpOptions::new().with_schema(extended_schema().clone());
    println!("Extended schema:\n{}", stringify_with_options(&js, &options)?);

    Ok(())
}
