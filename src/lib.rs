//! # yaml_stringify
//!
//! A schema-driven YAML stringifier.
//!
//! Values are written by consulting a [`Schema`]: an ordered list of [`Type`]s, each
//! of which can recognize in-memory values (`predicate`) and turn them into plain
//! data (`represent`). The emitter then lays that data out as block or flow YAML,
//! choosing scalar styles that read back as the same value.
//!
//! ## Key Features
//!
//! - **Pluggable types**: define your own tags with [`Type::builder`] and add them with
//!   [`Schema::extend`], which never mutates the base schema
//! - **Canonical scalars**: shortest round-trip floats (`5.e-12`, `-0.0`), `.inf`/`.nan`
//!   in three letter cases, binary/octal/hex integers on request
//! - **Ambiguity-aware strings**: `"true"`, `"1.5"` or `"~"` are quoted so they stay strings
//! - **Serde compatible**: [`to_string`] accepts any `T: Serialize`
//! - **All or nothing**: a value no type accepts fails the whole call
//!
//! ## Quick Start
//!
//! ```rust
//! use yaml_stringify::{stringify, yaml};
//!
//! let doc = yaml!({
//!     "name": "service",
//!     "replicas": 3,
//!     "ports": [80, 443],
//!     "debug": "false"
//! });
//!
//! assert_eq!(
//!     stringify(&doc).unwrap(),
//!     "name: service\nreplicas: 3\nports:\n  - 80\n  - 443\ndebug: 'false'\n"
//! );
//! ```
//!
//! ### Serde
//!
//! ```rust
//! use serde::Serialize;
//! use yaml_stringify::to_string;
//!
//! #[derive(Serialize)]
//! struct Limits {
//!     cpu: f64,
//!     memory: Option<u64>,
//! }
//!
//! let yaml = to_string(&Limits { cpu: 0.5, memory: None }).unwrap();
//! assert_eq!(yaml, "cpu: 0.5\nmemory: null\n");
//! ```
//!
//! ### Styles
//!
//! ```rust
//! use yaml_stringify::{stringify_with_options, yaml, DumpOptions};
//!
//! let options = DumpOptions::new()
//!     .with_style("!!int", "hex")
//!     .with_style("!!null", "canonical");
//! let yaml = stringify_with_options(&yaml!([255, null]), &options).unwrap();
//! assert_eq!(yaml, "- 0xFF\n- ~\n");
//! ```
//!
//! ## Schemas
//!
//! [`default_schema`] is used unless [`DumpOptions::schema`] says otherwise. It refuses
//! host-only values such as [`Value::Undefined`]; [`extended_schema`] accepts them.
//!
//! ```rust
//! use yaml_stringify::{extended_schema, stringify, stringify_with_options, DumpOptions, Value};
//!
//! assert!(stringify(&Value::Undefined).is_err());
//!
//! let options = DumpOptions::new().with_schema(extended_schema().clone());
//! assert_eq!(
//!     stringify_with_options(&Value::Undefined, &options).unwrap(),
//!     "!<tag:yaml.org,2002:js/undefined> ''\n"
//! );
//! ```
//!
//! ## Examples
//!
//! The `demos/` directory has runnable programs:
//!
//! - **`simple.rs`** - stringifying values and structs
//! - **`custom_types.rs`** - defining a tagged type and extending the default schema
//! - **`styles.rs`** - float, int and null styles, flow level and key sorting
//!
//! Run any of them with: `cargo run --example <name>`

mod dumper;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod options;
pub mod scalar;
pub mod schema;
pub mod ser;
pub mod types;
pub mod value;

pub use error::{Error, Result};
pub use map::Mapping;
pub use options::DumpOptions;
pub use schema::{
    core_schema, default_schema, extended_schema, failsafe_schema, json_schema, Resolution,
    Schema, SchemaExtension,
};
pub use ser::ValueSerializer;
pub use types::{expand_tag, Kind, Type, TypeBuilder};
pub use value::{Number, RegExp, Value};

use dumper::Dumper;
use serde::Serialize;
use std::io;

/// Stringify a value tree with default options.
///
/// # Examples
///
/// ```rust
/// use yaml_stringify::{stringify, Value};
///
/// assert_eq!(stringify(&Value::from(-0.0)).unwrap(), "-0.0\n");
/// assert_eq!(stringify(&Value::from("Hello world")).unwrap(), "Hello world\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::UnresolvableType`] if some value in the tree matches no type of the
/// default schema, or any error raised by a type's representer.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify(value: &Value) -> Result<String> {
    stringify_with_options(value, &DumpOptions::default())
}

/// Stringify a value tree with custom options.
///
/// # Errors
///
/// Besides the errors of [`stringify`], returns [`Error::Configuration`] for an indent
/// of zero or a style the tag's type does not declare, and
/// [`Error::RecursionLimitExceeded`] for trees nested deeper than the limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn stringify_with_options(value: &Value, options: &DumpOptions) -> Result<String> {
    Dumper::new(options)?.dump(value)
}

/// Serialize any `T: Serialize` to a YAML string.
///
/// # Examples
///
/// ```rust
/// use yaml_stringify::to_string;
///
/// assert_eq!(to_string(&vec![1, 2, 3]).unwrap(), "- 1\n- 2\n- 3\n");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted or stringified.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &DumpOptions::default())
}

/// Serialize any `T: Serialize` to a YAML string with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be converted or stringified.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &DumpOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    stringify_with_options(&to_value(value)?, options)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use yaml_stringify::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(value.as_mapping().unwrap().get("y"), Some(&Value::from(2)));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized, for example a map with
/// non-scalar keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    ser::to_value(value)
}

/// Serialize any `T: Serialize` as YAML into a writer.
///
/// # Examples
///
/// ```rust
/// use yaml_stringify::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &("a", 1)).unwrap();
/// assert_eq!(buffer, b"- a\n- 1\n");
/// ```
///
/// # Errors
///
/// Returns an error if stringification or writing fails. Nothing is written on a
/// stringification failure.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &DumpOptions::default())
}

/// Serialize any `T: Serialize` as YAML into a writer with custom options.
///
/// # Errors
///
/// Returns an error if stringification or writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &DumpOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let yaml = to_string_with_options(value, options)?;
    writer
        .write_all(yaml.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
