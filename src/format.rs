//! Output format reference
//!
//! This module documents the YAML text the stringifier produces. It contains no code.
//!
//! # Documents
//!
//! Output is a single document without `---` or `...` markers, terminated by one
//! newline. Root scalars and collections are written the same way as nested ones.
//!
//! ```rust
//! use yaml_stringify::{stringify, yaml};
//!
//! assert_eq!(stringify(&yaml!([1, 2, 3])).unwrap(), "- 1\n- 2\n- 3\n");
//! assert_eq!(stringify(&yaml!(true)).unwrap(), "true\n");
//! ```
//!
//! # Block collections
//!
//! Mappings write one `key: value` pair per line; sequences one `- item` per line.
//! Nested collections start on the next line, one indentation level deeper. A mapping
//! inside a sequence item shares the dash's line:
//!
//! ```text
//! foo:
//!   bar: true
//!   test:
//!     - a
//!     - a: false
//! ```
//!
//! Keys keep insertion order unless
//! [`DumpOptions::sort_keys`](crate::DumpOptions::sort_keys) is set. Keys longer than
//! 1024 characters, and keys matched by an explicit type, use the `? key` form.
//!
//! Empty collections are always flow: `[]` and `{}`.
//!
//! # Flow collections
//!
//! From [`DumpOptions::flow_level`](crate::DumpOptions::flow_level) on, collections
//! are written inline:
//!
//! ```text
//! {name: app, ports: [80, 443]}
//! ```
//!
//! With `condense_flow` the spaces go and keys are wrapped in double quotes:
//! `{"name":app,"ports":[80,443]}`.
//!
//! # Tags
//!
//! Values represented by an implicit type (null, bool, int, float, timestamp) carry
//! no tag. Values represented by an explicit type are prefixed with the full tag in
//! verbatim form, followed by a space:
//!
//! ```text
//! binary: !<tag:yaml.org,2002:binary> SGVsbG8=
//! point: !<!point>
//!   - 1
//!   - 2
//! ```
//!
//! The space after the tag stays even when a block collection follows on the next line.
//!
//! # Scalars
//!
//! | Value | Text |
//! |-------|------|
//! | null | `null` (styles: `~`, `NULL`, `Null`) |
//! | booleans | `true` / `false` (styles: `TRUE`, `True`) |
//! | integers and whole floats up to 2^53 | `42` (styles: `0b101010`, `052`, `0x2A`) |
//! | other floats | shortest round-trip digits: `4.1`, `0.0000682`, `6.82e-12`, `5.e-12` |
//! | negative zero | `-0.0` |
//! | infinities and NaN | `.inf`, `-.inf`, `.nan` (styles: `.INF`, `.Inf`, `.NAN`, `.NaN`) |
//! | timestamps | `2001-12-15T02:59:43.100Z` |
//!
//! Strings use the first style that preserves them:
//!
//! 1. **plain**, when the text is safe and would not read back as another type
//! 2. **single-quoted**, for single-line text that plain cannot carry (`'true'`, `'a: b'`, `''`)
//! 3. **literal** (`|`), for multi-line text whose lines fit the line width
//! 4. **folded** (`>`), for multi-line text with long lines
//! 5. **double-quoted**, when the text has characters that need escaping
//!
//! ```rust
//! use yaml_stringify::{stringify, Value};
//!
//! assert_eq!(stringify(&Value::from("1.5")).unwrap(), "'1.5'\n");
//! assert_eq!(stringify(&Value::from("yes")).unwrap(), "'yes'\n");
//! assert_eq!(stringify(&Value::from("a\nb\n")).unwrap(), "|\n  a\n  b\n");
//! assert_eq!(stringify(&Value::from("tab\there")).unwrap(), "\"tab\\there\"\n");
//! ```
