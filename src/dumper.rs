//! The emitter: walks a [`Value`] tree and assembles YAML text.
//!
//! Every node goes through [`Dumper::write_node`], which asks the schema for the
//! node's type, lets the type represent the value, then writes the represented
//! data as a block or flow collection or as a scalar. A node matched by an explicit
//! type gets a `!<tag> ` prefix. Custom and built-in types share this path.
//!
//! Output is only returned once the whole tree has been written, so a failure
//! anywhere leaves nothing behind.

use crate::scalar::{render_string, ScalarContext};
use crate::schema::Resolution;
use crate::types::expand_tag;
use crate::{DumpOptions, Error, Mapping, Result, Value};
use log::{debug, trace};
use std::borrow::Cow;
use std::collections::HashMap;

/// Longest key written in implicit `key: value` form.
const MAX_SIMPLE_KEY_LENGTH: usize = 1024;

/// How a node is being written by its parent.
#[derive(Clone, Copy, Debug)]
struct Placement {
    /// Block collections are allowed here.
    block: bool,
    /// The node's first line may share the parent's line.
    compact: bool,
    /// The node is a mapping key.
    key: bool,
    /// The node is a block sequence item.
    sequence_item: bool,
}

impl Placement {
    const ROOT: Placement = Placement {
        block: true,
        compact: true,
        key: false,
        sequence_item: false,
    };
    const FLOW: Placement = Placement {
        block: false,
        compact: false,
        key: false,
        sequence_item: false,
    };
    const BLOCK_KEY: Placement = Placement {
        block: true,
        compact: true,
        key: true,
        sequence_item: false,
    };
    const SEQUENCE_ITEM: Placement = Placement {
        block: true,
        compact: true,
        key: false,
        sequence_item: true,
    };

    fn block_value(compact: bool) -> Placement {
        Placement {
            block: true,
            compact,
            key: false,
            sequence_item: false,
        }
    }
}

/// A written node.
struct Node {
    text: String,
    tagged: bool,
}

impl Node {
    fn starts_on_next_line(&self) -> bool {
        self.text.starts_with('\n')
    }
}

pub(crate) struct Dumper<'a> {
    options: &'a DumpOptions,
    styles: HashMap<String, String>,
    depth: usize,
}

impl<'a> Dumper<'a> {
    /// Validates `options` and resolves style aliases against the schema.
    pub(crate) fn new(options: &'a DumpOptions) -> Result<Self> {
        if options.indent == 0 {
            return Err(Error::configuration("indent must be at least 1"));
        }
        let mut styles = HashMap::with_capacity(options.styles.len());
        for (tag, style) in &options.styles {
            let tag = expand_tag(tag);
            let canonical = match options.schema.type_for_tag(&tag) {
                Some(ty) => ty.canonical_style(style)?.unwrap_or_else(|| style.clone()),
                None => style.clone(),
            };
            trace!("style for !<{}>: {}", tag, canonical);
            styles.insert(tag, canonical);
        }
        Ok(Dumper {
            options,
            styles,
            depth: 0,
        })
    }

    /// Writes a whole document: the root node and a trailing newline.
    pub(crate) fn dump(&mut self, value: &Value) -> Result<String> {
        match self.write_node(0, value, Placement::ROOT)? {
            Some(mut node) => {
                node.text.push('\n');
                Ok(node.text)
            }
            None => Ok(String::new()),
        }
    }

    fn next_line(&self, level: usize) -> String {
        let mut line = String::with_capacity(1 + self.options.indent * level);
        line.push('\n');
        line.extend(std::iter::repeat(' ').take(self.options.indent * level));
        line
    }

    /// Returns `Ok(None)` when the node was skipped under `skip_invalid`.
    fn write_node(&mut self, level: usize, value: &Value, at: Placement) -> Result<Option<Node>> {
        let options = self.options;
        let resolution = options.schema.resolve_for_value(value);
        let (data, tag, implicit) = match resolution {
            Some(resolution) => {
                let ty = resolution.ty();
                let style = self.styles.get(ty.tag()).map(String::as_str);
                (
                    Cow::Owned(ty.represent(value, style)?),
                    resolution.annotation(),
                    matches!(resolution, Resolution::Implicit(_)),
                )
            }
            None => (Cow::Borrowed(value), None, false),
        };

        let block = at.block && options.flow_level.map_or(true, |flow| flow > level);
        let compact = at.compact && tag.is_none() && !(options.indent != 2 && level > 0);

        let text = match data.as_ref() {
            Value::Mapping(map) => self.nested(|this| {
                if block && !map.is_empty() {
                    this.write_block_mapping(level, map, compact)
                } else {
                    this.write_flow_mapping(level, map)
                }
            })?,
            Value::Sequence(seq) => self.nested(|this| {
                if block && !seq.is_empty() {
                    let level = if options.no_array_indent && !at.sequence_item && level > 0 {
                        level - 1
                    } else {
                        level
                    };
                    this.write_block_sequence(level, seq, compact)
                } else {
                    this.write_flow_sequence(level, seq)
                }
            })?,
            Value::String(text) if implicit => text.clone(),
            Value::String(text) => self.write_scalar(text, level, at.key),
            other => {
                if options.skip_invalid {
                    debug!("skipping {} value with no matching type", other.kind_name());
                    return Ok(None);
                }
                debug!("no type in the schema accepts a {} value", other.kind_name());
                return Err(Error::unresolvable(other.kind_name()));
            }
        };

        Ok(Some(match tag {
            Some(tag) => Node {
                text: format!("!<{}> {}", tag, text),
                tagged: true,
            },
            None => Node {
                text,
                tagged: false,
            },
        }))
    }

    fn nested<F>(&mut self, write: F) -> Result<String>
    where
        F: FnOnce(&mut Self) -> Result<String>,
    {
        if let Some(limit) = self.options.recursion_limit {
            if self.depth >= limit {
                return Err(Error::RecursionLimitExceeded { limit });
            }
        }
        self.depth += 1;
        let result = write(self);
        self.depth -= 1;
        result
    }

    fn entries<'m>(&self, map: &'m Mapping) -> Vec<(&'m String, &'m Value)> {
        let mut entries: Vec<_> = map.iter().collect();
        if self.options.sort_keys {
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        }
        entries
    }

    fn write_block_mapping(&mut self, level: usize, map: &Mapping, compact: bool) -> Result<String> {
        let mut out = String::new();
        for (key, value) in self.entries(map) {
            let mut pair = String::new();
            if !compact || !out.is_empty() {
                pair.push_str(&self.next_line(level));
            }

            let key = match self.write_node(level + 1, &Value::String(key.clone()), Placement::BLOCK_KEY)? {
                Some(key) => key,
                None => continue,
            };
            let explicit_pair = key.tagged || key.text.chars().count() > MAX_SIMPLE_KEY_LENGTH;
            if explicit_pair {
                pair.push_str(if key.starts_on_next_line() { "?" } else { "? " });
            }
            pair.push_str(&key.text);
            if explicit_pair {
                pair.push_str(&self.next_line(level));
            }

            let value = match self.write_node(level + 1, value, Placement::block_value(explicit_pair))? {
                Some(value) => value,
                None => continue,
            };
            pair.push_str(if value.starts_on_next_line() { ":" } else { ": " });
            pair.push_str(&value.text);
            out.push_str(&pair);
        }
        Ok(if out.is_empty() { "{}".to_string() } else { out })
    }

    fn write_flow_mapping(&mut self, level: usize, map: &Mapping) -> Result<String> {
        let condense = self.options.condense_flow;
        let mut out = String::new();
        for (key, value) in self.entries(map) {
            let mut pair = String::new();
            if !out.is_empty() {
                pair.push_str(if condense { "," } else { ", " });
            }
            if condense {
                pair.push('"');
            }

            let key = match self.write_node(level, &Value::String(key.clone()), Placement::FLOW)? {
                Some(key) => key,
                None => continue,
            };
            if key.text.chars().count() > MAX_SIMPLE_KEY_LENGTH {
                pair.push_str("? ");
            }
            pair.push_str(&key.text);
            pair.push_str(if condense { "\":" } else { ": " });

            let value = match self.write_node(level, value, Placement::FLOW)? {
                Some(value) => value,
                None => continue,
            };
            pair.push_str(&value.text);
            out.push_str(&pair);
        }
        Ok(format!("{{{}}}", out))
    }

    fn write_block_sequence(&mut self, level: usize, seq: &[Value], compact: bool) -> Result<String> {
        let mut out = String::new();
        for item in seq {
            let item = match self.write_node(level + 1, item, Placement::SEQUENCE_ITEM)? {
                Some(item) => item,
                None => continue,
            };
            if !compact || !out.is_empty() {
                out.push_str(&self.next_line(level));
            }
            out.push_str(if item.starts_on_next_line() { "-" } else { "- " });
            out.push_str(&item.text);
        }
        Ok(if out.is_empty() { "[]".to_string() } else { out })
    }

    fn write_flow_sequence(&mut self, level: usize, seq: &[Value]) -> Result<String> {
        let separator = if self.options.condense_flow { "," } else { ", " };
        let mut out = String::new();
        for item in seq {
            if let Some(item) = self.write_node(level, item, Placement::FLOW)? {
                if !out.is_empty() {
                    out.push_str(separator);
                }
                out.push_str(&item.text);
            }
        }
        Ok(format!("[{}]", out))
    }

    fn write_scalar(&self, text: &str, level: usize, key: bool) -> String {
        let ctx = ScalarContext {
            indent_per_level: self.options.indent,
            level,
            line_width: self.options.line_width,
            single_line_only: key
                || self.options.flow_level.map_or(false, |flow| level >= flow),
            no_compat_mode: self.options.no_compat_mode,
        };
        render_string(text, &ctx, |s| self.options.schema.resolves_implicitly(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{extended_schema, yaml, RegExp};

    fn dump(value: &Value, options: &DumpOptions) -> Result<String> {
        Dumper::new(options)?.dump(value)
    }

    #[test]
    fn test_scalar_roots() {
        let options = DumpOptions::new();
        assert_eq!(dump(&Value::from("Hello world"), &options).unwrap(), "Hello world\n");
        assert_eq!(dump(&Value::from(1.01), &options).unwrap(), "1.01\n");
        assert_eq!(dump(&Value::from(true), &options).unwrap(), "true\n");
        assert_eq!(dump(&Value::Null, &options).unwrap(), "null\n");
        assert_eq!(dump(&Value::from("true"), &options).unwrap(), "'true'\n");
        assert_eq!(dump(&Value::from(""), &options).unwrap(), "''\n");
    }

    #[test]
    fn test_empty_collections() {
        let options = DumpOptions::new();
        assert_eq!(dump(&yaml!([]), &options).unwrap(), "[]\n");
        assert_eq!(dump(&yaml!({}), &options).unwrap(), "{}\n");
        assert_eq!(
            dump(&yaml!({ "a": [], "b": {} }), &options).unwrap(),
            "a: []\nb: {}\n"
        );
    }

    #[test]
    fn test_sequence_of_sequences() {
        let options = DumpOptions::new();
        assert_eq!(
            dump(&yaml!([[1, 2], [3]]), &options).unwrap(),
            "- - 1\n  - 2\n- - 3\n"
        );
    }

    #[test]
    fn test_no_array_indent() {
        let value = yaml!({ "list": ["a", "b"] });
        let options = DumpOptions::new().with_no_array_indent(true);
        assert_eq!(dump(&value, &options).unwrap(), "list:\n- a\n- b\n");
    }

    #[test]
    fn test_skip_invalid_drops_entries() {
        let value = yaml!({ "keep": 1, "drop": (Value::Undefined), "list": [1, (Value::Undefined), 2] });
        let options = DumpOptions::new().with_skip_invalid(true);
        assert_eq!(dump(&value, &options).unwrap(), "keep: 1\nlist:\n  - 1\n  - 2\n");
        assert_eq!(dump(&Value::Undefined, &options).unwrap(), "");
    }

    #[test]
    fn test_condensed_flow() {
        let value = yaml!({ "a": [1, 2], "b": "x" });
        let options = DumpOptions::new().with_flow_level(0).with_condense_flow(true);
        assert_eq!(dump(&value, &options).unwrap(), "{\"a\":[1,2],\"b\":x}\n");
    }

    #[test]
    fn test_long_keys_use_explicit_form() {
        let key = "k".repeat(MAX_SIMPLE_KEY_LENGTH + 1);
        let mut map = Mapping::new();
        map.insert(key.clone(), Value::from(1));
        let out = dump(&Value::Mapping(map), &DumpOptions::new()).unwrap();
        assert_eq!(out, format!("? {}\n: 1\n", key));
    }

    #[test]
    fn test_tagged_scalar_goes_through_quoting() {
        let options = DumpOptions::new().with_schema(extended_schema().clone());
        let value = Value::RegExp(RegExp::new("a: b", ""));
        assert_eq!(
            dump(&value, &options).unwrap(),
            "!<tag:yaml.org,2002:js/regexp> '/a: b/'\n"
        );
    }

    #[test]
    fn test_recursion_limit() {
        let mut value = Value::from(1);
        for _ in 0..10 {
            value = Value::Sequence(vec![value]);
        }
        assert!(dump(&value, &DumpOptions::new().with_recursion_limit(10)).is_ok());
        assert!(matches!(
            dump(&value, &DumpOptions::new().with_recursion_limit(9)),
            Err(Error::RecursionLimitExceeded { limit: 9 })
        ));
    }

    #[test]
    fn test_zero_indent_is_rejected() {
        assert!(matches!(
            Dumper::new(&DumpOptions::new().with_indent(0)),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_shorthand_tags_in_style_map() {
        let mut options = DumpOptions::new();
        options.styles.insert("!!float".to_string(), "uppercase".to_string());
        options.styles.insert("!!null".to_string(), "~".to_string());
        assert!(dump(&Value::Null, &options).is_err());

        options.styles.insert("!!null".to_string(), "canonical".to_string());
        assert_eq!(
            dump(&yaml!([(f64::NAN), null]), &options).unwrap(),
            "- .NAN\n- ~\n"
        );
    }

    #[test]
    fn test_unknown_style_is_rejected_up_front() {
        let options = DumpOptions::new().with_style("!!float", "shouting");
        let err = dump(&Value::from(true), &options).unwrap_err();
        assert!(err.to_string().contains("accepts not \"shouting\" style"));
    }
}
