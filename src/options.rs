//! Configuration options for YAML stringification.
//!
//! [`DumpOptions`] is a per-call builder. Nothing here is global: two calls with
//! different options never affect each other.
//!
//! ## Examples
//!
//! ```rust
//! use yaml_stringify::{stringify_with_options, yaml, DumpOptions};
//!
//! let value = yaml!({ "b": [1, 2], "a": true });
//!
//! let options = DumpOptions::new().with_indent(4).with_sort_keys(true);
//! let yaml = stringify_with_options(&value, &options).unwrap();
//! assert_eq!(yaml, "a: true\nb:\n    - 1\n    - 2\n");
//!
//! let options = DumpOptions::new().with_flow_level(0);
//! let yaml = stringify_with_options(&value, &options).unwrap();
//! assert_eq!(yaml, "{b: [1, 2], a: true}\n");
//! ```

use crate::types::expand_tag;
use crate::{default_schema, Schema};
use indexmap::IndexMap;

/// Options controlling how a value tree is written.
///
/// # Examples
///
/// ```rust
/// use yaml_stringify::DumpOptions;
///
/// let options = DumpOptions::new()
///     .with_indent(4)
///     .with_style("!!int", "hex")
///     .with_line_width(None);
///
/// assert_eq!(options.indent, 4);
/// assert_eq!(options.styles["tag:yaml.org,2002:int"], "hex");
/// assert_eq!(options.line_width, None);
/// ```
#[derive(Clone, Debug)]
pub struct DumpOptions {
    /// Types available for resolving values. Defaults to [`default_schema`].
    pub schema: Schema,
    /// Spaces per nesting level. Must be at least 1.
    pub indent: usize,
    /// Keep sequences under a mapping key at the key's indentation.
    pub no_array_indent: bool,
    /// Drop pairs and items that no type can represent instead of failing.
    pub skip_invalid: bool,
    /// Nesting level from which collections switch to flow style. `None` never switches.
    pub flow_level: Option<usize>,
    /// Tag to style name. Tags are stored expanded; aliases are resolved per call.
    pub styles: IndexMap<String, String>,
    /// Write mapping keys in ascending order instead of insertion order.
    pub sort_keys: bool,
    /// Preferred line width for folded scalars. `None` disables folding.
    pub line_width: Option<usize>,
    /// Don't quote YAML 1.1 boolean spellings such as `yes` or `off`.
    pub no_compat_mode: bool,
    /// Drop spaces in flow collections and quote flow mapping keys.
    pub condense_flow: bool,
    /// Maximum nesting depth, `None` for unbounded.
    pub recursion_limit: Option<usize>,
}

impl Default for DumpOptions {
    fn default() -> Self {
        DumpOptions {
            schema: default_schema().clone(),
            indent: 2,
            no_array_indent: false,
            skip_invalid: false,
            flow_level: None,
            styles: IndexMap::new(),
            sort_keys: false,
            line_width: Some(80),
            no_compat_mode: false,
            condense_flow: false,
            recursion_limit: Some(128),
        }
    }
}

impl DumpOptions {
    /// Creates default options: default schema, 2-space indent, block style, width 80.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_stringify::DumpOptions;
    ///
    /// let options = DumpOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert_eq!(options.flow_level, None);
    /// assert_eq!(options.recursion_limit, Some(128));
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Sets the number of spaces per nesting level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_no_array_indent(mut self, no_array_indent: bool) -> Self {
        self.no_array_indent = no_array_indent;
        self
    }

    #[must_use]
    pub fn with_skip_invalid(mut self, skip_invalid: bool) -> Self {
        self.skip_invalid = skip_invalid;
        self
    }

    /// Switches collections at `level` and deeper to flow style (`[a, b]`, `{k: v}`).
    #[must_use]
    pub fn with_flow_level(mut self, level: usize) -> Self {
        self.flow_level = Some(level);
        self
    }

    /// Requests a named style for a tag. `!!name` expands to `tag:yaml.org,2002:name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_stringify::{stringify_with_options, DumpOptions, Value};
    ///
    /// let options = DumpOptions::new().with_style("!!float", "uppercase");
    /// let yaml = stringify_with_options(&Value::from(f64::NAN), &options).unwrap();
    /// assert_eq!(yaml, ".NAN\n");
    /// ```
    #[must_use]
    pub fn with_style(mut self, tag: &str, style: impl Into<String>) -> Self {
        self.styles.insert(expand_tag(tag), style.into());
        self
    }

    #[must_use]
    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: Option<usize>) -> Self {
        self.line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_no_compat_mode(mut self, no_compat_mode: bool) -> Self {
        self.no_compat_mode = no_compat_mode;
        self
    }

    #[must_use]
    pub fn with_condense_flow(mut self, condense_flow: bool) -> Self {
        self.condense_flow = condense_flow;
        self
    }

    #[must_use]
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Removes the nesting depth limit.
    #[must_use]
    pub fn without_recursion_limit(mut self) -> Self {
        self.recursion_limit = None;
        self
    }
}
