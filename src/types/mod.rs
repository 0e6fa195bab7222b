//! Type descriptors: one semantic kind of YAML node each.
//!
//! A [`Type`] bundles a tag with up to four behaviors:
//!
//! - `resolve`: can raw data (plain scalar text, a sequence, a mapping) be constructed by this type?
//! - `construct`: build a [`Value`] from raw data
//! - `predicate`: should this type represent an in-memory value?
//! - `represent`: turn a value into raw data (a string, sequence or mapping), optionally
//!   through one of several named styles
//!
//! Types are immutable once built and are shared between schemas through [`Arc`].
//!
//! ## Defining a custom type
//!
//! ```rust
//! use yaml_stringify::{default_schema, stringify_with_options, yaml, DumpOptions, Kind, SchemaExtension, Type, Value};
//!
//! let point = Type::builder("!point", Kind::Sequence)
//!     .resolve(|data| data.as_sequence().map_or(false, |s| s.len() == 3))
//!     .predicate(|value| {
//!         value.as_mapping().map_or(false, |m| {
//!             m.contains_key("x") && m.contains_key("y") && m.contains_key("z")
//!         })
//!     })
//!     .represent(|value| {
//!         let m = value.as_mapping().cloned().unwrap_or_default();
//!         Ok(Value::Sequence(
//!             ["x", "y", "z"].iter().map(|k| m.get(k).cloned().unwrap_or_default()).collect(),
//!         ))
//!     })
//!     .build()
//!     .unwrap();
//!
//! let schema = default_schema()
//!     .extend(SchemaExtension::new().explicit(point))
//!     .unwrap();
//! let doc = stringify_with_options(
//!     &yaml!({ "point": { "x": 1, "y": 2, "z": 3 } }),
//!     &DumpOptions::new().with_schema(schema),
//! )
//! .unwrap();
//! assert_eq!(doc, "point: !<!point> \n  - 1\n  - 2\n  - 3\n");
//! ```

pub(crate) mod core;
pub(crate) mod default;
pub(crate) mod failsafe;
pub(crate) mod js;

use crate::{Error, Result, Value};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Prefix shared by every tag of the YAML tag repository.
pub const YAML_TAG_PREFIX: &str = "tag:yaml.org,2002:";

pub type ResolveFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
pub type ConstructFn = Arc<dyn Fn(Value) -> Result<Value> + Send + Sync>;
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
pub type RepresentFn = Arc<dyn Fn(&Value) -> Result<Value> + Send + Sync>;

/// The node shape a [`Type`] constructs from and represents to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Scalar,
    Sequence,
    Mapping,
}

impl Kind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::Scalar => "scalar",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
        }
    }

    /// Returns `true` if `value` has the raw shape this kind describes.
    ///
    /// Scalars are always raw strings; non-string leaves are already constructed values.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Kind::Scalar => value.is_string(),
            Kind::Sequence => value.is_sequence(),
            Kind::Mapping => value.is_mapping(),
        }
    }
}

impl FromStr for Kind {
    type Err = Error;

    /// Parses a kind name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_stringify::Kind;
    ///
    /// assert_eq!("mapping".parse::<Kind>().unwrap(), Kind::Mapping);
    /// assert!("sequense".parse::<Kind>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "scalar" => Ok(Kind::Scalar),
            "sequence" => Ok(Kind::Sequence),
            "mapping" => Ok(Kind::Mapping),
            other => Err(Error::configuration(format!(
                "unknown kind \"{}\": expected scalar, sequence or mapping",
                other
            ))),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a type turns values into raw data.
#[derive(Clone)]
pub enum Represent {
    /// One rendering, used whatever style is requested.
    Single(RepresentFn),
    /// Named renderings; the requested style picks one.
    Styles(IndexMap<String, RepresentFn>),
}

/// An immutable type descriptor.
///
/// Build one with [`Type::builder`].
#[derive(Clone)]
pub struct Type {
    tag: String,
    kind: Kind,
    resolve: Option<ResolveFn>,
    construct: Option<ConstructFn>,
    predicate: Option<PredicateFn>,
    represent: Option<Represent>,
    default_style: Option<String>,
    style_aliases: HashMap<String, String>,
}

impl Type {
    /// Starts the definition of a type with the given tag and kind.
    pub fn builder(tag: impl Into<String>, kind: Kind) -> TypeBuilder {
        TypeBuilder {
            tag: tag.into(),
            kind,
            resolve: None,
            construct: None,
            predicate: None,
            represent: None,
            default_style: None,
            style_aliases: HashMap::new(),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn default_style(&self) -> Option<&str> {
        self.default_style.as_deref()
    }

    /// Names of the styles this type can render, in declaration order.
    pub fn styles(&self) -> impl Iterator<Item = &str> {
        let names = match &self.represent {
            Some(Represent::Styles(map)) => Some(map.keys().map(String::as_str)),
            _ => None,
        };
        names.into_iter().flatten()
    }

    /// Returns `true` if this type takes part in value resolution at all.
    #[must_use]
    pub fn has_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    /// Can `data` be constructed by this type? Types without a resolver accept everything.
    #[must_use]
    pub fn resolve(&self, data: &Value) -> bool {
        self.resolve.as_ref().map_or(true, |f| f(data))
    }

    /// Builds a native value from raw data. Types without a constructor return the data as is.
    pub fn construct(&self, data: Value) -> Result<Value> {
        match &self.construct {
            Some(f) => f(data),
            None => Ok(data),
        }
    }

    /// Should this type represent `value`? Types without a predicate never match.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        self.predicate.as_ref().map_or(false, |f| f(value))
    }

    /// Maps a requested style (or alias) to the style name this type declares.
    ///
    /// Returns `None` when the type renders with a single function, so any style is accepted.
    pub fn canonical_style(&self, requested: &str) -> Result<Option<String>> {
        let styles = match &self.represent {
            Some(Represent::Styles(styles)) => styles,
            _ => return Ok(None),
        };
        let name = self
            .style_aliases
            .get(requested)
            .map(String::as_str)
            .unwrap_or(requested);
        if styles.contains_key(name) {
            Ok(Some(name.to_string()))
        } else {
            Err(Error::configuration(format!(
                "!<{}> tag resolver accepts not \"{}\" style",
                self.tag, requested
            )))
        }
    }

    /// Converts `value` into raw data using `style`, or the default style when `None`.
    ///
    /// Types without a representer hand the value back unchanged.
    pub fn represent(&self, value: &Value, style: Option<&str>) -> Result<Value> {
        let raw = match &self.represent {
            None => value.clone(),
            Some(Represent::Single(f)) => f(value)?,
            Some(Represent::Styles(styles)) => {
                let name = style.or(self.default_style.as_deref()).ok_or_else(|| {
                    Error::configuration(format!("!<{}> has no default style", self.tag))
                })?;
                let f = styles.get(name).ok_or_else(|| {
                    Error::configuration(format!(
                        "!<{}> tag resolver accepts not \"{}\" style",
                        self.tag, name
                    ))
                })?;
                f(value)?
            }
        };
        if !self.kind.accepts(&raw) {
            return Err(Error::representer(
                &self.tag,
                format!(
                    "a {} type must represent values as a {}, got {}",
                    self.kind,
                    match self.kind {
                        Kind::Scalar => "string",
                        Kind::Sequence => "sequence",
                        Kind::Mapping => "mapping",
                    },
                    raw.kind_name()
                ),
            ));
        }
        Ok(raw)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Type")
            .field("tag", &self.tag)
            .field("kind", &self.kind)
            .field("styles", &self.styles().collect::<Vec<_>>())
            .field("default_style", &self.default_style)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Type`].
pub struct TypeBuilder {
    tag: String,
    kind: Kind,
    resolve: Option<ResolveFn>,
    construct: Option<ConstructFn>,
    predicate: Option<PredicateFn>,
    represent: Option<Represent>,
    default_style: Option<String>,
    style_aliases: HashMap<String, String>,
}

impl TypeBuilder {
    #[must_use]
    pub fn resolve<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.resolve = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn construct<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.construct = Some(Arc::new(f));
        self
    }

    #[must_use]
    pub fn predicate<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Arc::new(f));
        self
    }

    /// Sets a single representer used regardless of the requested style.
    #[must_use]
    pub fn represent<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.represent = Some(Represent::Single(Arc::new(f)));
        self
    }

    /// Adds a named style. Switches the type to style-map representation.
    #[must_use]
    pub fn style<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Value) -> Result<Value> + Send + Sync + 'static,
    {
        let f: RepresentFn = Arc::new(f);
        match &mut self.represent {
            Some(Represent::Styles(styles)) => {
                styles.insert(name.into(), f);
            }
            _ => {
                let mut styles = IndexMap::new();
                styles.insert(name.into(), f);
                self.represent = Some(Represent::Styles(styles));
            }
        }
        self
    }

    #[must_use]
    pub fn default_style(mut self, name: impl Into<String>) -> Self {
        self.default_style = Some(name.into());
        self
    }

    /// Lets `alias` stand in for `style` in [`DumpOptions::styles`](crate::DumpOptions).
    #[must_use]
    pub fn style_alias(mut self, alias: impl Into<String>, style: impl Into<String>) -> Self {
        self.style_aliases.insert(alias.into(), style.into());
        self
    }

    /// Validates the definition and freezes it into a [`Type`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] for an empty tag, a default style or alias
    /// that names no declared style, or a style-map type without a default style.
    pub fn build(self) -> Result<Type> {
        let ty = self.finish();
        ty.validate()?;
        Ok(ty)
    }

    /// Freezes the definition without validation. Built-in types go through here.
    pub(crate) fn finish(self) -> Type {
        Type {
            tag: self.tag,
            kind: self.kind,
            resolve: self.resolve,
            construct: self.construct,
            predicate: self.predicate,
            represent: self.represent,
            default_style: self.default_style,
            style_aliases: self.style_aliases,
        }
    }
}

impl Type {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.tag.is_empty() {
            return Err(Error::configuration("type tag must not be empty"));
        }
        match &self.represent {
            Some(Represent::Styles(styles)) => {
                let default = self.default_style.as_deref().ok_or_else(|| {
                    Error::configuration(format!(
                        "!<{}> declares styles but no default style",
                        self.tag
                    ))
                })?;
                if !styles.contains_key(default) {
                    return Err(Error::configuration(format!(
                        "!<{}> default style \"{}\" is not declared",
                        self.tag, default
                    )));
                }
                for (alias, style) in &self.style_aliases {
                    if !styles.contains_key(style) {
                        return Err(Error::configuration(format!(
                            "!<{}> style alias \"{}\" points at undeclared style \"{}\"",
                            self.tag, alias, style
                        )));
                    }
                }
            }
            _ => {
                if let Some(default) = &self.default_style {
                    return Err(Error::configuration(format!(
                        "!<{}> default style \"{}\" requires a style map",
                        self.tag, default
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Expands the `!!name` shorthand to a full `tag:yaml.org,2002:name` tag.
///
/// # Examples
///
/// ```rust
/// use yaml_stringify::expand_tag;
///
/// assert_eq!(expand_tag("!!float"), "tag:yaml.org,2002:float");
/// assert_eq!(expand_tag("!point"), "!point");
/// ```
#[must_use]
pub fn expand_tag(tag: &str) -> String {
    match tag.strip_prefix("!!") {
        Some(name) => format!("{}{}", YAML_TAG_PREFIX, name),
        None => tag.to_string(),
    }
}

/// Wraps a string as the raw data of a scalar representation.
pub(crate) fn raw(text: impl Into<String>) -> Result<Value> {
    Ok(Value::String(text.into()))
}

/// Borrows the text of raw scalar data, the only shape scalar resolvers accept.
pub(crate) fn scalar_text(data: &Value) -> Option<&str> {
    data.as_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled() -> TypeBuilder {
        Type::builder("!case", Kind::Scalar)
            .predicate(|v| v.is_string())
            .style("lower", |v| raw(v.as_str().unwrap_or_default().to_lowercase()))
            .style("upper", |v| raw(v.as_str().unwrap_or_default().to_uppercase()))
            .default_style("lower")
            .style_alias("shout", "upper")
    }

    #[test]
    fn test_style_selection_and_aliases() {
        let ty = styled().build().unwrap();
        let v = Value::from("MiXeD");
        assert_eq!(ty.represent(&v, None).unwrap(), Value::from("mixed"));
        assert_eq!(ty.represent(&v, Some("upper")).unwrap(), Value::from("MIXED"));
        assert_eq!(ty.canonical_style("shout").unwrap().as_deref(), Some("upper"));
        assert!(matches!(
            ty.canonical_style("whisper"),
            Err(Error::Configuration(_))
        ));
        assert!(ty.represent(&v, Some("whisper")).is_err());
    }

    #[test]
    fn test_build_rejects_inconsistent_styles() {
        assert!(styled().default_style("missing").build().is_err());
        assert!(styled().style_alias("x", "missing").build().is_err());
        assert!(Type::builder("", Kind::Scalar).build().is_err());
        assert!(Type::builder("!t", Kind::Scalar)
            .default_style("lower")
            .build()
            .is_err());
    }

    #[test]
    fn test_represent_enforces_kind_shape() {
        let ty = Type::builder("!bad", Kind::Sequence)
            .predicate(|_| true)
            .represent(|_| raw("not a sequence"))
            .build()
            .unwrap();
        let err = ty.represent(&Value::Null, None).unwrap_err();
        assert!(matches!(err, Error::Representer { ref tag, .. } if tag == "!bad"));
    }

    #[test]
    fn test_defaults_without_behaviors() {
        let ty = Type::builder("!plain", Kind::Mapping).build().unwrap();
        assert!(ty.resolve(&Value::Null));
        assert!(!ty.matches(&Value::Null));
        assert_eq!(ty.construct(Value::from(1)).unwrap(), Value::from(1));
        assert_eq!(ty.styles().count(), 0);
    }
}
