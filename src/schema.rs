//! Schemas: ordered, immutable collections of [`Type`]s.
//!
//! A schema keeps two lists. *Implicit* types resolve plain scalars and are emitted
//! without a tag. *Explicit* types only apply when asked for by tag, and values they
//! represent are always emitted with a `!<tag>` annotation.
//!
//! ## Built-in schemas
//!
//! | Schema | Implicit | Explicit |
//! |--------|----------|----------|
//! | [`failsafe_schema`] | | `str`, `seq`, `map` |
//! | [`json_schema`] | `null`, `bool`, `int`, `float` | failsafe |
//! | [`core_schema`] | same as JSON | failsafe |
//! | [`default_schema`] | core + `timestamp`, `merge` | failsafe + `binary`, `omap`, `pairs`, `set` |
//! | [`extended_schema`] | default | default + `js/undefined`, `js/regexp`, `js/function` |
//!
//! ## Extending
//!
//! [`Schema::extend`] never touches the receiver; it returns a new schema sharing
//! the base's types.
//!
//! ```rust
//! use yaml_stringify::{default_schema, Kind, SchemaExtension, Type};
//!
//! let color = Type::builder("!color", Kind::Scalar).build().unwrap();
//! let schema = default_schema()
//!     .extend(SchemaExtension::new().explicit(color))
//!     .unwrap();
//!
//! assert!(schema.type_for_tag("!color").is_some());
//! assert!(default_schema().type_for_tag("!color").is_none());
//! ```

use crate::types::{self, expand_tag, Kind, Type};
use crate::{Error, Result, Value};
use log::{debug, trace};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// An ordered, immutable set of types.
#[derive(Clone)]
pub struct Schema {
    implicit: Vec<Arc<Type>>,
    explicit: Vec<Arc<Type>>,
}

/// Types to add on top of a base schema. See [`Schema::extend`].
#[derive(Clone, Default)]
pub struct SchemaExtension {
    implicit: Vec<Arc<Type>>,
    explicit: Vec<Arc<Type>>,
}

impl SchemaExtension {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a type that resolves plain scalars and is emitted untagged.
    #[must_use]
    pub fn implicit(mut self, ty: impl Into<Arc<Type>>) -> Self {
        self.implicit.push(ty.into());
        self
    }

    /// Adds a type that is always emitted with its tag.
    #[must_use]
    pub fn explicit(mut self, ty: impl Into<Arc<Type>>) -> Self {
        self.explicit.push(ty.into());
        self
    }
}

/// The type chosen for a value, and whether it is written with a tag.
#[derive(Clone, Copy, Debug)]
pub enum Resolution<'a> {
    Implicit(&'a Type),
    Explicit(&'a Type),
}

impl<'a> Resolution<'a> {
    #[must_use]
    pub fn ty(&self) -> &'a Type {
        match *self {
            Resolution::Implicit(ty) | Resolution::Explicit(ty) => ty,
        }
    }

    /// The tag to annotate the node with, `None` for implicit types.
    #[must_use]
    pub fn annotation(&self) -> Option<&'a str> {
        match *self {
            Resolution::Implicit(_) => None,
            Resolution::Explicit(ty) => Some(ty.tag()),
        }
    }
}

impl Schema {
    fn compose(&self, ext: SchemaExtension) -> Schema {
        let mut implicit = self.implicit.clone();
        implicit.extend(ext.implicit);
        let mut explicit = self.explicit.clone();
        explicit.extend(ext.explicit);
        Schema { implicit, explicit }
    }

    /// Returns a new schema holding this schema's types followed by `ext`'s.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if an added type reuses a tag already present,
    /// or an implicit type is not of [`Kind::Scalar`].
    pub fn extend(&self, ext: SchemaExtension) -> Result<Schema> {
        for ty in &ext.implicit {
            if ty.kind() != Kind::Scalar {
                return Err(Error::configuration(format!(
                    "!<{}> is a {} type; only scalar types can be implicit",
                    ty.tag(),
                    ty.kind()
                )));
            }
        }
        let mut seen: Vec<&str> = self.types().map(Type::tag).collect();
        for ty in ext.implicit.iter().chain(&ext.explicit) {
            if seen.contains(&ty.tag()) {
                return Err(Error::configuration(format!(
                    "duplicate type for tag !<{}>",
                    ty.tag()
                )));
            }
            seen.push(ty.tag());
        }

        debug!(
            "extending schema with {} implicit and {} explicit types",
            ext.implicit.len(),
            ext.explicit.len()
        );
        Ok(self.compose(ext))
    }

    /// Implicit types in resolution order.
    pub fn implicit_types(&self) -> impl Iterator<Item = &Type> {
        self.implicit.iter().map(Arc::as_ref)
    }

    /// Explicit types in resolution order.
    pub fn explicit_types(&self) -> impl Iterator<Item = &Type> {
        self.explicit.iter().map(Arc::as_ref)
    }

    fn types(&self) -> impl Iterator<Item = &Type> {
        self.explicit_types().chain(self.implicit_types())
    }

    /// Looks up a type by tag. Accepts the `!!name` shorthand.
    #[must_use]
    pub fn type_for_tag(&self, tag: &str) -> Option<&Type> {
        let tag = expand_tag(tag);
        self.types().find(|ty| ty.tag() == tag)
    }

    /// Picks the type that represents `value`: explicit types first, then implicit,
    /// each in registration order. The first predicate that accepts wins.
    #[must_use]
    pub fn resolve_for_value(&self, value: &Value) -> Option<Resolution<'_>> {
        let resolution = self
            .explicit_types()
            .find(|ty| ty.matches(value))
            .map(Resolution::Explicit)
            .or_else(|| {
                self.implicit_types()
                    .find(|ty| ty.matches(value))
                    .map(Resolution::Implicit)
            });
        match &resolution {
            Some(r) => trace!("{} resolved to !<{}>", value.kind_name(), r.ty().tag()),
            None => trace!("{} has no matching type", value.kind_name()),
        }
        resolution
    }

    /// Would `text`, written as a plain scalar, be read back as something other than a string?
    #[must_use]
    pub fn resolves_implicitly(&self, text: &str) -> bool {
        let data = Value::String(text.to_string());
        self.implicit_types().any(|ty| ty.resolve(&data))
    }

    /// Constructs the value a plain scalar denotes under this schema.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yaml_stringify::{core_schema, Value};
    ///
    /// let schema = core_schema();
    /// assert_eq!(schema.resolve_scalar("0x1F").unwrap(), Value::from(31));
    /// assert_eq!(schema.resolve_scalar("~").unwrap(), Value::Null);
    /// assert_eq!(schema.resolve_scalar("hello").unwrap(), Value::from("hello"));
    /// ```
    pub fn resolve_scalar(&self, text: &str) -> Result<Value> {
        let data = Value::String(text.to_string());
        match self.implicit_types().find(|ty| ty.resolve(&data)) {
            Some(ty) => ty.construct(data),
            None => Ok(data),
        }
    }

    /// Constructs a value from raw data annotated with `tag`.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] for an unknown tag; [`Error::Construct`] when the data
    /// has the wrong shape or the type rejects it.
    pub fn construct_tagged(&self, tag: &str, data: Value) -> Result<Value> {
        let ty = self
            .type_for_tag(tag)
            .ok_or_else(|| Error::configuration(format!("unknown tag !<{}>", expand_tag(tag))))?;
        if !ty.kind().accepts(&data) {
            return Err(Error::construct(
                ty.tag(),
                format!("expected {} data, got {}", ty.kind(), data.kind_name()),
            ));
        }
        if !ty.resolve(&data) {
            return Err(Error::construct(
                ty.tag(),
                format!("{} data is not accepted", data.kind_name()),
            ));
        }
        ty.construct(data)
    }
}

impl Default for Schema {
    fn default() -> Self {
        default_schema().clone()
    }
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("implicit", &self.implicit_types().map(Type::tag).collect::<Vec<_>>())
            .field("explicit", &self.explicit_types().map(Type::tag).collect::<Vec<_>>())
            .finish()
    }
}

/// Strings, sequences and mappings only.
pub fn failsafe_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| Schema {
        implicit: Vec::new(),
        explicit: vec![
            Arc::new(types::failsafe::str()),
            Arc::new(types::failsafe::seq()),
            Arc::new(types::failsafe::map()),
        ],
    })
}

/// Failsafe plus null, bool, int and float.
pub fn json_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        failsafe_schema().compose(
            SchemaExtension::new()
                .implicit(types::core::null())
                .implicit(types::core::bool())
                .implicit(types::core::int())
                .implicit(types::core::float()),
        )
    })
}

/// Identical to [`json_schema`].
pub fn core_schema() -> &'static Schema {
    json_schema()
}

/// The schema used when none is configured.
pub fn default_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        core_schema().compose(
            SchemaExtension::new()
                .implicit(types::default::timestamp())
                .implicit(types::default::merge())
                .explicit(types::default::binary())
                .explicit(types::default::omap())
                .explicit(types::default::pairs())
                .explicit(types::default::set()),
        )
    })
}

/// Default plus `undefined`, regular expressions and functions.
pub fn extended_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        default_schema().compose(
            SchemaExtension::new()
                .explicit(types::js::undefined())
                .explicit(types::js::regexp())
                .explicit(types::js::function()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegExp;

    fn tags(schema: &Schema) -> Vec<&str> {
        schema.types().map(Type::tag).collect()
    }

    #[test]
    fn test_builtin_schemas_have_unique_tags() {
        for schema in [failsafe_schema(), json_schema(), default_schema(), extended_schema()] {
            let all = tags(schema);
            let mut unique = all.clone();
            unique.sort_unstable();
            unique.dedup();
            assert_eq!(all.len(), unique.len(), "{:?}", schema);
            assert!(schema.types().all(|ty| ty.validate().is_ok()));
        }
    }

    #[test]
    fn test_explicit_types_win_over_implicit() {
        let shadow = Type::builder("!shadow", Kind::Scalar)
            .predicate(Value::is_bool)
            .represent(|_| Ok(Value::from("shadowed")))
            .build()
            .unwrap();
        let schema = default_schema()
            .extend(SchemaExtension::new().explicit(shadow))
            .unwrap();
        let resolution = schema.resolve_for_value(&Value::from(true)).unwrap();
        assert_eq!(resolution.annotation(), Some("!shadow"));

        let plain = default_schema().resolve_for_value(&Value::from(true)).unwrap();
        assert!(plain.annotation().is_none());
        assert_eq!(plain.ty().tag(), "tag:yaml.org,2002:bool");
    }

    #[test]
    fn test_extend_rejects_conflicts() {
        let dup = Type::builder("tag:yaml.org,2002:binary", Kind::Scalar).build().unwrap();
        assert!(matches!(
            default_schema().extend(SchemaExtension::new().explicit(dup)),
            Err(Error::Configuration(_))
        ));

        let seq = Type::builder("!list", Kind::Sequence).build().unwrap();
        assert!(default_schema()
            .extend(SchemaExtension::new().implicit(seq))
            .is_err());

        let twice = Type::builder("!twice", Kind::Scalar).build().unwrap();
        let twice = Arc::new(twice);
        assert!(default_schema()
            .extend(SchemaExtension::new().explicit(twice.clone()).explicit(twice))
            .is_err());
    }

    #[test]
    fn test_extend_leaves_base_untouched() {
        let before = tags(default_schema()).len();
        let ext = default_schema()
            .extend(SchemaExtension::new().explicit(types::js::undefined()))
            .unwrap();
        assert_eq!(tags(default_schema()).len(), before);
        assert_eq!(tags(&ext).len(), before + 1);
        assert!(default_schema().resolve_for_value(&Value::Undefined).is_none());
        assert!(ext.resolve_for_value(&Value::Undefined).is_some());
    }

    #[test]
    fn test_scalar_resolution() {
        let schema = default_schema();
        assert_eq!(schema.resolve_scalar("true").unwrap(), Value::from(true));
        assert_eq!(schema.resolve_scalar("1.5").unwrap(), Value::from(1.5));
        assert_eq!(schema.resolve_scalar("0o7").unwrap(), Value::from("0o7"));
        assert!(schema.resolve_scalar("2002-12-14").unwrap().as_timestamp().is_some());
        assert!(schema.resolves_implicitly("null"));
        assert!(schema.resolves_implicitly("<<"));
        assert!(!schema.resolves_implicitly("foobar"));
        assert!(!failsafe_schema().resolves_implicitly("null"));
    }

    #[test]
    fn test_construct_tagged() {
        let schema = extended_schema();
        assert_eq!(
            schema
                .construct_tagged("!!binary", Value::from("SGVsbG8="))
                .unwrap(),
            Value::from(&b"Hello"[..])
        );
        assert_eq!(
            schema
                .construct_tagged("!!js/regexp", Value::from("/foobar/im"))
                .unwrap(),
            Value::RegExp(RegExp::new("foobar", "im"))
        );
        assert!(matches!(
            schema.construct_tagged("!!nope", Value::Null),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            schema.construct_tagged("!!binary", Value::Sequence(vec![])),
            Err(Error::Construct { .. })
        ));
    }
}
