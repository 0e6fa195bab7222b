//! Host-language types opted into by the extended schema.

use super::core::yaml_tag;
use super::{raw, scalar_text, Kind, Type};
use crate::{Error, RegExp, Value};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

pub(crate) fn undefined() -> Type {
    Type::builder(yaml_tag("js/undefined"), Kind::Scalar)
        .resolve(|_| true)
        .construct(|_| Ok(Value::Undefined))
        .predicate(Value::is_undefined)
        .represent(|_| raw(""))
        .finish()
}

fn literal_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^/(?P<source>(?s:.+))/(?P<flags>[gimsuy]*)$").expect("static pattern")
    })
}

/// Splits `/source/flags`. Text without the leading slash is a bare pattern.
fn parse_literal(text: &str) -> Option<RegExp> {
    if !text.starts_with('/') {
        return Some(RegExp::new(text, ""));
    }
    let caps = literal_pattern().captures(text)?;
    let flags = &caps["flags"];
    let mut seen = HashSet::new();
    if !flags.chars().all(|c| seen.insert(c)) {
        return None;
    }
    Some(RegExp::new(&caps["source"], flags))
}

pub(crate) fn regexp() -> Type {
    Type::builder(yaml_tag("js/regexp"), Kind::Scalar)
        .resolve(|data| {
            scalar_text(data).map_or(false, |text| !text.is_empty() && parse_literal(text).is_some())
        })
        .construct(|data| {
            let text = scalar_text(&data).unwrap_or_default();
            parse_literal(text).map(Value::RegExp).ok_or_else(|| {
                Error::construct(&yaml_tag("js/regexp"), format!("invalid regular expression {:?}", text))
            })
        })
        .predicate(|v| matches!(v, Value::RegExp(_)))
        .represent(|v| match v {
            Value::RegExp(re) => raw(re.to_string()),
            other => Err(Error::representer(
                &yaml_tag("js/regexp"),
                format!("{} is not a regular expression", other.kind_name()),
            )),
        })
        .finish()
}

/// Callables are recognized so the failure names them, but never rendered.
pub(crate) fn function() -> Type {
    Type::builder(yaml_tag("js/function"), Kind::Scalar)
        .resolve(|_| false)
        .predicate(|v| matches!(v, Value::Function(_)))
        .represent(|v| {
            let name = match v {
                Value::Function(name) => name.as_str(),
                _ => "<anonymous>",
            };
            Err(Error::representer(
                &yaml_tag("js/function"),
                format!("function `{}` has no textual representation", name),
            ))
        })
        .finish()
}
