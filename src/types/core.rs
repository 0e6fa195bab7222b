//! Implicit scalar types of the JSON and core schemas: null, bool, int and float.

use super::{raw, scalar_text, Kind, Type, YAML_TAG_PREFIX};
use crate::scalar::{format_float, format_int, FloatCase, IntRadix};
use crate::{Error, Number, Result, Value};
use regex::Regex;
use std::sync::OnceLock;

pub(crate) fn yaml_tag(name: &str) -> String {
    format!("{}{}", YAML_TAG_PREFIX, name)
}

pub(crate) fn null() -> Type {
    Type::builder(yaml_tag("null"), Kind::Scalar)
        .resolve(|data| {
            matches!(
                scalar_text(data),
                Some("~" | "null" | "Null" | "NULL" | "")
            )
        })
        .construct(|_| Ok(Value::Null))
        .predicate(Value::is_null)
        .style("canonical", |_| raw("~"))
        .style("lowercase", |_| raw("null"))
        .style("uppercase", |_| raw("NULL"))
        .style("camelcase", |_| raw("Null"))
        .default_style("lowercase")
        .finish()
}

pub(crate) fn bool() -> Type {
    Type::builder(yaml_tag("bool"), Kind::Scalar)
        .resolve(|data| {
            matches!(
                scalar_text(data),
                Some("true" | "True" | "TRUE" | "false" | "False" | "FALSE")
            )
        })
        .construct(|data| {
            let text = scalar_text(&data).unwrap_or_default();
            Ok(Value::Bool(matches!(text, "true" | "True" | "TRUE")))
        })
        .predicate(Value::is_bool)
        .style("lowercase", |v| raw(bool_text(v, "true", "false")))
        .style("uppercase", |v| raw(bool_text(v, "TRUE", "FALSE")))
        .style("camelcase", |v| raw(bool_text(v, "True", "False")))
        .default_style("lowercase")
        .finish()
}

fn bool_text(value: &Value, yes: &'static str, no: &'static str) -> &'static str {
    if value.as_bool().unwrap_or(false) {
        yes
    } else {
        no
    }
}

pub(crate) fn int() -> Type {
    Type::builder(yaml_tag("int"), Kind::Scalar)
        .resolve(|data| scalar_text(data).map_or(false, resolve_int))
        .construct(|data| {
            let text = scalar_text(&data).unwrap_or_default();
            construct_int(text)
        })
        .predicate(|v| matches!(v, Value::Number(n) if n.is_integral()))
        .style("binary", |v| int_text(v, IntRadix::Binary))
        .style("octal", |v| int_text(v, IntRadix::Octal))
        .style("decimal", |v| int_text(v, IntRadix::Decimal))
        .style("hexadecimal", |v| int_text(v, IntRadix::Hexadecimal))
        .default_style("decimal")
        .style_alias("bin", "binary")
        .style_alias("2", "binary")
        .style_alias("oct", "octal")
        .style_alias("8", "octal")
        .style_alias("dec", "decimal")
        .style_alias("10", "decimal")
        .style_alias("hex", "hexadecimal")
        .style_alias("16", "hexadecimal")
        .finish()
}

fn int_text(value: &Value, radix: IntRadix) -> Result<Value> {
    match value.as_i64() {
        Some(i) => raw(format_int(i, radix)),
        None => Err(Error::representer(
            &yaml_tag("int"),
            format!("{} is not an integer", value.kind_name()),
        )),
    }
}

fn sexagesimal_tail() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(?::[0-5]?[0-9])+$").expect("static pattern"))
}

/// YAML 1.1 integers: decimal, `0b` binary, `0x` hex, `0` octal and `a:b` base 60,
/// with `_` separators anywhere except at the end.
fn resolve_int(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut index = 0;
    if matches!(bytes[0], b'-' | b'+') {
        index += 1;
    }
    let digits_valid = |rest: &[u8], accept: fn(u8) -> bool| {
        let mut has_digits = false;
        for &b in rest {
            if b == b'_' {
                continue;
            }
            if !accept(b) {
                return false;
            }
            has_digits = true;
        }
        has_digits && rest.last() != Some(&b'_')
    };

    if bytes.get(index) == Some(&b'0') {
        if index + 1 == bytes.len() {
            return true;
        }
        index += 1;
        return match bytes[index] {
            b'b' => digits_valid(&bytes[index + 1..], |b| b == b'0' || b == b'1'),
            b'x' => digits_valid(&bytes[index + 1..], |b| b.is_ascii_hexdigit()),
            _ => digits_valid(&bytes[index..], |b| (b'0'..=b'7').contains(&b)),
        };
    }

    if bytes.get(index) == Some(&b'_') {
        return false;
    }
    let rest = &bytes[index..];
    let split = rest.iter().position(|&b| b == b':').unwrap_or(rest.len());
    if !digits_valid(&rest[..split], |b| b.is_ascii_digit()) {
        return false;
    }
    split == rest.len() || sexagesimal_tail().is_match(&text[index + split..])
}

fn construct_int(text: &str) -> Result<Value> {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let (negative, body) = match cleaned.as_bytes().first() {
        Some(b'-') => (true, &cleaned[1..]),
        Some(b'+') => (false, &cleaned[1..]),
        _ => (false, cleaned.as_str()),
    };
    if body == "0" {
        return Ok(Value::from(0));
    }

    let (digits, radix) = if let Some(bin) = body.strip_prefix("0b") {
        (bin, 2)
    } else if let Some(hex) = body.strip_prefix("0x") {
        (hex, 16)
    } else if let Some(oct) = body.strip_prefix('0') {
        (oct, 8)
    } else if body.contains(':') {
        let mut total: i128 = 0;
        for part in body.split(':') {
            let part: i128 = part
                .parse()
                .map_err(|e| Error::construct(&yaml_tag("int"), e))?;
            total = total.saturating_mul(60).saturating_add(part);
        }
        return Ok(int_value(if negative { -total } else { total }));
    } else {
        (body, 10)
    };

    let magnitude = i128::from_str_radix(digits, radix)
        .map_err(|e| Error::construct(&yaml_tag("int"), format!("{}: {}", text, e)))?;
    Ok(int_value(if negative { -magnitude } else { magnitude }))
}

/// Integers that overflow `i64` degrade to floats, like any other out-of-range number.
fn int_value(value: i128) -> Value {
    match i64::try_from(value) {
        Ok(i) => Value::Number(Number::Integer(i)),
        Err(_) => Value::Number(Number::Float(value as f64)),
    }
}

fn float_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"^(?:[-+]?(?:0|[1-9][0-9_]*)(?:\.[0-9_]*)?(?:[eE][-+]?[0-9]+)?",
            r"|\.[0-9_]+(?:[eE][-+]?[0-9]+)?",
            r"|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*",
            r"|[-+]?\.(?:inf|Inf|INF)",
            r"|\.(?:nan|NaN|NAN))$",
        ))
        .expect("static pattern")
    })
}

fn resolve_float(text: &str) -> bool {
    float_pattern().is_match(text) && !text.ends_with('_')
}

fn construct_float(text: &str) -> Result<Value> {
    let lowered = text.replace('_', "").to_lowercase();
    let (sign, body) = match lowered.as_bytes().first() {
        Some(b'-') => (-1.0, &lowered[1..]),
        Some(b'+') => (1.0, &lowered[1..]),
        _ => (1.0, lowered.as_str()),
    };
    let invalid = |e: std::num::ParseFloatError| Error::construct(&yaml_tag("float"), e);

    let magnitude = match body {
        ".inf" => f64::INFINITY,
        ".nan" => return Ok(Value::from(f64::NAN)),
        _ if body.contains(':') => {
            let mut total = 0.0;
            for part in body.split(':') {
                total = total * 60.0 + part.parse::<f64>().map_err(invalid)?;
            }
            total
        }
        _ => body.parse::<f64>().map_err(invalid)?,
    };
    Ok(Value::from(sign * magnitude))
}

pub(crate) fn float() -> Type {
    Type::builder(yaml_tag("float"), Kind::Scalar)
        .resolve(|data| scalar_text(data).map_or(false, resolve_float))
        .construct(|data| construct_float(scalar_text(&data).unwrap_or_default()))
        .predicate(|v| matches!(v, Value::Number(n @ Number::Float(_)) if !n.is_integral()))
        .style("lowercase", |v| float_text(v, FloatCase::Lowercase))
        .style("uppercase", |v| float_text(v, FloatCase::Uppercase))
        .style("camelcase", |v| float_text(v, FloatCase::Camelcase))
        .default_style("lowercase")
        .finish()
}

fn float_text(value: &Value, case: FloatCase) -> Result<Value> {
    match value.as_f64() {
        Some(f) => raw(format_float(f, case)),
        None => Err(Error::representer(
            &yaml_tag("float"),
            format!("{} is not a number", value.kind_name()),
        )),
    }
}
