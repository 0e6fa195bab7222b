//! Types added by the default schema on top of the core schema.

use super::core::yaml_tag;
use super::{raw, scalar_text, Kind, Type};
use crate::{Error, Mapping, Result, Value};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, TimeZone, Utc};
use regex::{Captures, Regex};
use std::collections::HashSet;
use std::sync::OnceLock;

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("static pattern")
    })
}

fn timestamp_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})",
            r"(?:[Tt]|[ \t]+)([0-9]{1,2}):([0-9]{2}):([0-9]{2})",
            r"(?:\.([0-9]*))?",
            r"(?:[ \t]*(Z|([-+])([0-9]{1,2})(?::([0-9]{2}))?))?$",
        ))
        .expect("static pattern")
    })
}

pub(crate) fn timestamp() -> Type {
    Type::builder(yaml_tag("timestamp"), Kind::Scalar)
        .resolve(|data| {
            scalar_text(data).map_or(false, |text| {
                date_pattern().is_match(text) || timestamp_pattern().is_match(text)
            })
        })
        .construct(|data| construct_timestamp(scalar_text(&data).unwrap_or_default()))
        .predicate(|v| matches!(v, Value::Timestamp(_)))
        .represent(|v| match v.as_timestamp() {
            Some(dt) => raw(dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => Err(Error::representer(
                &yaml_tag("timestamp"),
                format!("{} is not a timestamp", v.kind_name()),
            )),
        })
        .finish()
}

fn construct_timestamp(text: &str) -> Result<Value> {
    let invalid = || Error::construct(&yaml_tag("timestamp"), format!("invalid timestamp {:?}", text));
    let field = |caps: &Captures<'_>, i: usize| -> u32 {
        caps.get(i)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    };

    if let Some(caps) = date_pattern().captures(text) {
        let date = NaiveDate::from_ymd_opt(field(&caps, 1) as i32, field(&caps, 2), field(&caps, 3))
            .ok_or_else(invalid)?;
        let naive = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
        return Ok(Value::Timestamp(Utc.from_utc_datetime(&naive)));
    }

    let caps = timestamp_pattern().captures(text).ok_or_else(invalid)?;
    let millis = caps.get(7).map_or(0, |m| {
        let digits: String = m.as_str().chars().chain("000".chars()).take(3).collect();
        digits.parse().unwrap_or(0)
    });
    let naive = NaiveDate::from_ymd_opt(field(&caps, 1) as i32, field(&caps, 2), field(&caps, 3))
        .and_then(|d| d.and_hms_milli_opt(field(&caps, 4), field(&caps, 5), field(&caps, 6), millis))
        .ok_or_else(invalid)?;
    let mut instant: DateTime<Utc> = Utc.from_utc_datetime(&naive);

    if caps.get(9).is_some() {
        let minutes = i64::from(field(&caps, 10)) * 60 + i64::from(field(&caps, 11));
        let offset = Duration::minutes(minutes);
        instant = if &caps[9] == "-" {
            instant + offset
        } else {
            instant - offset
        };
    }
    Ok(Value::Timestamp(instant))
}

pub(crate) fn merge() -> Type {
    Type::builder(yaml_tag("merge"), Kind::Scalar)
        .resolve(|data| matches!(scalar_text(data), Some("<<")))
        .finish()
}

fn is_base64_text(text: &str) -> bool {
    let mut chars = 0usize;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            continue;
        }
        if !(c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=')) {
            return false;
        }
        chars += 1;
    }
    chars % 4 == 0
}

pub(crate) fn binary() -> Type {
    Type::builder(yaml_tag("binary"), Kind::Scalar)
        .resolve(|data| scalar_text(data).map_or(false, is_base64_text))
        .construct(|data| {
            let compact: String = scalar_text(&data)
                .unwrap_or_default()
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            STANDARD
                .decode(compact)
                .map(Value::Binary)
                .map_err(|e| Error::construct(&yaml_tag("binary"), e))
        })
        .predicate(Value::is_binary)
        .represent(|v| raw(STANDARD.encode(v.as_binary().unwrap_or_default())))
        .finish()
}

/// A sequence of single-key mappings.
fn single_key_entries(data: &Value) -> Option<Vec<(&String, &Value)>> {
    data.as_sequence()?
        .iter()
        .map(|item| {
            let map = item.as_mapping()?;
            if map.len() == 1 {
                map.iter().next()
            } else {
                None
            }
        })
        .collect()
}

pub(crate) fn omap() -> Type {
    Type::builder(yaml_tag("omap"), Kind::Sequence)
        .resolve(|data| {
            single_key_entries(data).map_or(false, |entries| {
                let mut seen = HashSet::new();
                entries.iter().all(|(key, _)| seen.insert(key.as_str()))
            })
        })
        .finish()
}

pub(crate) fn pairs() -> Type {
    Type::builder(yaml_tag("pairs"), Kind::Sequence)
        .resolve(|data| single_key_entries(data).is_some())
        .construct(|data| {
            let entries = single_key_entries(&data).ok_or_else(|| {
                Error::construct(&yaml_tag("pairs"), "expected a sequence of single-key mappings")
            })?;
            Ok(Value::Sequence(
                entries
                    .into_iter()
                    .map(|(k, v)| Value::Sequence(vec![Value::String(k.clone()), v.clone()]))
                    .collect(),
            ))
        })
        .finish()
}

pub(crate) fn set() -> Type {
    Type::builder(yaml_tag("set"), Kind::Mapping)
        .resolve(|data| {
            data.as_mapping()
                .map_or(false, |m| m.values().all(Value::is_null))
        })
        .construct(|data| match data {
            Value::Mapping(_) => Ok(data),
            _ => Ok(Value::Mapping(Mapping::new())),
        })
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::yaml;

    fn ts(text: &str) -> DateTime<Utc> {
        match construct_timestamp(text).unwrap() {
            Value::Timestamp(dt) => dt,
            other => panic!("expected timestamp, got {:?}", other),
        }
    }

    #[test]
    fn test_timestamp_forms() {
        assert_eq!(ts("2002-12-14").to_rfc3339(), "2002-12-14T00:00:00+00:00");
        assert_eq!(
            ts("2001-12-14t21:59:43.10-05:00").to_rfc3339_opts(SecondsFormat::Millis, true),
            "2001-12-15T02:59:43.100Z"
        );
        assert_eq!(
            ts("2001-12-14 21:59:43.10 -5").to_rfc3339_opts(SecondsFormat::Millis, true),
            "2001-12-15T02:59:43.100Z"
        );
        assert_eq!(
            ts("2001-12-15 2:59:43.10").to_rfc3339_opts(SecondsFormat::Millis, true),
            "2001-12-15T02:59:43.100Z"
        );
        assert!(construct_timestamp("2001-13-40").is_err());
    }

    #[test]
    fn test_timestamp_represents_iso() {
        let ty = timestamp();
        let value = Value::Timestamp(ts("2001-12-14t21:59:43.10-05:00"));
        assert!(ty.matches(&value));
        assert_eq!(
            ty.represent(&value, None).unwrap(),
            Value::from("2001-12-15T02:59:43.100Z")
        );
    }

    #[test]
    fn test_binary_resolution_and_representation() {
        let ty = binary();
        assert!(ty.resolve(&Value::from("SGVsbG8=")));
        assert!(ty.resolve(&Value::from("SGVs\nbG8=")));
        assert!(!ty.resolve(&Value::from("SGVsbG8")));
        assert!(!ty.resolve(&Value::from("SGV*bG8=")));
        assert_eq!(
            ty.construct(Value::from("SGVs\nbG8=")).unwrap(),
            Value::from(&b"Hello"[..])
        );
        assert_eq!(
            ty.represent(&Value::from(&b"Hello"[..]), None).unwrap(),
            Value::from("SGVsbG8=")
        );
    }

    #[test]
    fn test_collection_types() {
        let entries = yaml!([{ "a": 1 }, { "b": 2 }]);
        let duplicated = yaml!([{ "a": 1 }, { "a": 2 }]);
        assert!(omap().resolve(&entries));
        assert!(!omap().resolve(&duplicated));
        assert!(pairs().resolve(&duplicated));
        assert_eq!(
            pairs().construct(entries).unwrap(),
            yaml!([["a", 1], ["b", 2]])
        );
        assert!(set().resolve(&yaml!({ "a": null, "b": null })));
        assert!(!set().resolve(&yaml!({ "a": 1 })));
        assert!(merge().resolve(&Value::from("<<")));
    }
}
