//! The three failsafe types every schema carries: `str`, `seq` and `map`.
//!
//! They only construct. Native strings, sequences and mappings that no other type
//! claims are emitted as themselves.

use super::core::yaml_tag;
use super::{Kind, Type};
use crate::Value;

pub(crate) fn str() -> Type {
    Type::builder(yaml_tag("str"), Kind::Scalar)
        .construct(|data| Ok(Value::String(data.as_str().unwrap_or_default().to_string())))
        .finish()
}

pub(crate) fn seq() -> Type {
    Type::builder(yaml_tag("seq"), Kind::Sequence)
        .construct(|data| match data {
            Value::Sequence(_) => Ok(data),
            _ => Ok(Value::Sequence(Vec::new())),
        })
        .finish()
}

pub(crate) fn map() -> Type {
    Type::builder(yaml_tag("map"), Kind::Mapping)
        .construct(|data| match data {
            Value::Mapping(_) => Ok(data),
            _ => Ok(Value::Mapping(Default::default())),
        })
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failsafe_types_never_match_values() {
        for ty in [str(), seq(), map()] {
            assert!(!ty.has_predicate());
            assert!(!ty.matches(&Value::from("text")));
        }
    }

    #[test]
    fn test_seq_construct_defaults_to_empty() {
        assert_eq!(seq().construct(Value::Null).unwrap(), Value::Sequence(vec![]));
        let data = Value::Sequence(vec![Value::from(1)]);
        assert_eq!(seq().construct(data.clone()).unwrap(), data);
    }
}
