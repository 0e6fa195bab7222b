/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Mapping keys must be string literals and keep their written order. Any other
/// single token tree is converted with `Value::from`; wrap longer expressions,
/// including negative numbers, in parentheses.
///
/// ```rust
/// use yaml_stringify::{yaml, Value};
///
/// let value = yaml!({
///     "name": "Alice",
///     "tags": ["a", "b"],
///     "offset": (-3),
///     "missing": null
/// });
/// assert_eq!(value.as_mapping().unwrap().get("offset"), Some(&Value::from(-3)));
/// ```
#[macro_export]
macro_rules! yaml {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::yaml!($elem)),*])
    };

    ({}) => {
        $crate::Value::Mapping($crate::Mapping::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Mapping::new();
        $(
            mapping.insert($key.to_string(), $crate::yaml!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Mapping, Number, Value};

    #[test]
    fn test_yaml_macro_primitives() {
        assert_eq!(yaml!(null), Value::Null);
        assert_eq!(yaml!(true), Value::Bool(true));
        assert_eq!(yaml!(42), Value::Number(Number::Integer(42)));
        assert_eq!(yaml!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(yaml!("hello"), Value::String("hello".to_string()));
        assert_eq!(yaml!((Value::Undefined)), Value::Undefined);
    }

    #[test]
    fn test_yaml_macro_collections() {
        assert_eq!(yaml!([]), Value::Sequence(vec![]));
        assert_eq!(yaml!({}), Value::Mapping(Mapping::new()));

        let value = yaml!({ "z": [1, (-2)], "a": { "b": null } });
        let map = value.as_mapping().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["z", "a"]);
        assert_eq!(
            map.get("z"),
            Some(&Value::Sequence(vec![Value::from(1), Value::from(-2)]))
        );
    }
}
