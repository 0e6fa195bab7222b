use serde::Serialize;
use yaml_stringify::{
    default_schema, extended_schema, stringify, stringify_with_options, to_string, yaml,
    DumpOptions, Error, Kind, RegExp, SchemaExtension, Type, Value,
};

fn point_type() -> Type {
    Type::builder("!point", Kind::Sequence)
        .resolve(|data| data.as_sequence().map_or(false, |s| s.len() == 3))
        .construct(|data| {
            let seq = data.as_sequence().cloned().unwrap_or_default();
            let mut map = yaml_stringify::Mapping::new();
            for (key, value) in ["x", "y", "z"].iter().zip(seq) {
                map.insert(key.to_string(), value);
            }
            Ok(Value::Mapping(map))
        })
        .predicate(|value| {
            value.as_mapping().map_or(false, |m| {
                m.len() == 3 && m.contains_key("x") && m.contains_key("y") && m.contains_key("z")
            })
        })
        .represent(|value| {
            let m = value.as_mapping().cloned().unwrap_or_default();
            Ok(Value::Sequence(
                ["x", "y", "z"]
                    .iter()
                    .map(|k| m.get(k).cloned().unwrap_or_default())
                    .collect(),
            ))
        })
        .build()
        .unwrap()
}

#[test]
fn test_nested_mappings_and_sequences() {
    let value = yaml!({
        "foo": {
            "bar": true,
            "test": ["a", "b", { "a": false }, { "a": false }]
        },
        "test": "foobar",
        "binary": (Value::Binary(b"Hello".to_vec()))
    });

    assert_eq!(
        stringify(&value).unwrap(),
        "foo:\n  bar: true\n  test:\n    - a\n    - b\n    - a: false\n    - a: false\ntest: foobar\nbinary: !<tag:yaml.org,2002:binary> SGVsbG8=\n"
    );
}

#[test]
fn test_root_values() {
    assert_eq!(stringify(&yaml!([1, 2, 3])).unwrap(), "- 1\n- 2\n- 3\n");
    assert_eq!(stringify(&yaml!("Hello world")).unwrap(), "Hello world\n");
    assert_eq!(stringify(&yaml!(1.01)).unwrap(), "1.01\n");
    assert_eq!(stringify(&yaml!(true)).unwrap(), "true\n");
}

#[test]
fn test_undefined_fails_under_default_schema() {
    let err = stringify(&yaml!({ "undefined": (Value::Undefined) })).unwrap_err();
    assert!(matches!(err, Error::UnresolvableType { ref kind } if kind == "undefined"));
    assert!(err
        .to_string()
        .contains("unacceptable kind of an object to dump"));
}

#[test]
fn test_extended_schema_values() {
    let value = yaml!({
        "regexp": {
            "simple": (RegExp::new("foobar", "")),
            "modifiers": (RegExp::new("foobar", "im"))
        },
        "undefined": (Value::Undefined)
    });
    let options = DumpOptions::new().with_schema(extended_schema().clone());

    assert_eq!(
        stringify_with_options(&value, &options).unwrap(),
        "regexp:\n  simple: !<tag:yaml.org,2002:js/regexp> /foobar/\n  modifiers: !<tag:yaml.org,2002:js/regexp> /foobar/im\nundefined: !<tag:yaml.org,2002:js/undefined> ''\n"
    );
}

#[test]
fn test_function_fails_under_extended_schema() {
    let value = yaml!({ "function": (Value::Function("sum".to_string())) });
    let options = DumpOptions::new().with_schema(extended_schema().clone());
    let err = stringify_with_options(&value, &options).unwrap_err();
    assert!(matches!(err, Error::Representer { ref tag, .. } if tag == "tag:yaml.org,2002:js/function"));

    assert!(matches!(
        stringify(&value),
        Err(Error::UnresolvableType { .. })
    ));
}

#[test]
fn test_custom_type_with_structured_representation() {
    let schema = default_schema()
        .extend(SchemaExtension::new().explicit(point_type()))
        .unwrap();
    let value = yaml!({ "point": { "x": 1, "y": 2, "z": 3 } });

    assert_eq!(
        stringify_with_options(&value, &DumpOptions::new().with_schema(schema.clone())).unwrap(),
        "point: !<!point> \n  - 1\n  - 2\n  - 3\n"
    );

    let constructed = schema
        .construct_tagged("!point", yaml!([1, 2, 3]))
        .unwrap();
    assert_eq!(constructed, yaml!({ "x": 1, "y": 2, "z": 3 }));
}

#[test]
fn test_extension_does_not_mutate_base() {
    let value = Value::Undefined;
    let undefined = Type::builder("tag:yaml.org,2002:js/undefined", Kind::Scalar)
        .predicate(Value::is_undefined)
        .represent(|_| Ok(Value::from("")))
        .build()
        .unwrap();
    let extended = default_schema()
        .extend(SchemaExtension::new().explicit(undefined))
        .unwrap();

    assert!(matches!(
        stringify(&value),
        Err(Error::UnresolvableType { .. })
    ));
    assert_eq!(
        stringify_with_options(&value, &DumpOptions::new().with_schema(extended)).unwrap(),
        "!<tag:yaml.org,2002:js/undefined> ''\n"
    );
    assert!(matches!(
        stringify(&value),
        Err(Error::UnresolvableType { .. })
    ));
}

#[test]
fn test_floats() {
    let value = yaml!([4.1, (-1.473), 6.82e-5, 6.82e-12, 5e-12, 0.0, (-0.0)]);
    assert_eq!(
        stringify(&value).unwrap(),
        "- 4.1\n- -1.473\n- 0.0000682\n- 6.82e-12\n- 5.e-12\n- 0\n- -0.0\n"
    );
}

#[test]
fn test_special_floats_in_each_case() {
    let value = yaml!([(f64::INFINITY), (f64::NEG_INFINITY), (f64::NAN)]);

    assert_eq!(stringify(&value).unwrap(), "- .inf\n- -.inf\n- .nan\n");
    assert_eq!(
        stringify_with_options(&value, &DumpOptions::new().with_style("!!float", "uppercase"))
            .unwrap(),
        "- .INF\n- -.INF\n- .NAN\n"
    );
    assert_eq!(
        stringify_with_options(
            &value,
            &DumpOptions::new().with_style("tag:yaml.org,2002:float", "camelcase")
        )
        .unwrap(),
        "- .Inf\n- -.Inf\n- .NaN\n"
    );
}

#[test]
fn test_unknown_style_is_a_configuration_error() {
    let options = DumpOptions::new().with_style("!!bool", "sarcastic");
    assert!(matches!(
        stringify_with_options(&yaml!(true), &options),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_failure_is_all_or_nothing() {
    let value = yaml!({
        "ok": [1, 2, 3],
        "deep": { "deeper": [{ "bad": (Value::Undefined) }] }
    });
    assert!(stringify(&value).is_err());
}

#[test]
fn test_key_order_is_preserved_unless_sorting() {
    let value = yaml!({ "b": 1, "a": 2, "c": 3 });
    assert_eq!(stringify(&value).unwrap(), "b: 1\na: 2\nc: 3\n");
    assert_eq!(
        stringify_with_options(&value, &DumpOptions::new().with_sort_keys(true)).unwrap(),
        "a: 2\nb: 1\nc: 3\n"
    );
}

#[test]
fn test_nesting_indentation() {
    let value = yaml!({
        "list": [{ "name": "x", "tags": ["t1", "t2"] }],
        "map": { "inner": [1] }
    });
    assert_eq!(
        stringify(&value).unwrap(),
        "list:\n  - name: x\n    tags:\n      - t1\n      - t2\nmap:\n  inner:\n    - 1\n"
    );
}

#[test]
fn test_four_space_indent_disables_compact_items() {
    let value = yaml!({ "list": [{ "a": 1, "b": 2 }] });
    assert_eq!(
        stringify_with_options(&value, &DumpOptions::new().with_indent(4)).unwrap(),
        "list:\n    -\n        a: 1\n        b: 2\n"
    );
}

#[test]
fn test_flow_level() {
    let value = yaml!({ "outer": { "inner": [1, 2], "name": "x y" } });
    assert_eq!(
        stringify_with_options(&value, &DumpOptions::new().with_flow_level(1)).unwrap(),
        "outer: {inner: [1, 2], name: x y}\n"
    );
}

#[test]
fn test_ambiguous_strings_are_quoted() {
    let value = yaml!(["true", "null", "~", "12", "1.5", "0x1F", "2002-12-14", "<<", "yes", "plain"]);
    assert_eq!(
        stringify(&value).unwrap(),
        "- 'true'\n- 'null'\n- '~'\n- '12'\n- '1.5'\n- '0x1F'\n- '2002-12-14'\n- '<<'\n- 'yes'\n- plain\n"
    );
    assert_eq!(
        stringify_with_options(&yaml!("yes"), &DumpOptions::new().with_no_compat_mode(true))
            .unwrap(),
        "yes\n"
    );
}

#[test]
fn test_multiline_and_escaped_strings() {
    let value = yaml!({ "script": "echo one\necho two\n", "bell": "ding\u{7}" });
    assert_eq!(
        stringify(&value).unwrap(),
        "script: |\n  echo one\n  echo two\nbell: \"ding\\a\"\n"
    );
}

#[test]
fn test_serde_structs() {
    #[derive(Serialize)]
    struct Server {
        host: String,
        port: u16,
        tls: Option<bool>,
        aliases: Vec<String>,
    }

    let server = Server {
        host: "localhost".to_string(),
        port: 8080,
        tls: None,
        aliases: vec![],
    };
    assert_eq!(
        to_string(&server).unwrap(),
        "host: localhost\nport: 8080\ntls: null\naliases: []\n"
    );
}
