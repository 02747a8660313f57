//! Integration tests for parsing, path reads and writes, and printing.

use docquill::document::mutator::{read, set};
use docquill::document::node::DocValue;
use docquill::document::parser::{parse_json, parse_yaml};
use docquill::document::serializer::{to_json, to_pretty_json};
use docquill::document::tree::DocTree;
use docquill::document::{MutationError, SetOutcome};

#[test]
fn test_non_strict_json_parsing() {
    let doc = parse_json("{ foo: 'bar' }").unwrap();
    assert_eq!(read(&doc, "$.foo").unwrap().as_str(), Some("bar"));
    assert_eq!(doc, parse_json(r#"{"foo":"bar"}"#).unwrap());
}

#[test]
fn test_json_array_as_root() {
    let doc = parse_json("[1, 2, 3]").unwrap();
    assert_eq!(read(&doc, "$[1]").unwrap().as_i64(), Some(2));
}

#[test]
fn test_json_chunk_by_path() {
    let doc = parse_json("[{ foo: 'bar' }]").unwrap();
    let chunk = read(&doc, "$[0]").unwrap();
    assert_eq!(to_json(chunk), r#"{"foo":"bar"}"#);
}

#[test]
fn test_nested_read() {
    let doc = parse_json("{ foo: 'bar', baz: { hello: 'world' } }").unwrap();
    assert_eq!(read(&doc, "$.baz.hello").unwrap().as_str(), Some("world"));
}

#[test]
fn test_set_by_path() {
    let raw = "{ foo: 'bar' }";

    let mut doc = parse_json(raw).unwrap();
    set(&mut doc, "$.foo", "baz".into()).unwrap();
    assert_eq!(to_json(&doc), r#"{"foo":"baz"}"#);

    let temp = parse_json("{ baz: 'but' }").unwrap();
    set(&mut doc, "$.foo", temp.clone()).unwrap();
    assert_eq!(to_json(&doc), r#"{"foo":{"baz":"but"}}"#);

    set(&mut doc, "$.boo", temp).unwrap();
    assert_eq!(to_json(&doc), r#"{"foo":{"baz":"but"},"boo":{"baz":"but"}}"#);

    let mut doc = parse_json(raw).unwrap();
    set(&mut doc, "$.boo", parse_json("[1, 2]").unwrap()).unwrap();
    assert_eq!(to_json(&doc), r#"{"foo":"bar","boo":[1,2]}"#);

    set(&mut doc, "$.boo[2]", 3.into()).unwrap();
    assert_eq!(to_json(&doc), r#"{"foo":"bar","boo":[1,2,3]}"#);

    set(&mut doc, "$.boo[1]", 10.into()).unwrap();
    assert_eq!(to_json(&doc), r#"{"foo":"bar","boo":[1,10,3]}"#);

    let mut doc = parse_json(raw).unwrap();
    set(&mut doc, "$.boo[0]", 3.into()).unwrap();
    assert_eq!(to_json(&doc), r#"{"foo":"bar","boo":[3]}"#);

    let mut doc = parse_json("[{ foo: 'bar'}]").unwrap();
    set(&mut doc, "$[1]", parse_json("{ foo: 'baz' }").unwrap()).unwrap();
    assert_eq!(to_json(&doc), r#"[{"foo":"bar"},{"foo":"baz"}]"#);
}

#[test]
fn test_read_after_write_with_vivification() {
    let mut tree = DocTree::from_json("{}").unwrap();
    tree.set("$.a.b[1].c", true.into()).unwrap();
    assert_eq!(tree.to_json(), r#"{"a":{"b":[null,{"c":true}]}}"#);
    assert_eq!(tree.read("$.a.b[1].c").unwrap(), &DocValue::Boolean(true));
}

#[test]
fn test_read_after_write_across_paths() {
    let cases = [
        ("{ foo: 'bar' }", "$.boo", "{ baz: 'but' }"),
        ("{ foo: 'bar' }", "$.foo", "'baz'"),
        ("{ boo: [1, 2] }", "$.boo[2]", "3"),
        ("{ boo: [1, 2, 3] }", "$.boo[1]", "10"),
        ("{ foo: 'bar' }", "$.boo[0]", "3"),
        ("{ boo: [] }", "$.boo[3]", "'padded'"),
        ("[{ foo: 'bar' }]", "$[1]", "{ foo: 'baz' }"),
        ("[{ foo: 'bar' }]", "$[0]", "null"),
        ("{}", "$['spa cey']", "[1, 2]"),
        ("{}", "$.a[0][1]", "true"),
        ("{ a: [[5]] }", "$.a[0][0]", "6"),
        ("{}", "$.foo[2].bar[0]", "'deep'"),
        ("{ foo: [{}, {}, { bar: [1] }] }", "$.foo[2].bar[0]", "2"),
        ("null", "$.x", "1"),
        ("{ a: 1 }", "$", "[1, 2]"),
    ];

    for (text, path, value) in cases {
        let mut doc = parse_json(text).unwrap();
        let value = parse_json(value).unwrap();
        set(&mut doc, path, value.clone()).unwrap();
        assert_eq!(read(&doc, path).unwrap(), &value, "{} on {}", path, text);
    }
}

#[test]
fn test_far_out_of_range_write_is_rejected() {
    let paths = [
        "$.boo[4000000000]",
        "$.boo[18446744073709551615]",
        "$.x[18446744073709551615].y",
    ];
    for path in paths {
        let mut doc = parse_json("{ boo: [1] }").unwrap();
        let err = set(&mut doc, path, 1.into()).unwrap_err();
        assert!(
            matches!(err, MutationError::IndexOutOfRange { .. }),
            "{}: {:?}",
            path,
            err
        );
        assert_eq!(to_json(&doc), r#"{"boo":[1]}"#);
    }
}

#[test]
fn test_write_through_scalar_is_rejected() {
    let mut tree = DocTree::from_json("{ foo: 'bar' }").unwrap();
    let err = tree.set("$.foo.x", 1.into()).unwrap_err();
    assert!(matches!(err, MutationError::TypeMismatch { .. }));
    assert_eq!(tree.to_json(), r#"{"foo":"bar"}"#);
}

#[test]
fn test_missing_read_reports_path() {
    let tree = DocTree::from_json("{ foo: { bar: 1 } }").unwrap();
    match tree.read("$.foo.baz.qux") {
        Err(MutationError::PathNotFound { path }) => assert_eq!(path, "$.foo.baz"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_malformed_path_is_reported() {
    let mut tree = DocTree::from_json("{}").unwrap();
    assert!(matches!(
        tree.set("foo", 1.into()),
        Err(MutationError::MalformedPath(_))
    ));
}

#[test]
fn test_set_root() {
    let mut tree = DocTree::from_json("{ a: 1 }").unwrap();
    assert_eq!(
        tree.set("$", DocValue::from(vec![1, 2])).unwrap(),
        SetOutcome::RootReplaced
    );
    assert_eq!(tree.to_json(), "[1,2]");
}

#[test]
fn test_parsing_yaml() {
    let doc = parse_yaml("hello: 25").unwrap();
    assert_eq!(to_json(&doc), r#"{"hello":25}"#);
}

#[test]
fn test_yaml_to_mutation() {
    let yaml = r#"
name: createUser
request:
  method: post
  fields:
    - id
    - name
    - notes
    - deleted
response:
  status: 200
"#;
    let doc = parse_yaml(yaml).unwrap();
    assert!(to_json(&doc).contains(r#"["id","name","notes","deleted"]"#));
}

#[test]
fn test_pretty_print() {
    let raw = "{ foo: 'bar', baz: null, 'spa cey': [1, 2, 3], bool: true, nest: { a: 'b', 'hy-phen': 'blah' } }";
    let doc = parse_json(raw).unwrap();
    let expected = "{\n".to_string()
        + "  \"foo\": \"bar\",\n"
        + "  \"baz\": null,\n"
        + "  \"spa cey\": [\n"
        + "    1,\n"
        + "    2,\n"
        + "    3\n"
        + "  ],\n"
        + "  \"bool\": true,\n"
        + "  \"nest\": {\n"
        + "    \"a\": \"b\",\n"
        + "    \"hy-phen\": \"blah\"\n"
        + "  }\n"
        + "}\n";
    assert_eq!(to_pretty_json(&doc, 2), expected);
}
