//! Integration tests for splitting paths into parent and leaf.

use docquill::docpath::{split_parent_and_leaf, DocPath, Parser, PathError};

fn split(path: &str) -> (String, String) {
    split_parent_and_leaf(path).unwrap()
}

fn pair(parent: &str, leaf: &str) -> (String, String) {
    (parent.to_string(), leaf.to_string())
}

#[test]
fn test_split_root() {
    assert_eq!(split("$"), pair("", "$"));
}

#[test]
fn test_split_keys() {
    assert_eq!(split("$.foo"), pair("$", "foo"));
    assert_eq!(split("$['foo']"), pair("$", "['foo']"));
    assert_eq!(split("$.foo.bar"), pair("$.foo", "bar"));
    assert_eq!(split("$.foo['bar']"), pair("$.foo", "['bar']"));
}

#[test]
fn test_split_keeps_trailing_index_on_leaf() {
    assert_eq!(split("$.foo.bar[0]"), pair("$.foo", "bar[0]"));
    assert_eq!(split("$.foo['bar'][0]"), pair("$.foo", "['bar'][0]"));
    assert_eq!(split("$.foo[2].bar[0]"), pair("$.foo[2]", "bar[0]"));
    assert_eq!(split("$.foo[2]['bar'][0]"), pair("$.foo[2]", "['bar'][0]"));
}

#[test]
fn test_split_after_indexed_parent() {
    assert_eq!(split("$.foo[2].bar"), pair("$.foo[2]", "bar"));
    assert_eq!(split("$.foo[2]['bar']"), pair("$.foo[2]", "['bar']"));
}

#[test]
fn test_split_root_array() {
    assert_eq!(split("$[1]"), pair("$", "[1]"));
    assert_eq!(split("$[0][2]"), pair("$", "[0][2]"));
}

#[test]
fn test_split_fuses_chained_indices() {
    assert_eq!(split("$.a[0][1]"), pair("$", "a[0][1]"));
}

#[test]
fn test_split_join_round_trip() {
    let paths = [
        "$.foo",
        "$['foo']",
        "$.foo.bar[0]",
        "$.foo['bar'][0]",
        "$.foo[2].bar[0]",
        "$.foo[2]['bar']",
        "$[1]",
        "$.a[0][1]",
        "$['it\\'s'].x",
    ];
    for text in paths {
        let path = Parser::parse(text).unwrap();
        let split = path.split().unwrap();
        assert_eq!(split.join(), path, "round trip of {}", text);

        let (parent, leaf) = split_parent_and_leaf(text).unwrap();
        let rejoined = if leaf.starts_with('[') {
            format!("{}{}", parent, leaf)
        } else {
            format!("{}.{}", parent, leaf)
        };
        assert_eq!(Parser::parse(&rejoined).unwrap(), path, "rejoin of {}", text);
    }
}

#[test]
fn test_whitespace_is_ignored() {
    assert_eq!(
        Parser::parse("$ . foo [ 2 ]").unwrap(),
        DocPath::root().key("foo").index(2)
    );
}

#[test]
fn test_malformed_paths() {
    for text in ["", "foo", "$.", "$[", "$[-1]", "$[x]", "$['open", "$..foo", "$[*]"] {
        assert!(Parser::parse(text).is_err(), "{} should not parse", text);
    }
    assert!(matches!(
        split_parent_and_leaf("$.foo["),
        Err(PathError::UnexpectedEnd { .. })
    ));
}

#[test]
fn test_path_from_str() {
    let path: DocPath = "$.foo['bar'][0]".parse().unwrap();
    assert_eq!(path, DocPath::parse("$.foo['bar'][0]").unwrap());
    assert_eq!(path.to_string(), "$.foo['bar'][0]");
}
