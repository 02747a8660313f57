//! JSON and YAML text output for documents.
//!
//! Object entries are written in insertion order, so serializing the same
//! document always yields the same bytes.

use super::node::{DocNumber, DocValue};
use anyhow::{Context, Result};

/// Serializes a document as compact JSON with no insignificant whitespace.
///
/// # Example
///
/// ```
/// use docquill::document::parser::parse_json;
/// use docquill::document::serializer::to_json;
///
/// let doc = parse_json("{ foo: 'bar', n: [1, 2] }").unwrap();
/// assert_eq!(to_json(&doc), r#"{"foo":"bar","n":[1,2]}"#);
/// ```
pub fn to_json(value: &DocValue) -> String {
    let mut out = String::new();
    write_compact(value, &mut out);
    out
}

/// Serializes a document as indented JSON ending with a newline.
///
/// Every value sits on its own line and each nesting level adds
/// `indent_size` spaces. Empty containers stay inline as `{}` and `[]`.
pub fn to_pretty_json(value: &DocValue, indent_size: usize) -> String {
    let mut out = serialize_node(value, indent_size, 0);
    out.push('\n');
    out
}

/// Serializes a document as YAML.
pub fn to_yaml(value: &DocValue) -> Result<String> {
    let json = serde_json::Value::from(value.clone());
    serde_yaml::to_string(&json).context("Failed to serialize YAML")
}

/// Serializes a node with the given indentation at `current_depth`.
pub fn serialize_node(value: &DocValue, indent_size: usize, current_depth: usize) -> String {
    let indent = " ".repeat(indent_size * current_depth);
    let next_indent = " ".repeat(indent_size * (current_depth + 1));

    match value {
        DocValue::Object(entries) => {
            if entries.is_empty() {
                return "{}".to_string();
            }

            let mut result = "{\n".to_string();
            for (i, (key, child)) in entries.iter().enumerate() {
                result.push_str(&next_indent);
                result.push_str(&format!("\"{}\": ", escape_json_string(key)));
                result.push_str(&serialize_node(child, indent_size, current_depth + 1));
                if i < entries.len() - 1 {
                    result.push(',');
                }
                result.push('\n');
            }
            result.push_str(&indent);
            result.push('}');
            result
        }
        DocValue::Array(elements) => {
            if elements.is_empty() {
                return "[]".to_string();
            }

            let mut result = "[\n".to_string();
            for (i, element) in elements.iter().enumerate() {
                result.push_str(&next_indent);
                result.push_str(&serialize_node(element, indent_size, current_depth + 1));
                if i < elements.len() - 1 {
                    result.push(',');
                }
                result.push('\n');
            }
            result.push_str(&indent);
            result.push(']');
            result
        }
        scalar => serialize_scalar(scalar),
    }
}

fn write_compact(value: &DocValue, out: &mut String) {
    match value {
        DocValue::Object(entries) => {
            out.push('{');
            for (i, (key, child)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push('"');
                out.push_str(&escape_json_string(key));
                out.push_str("\":");
                write_compact(child, out);
            }
            out.push('}');
        }
        DocValue::Array(elements) => {
            out.push('[');
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_compact(element, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&serialize_scalar(scalar)),
    }
}

fn serialize_scalar(value: &DocValue) -> String {
    match value {
        DocValue::String(s) => format!("\"{}\"", escape_json_string(s)),
        DocValue::Number(DocNumber::Integer(i)) => i.to_string(),
        DocValue::Number(DocNumber::Unsigned(u)) => u.to_string(),
        DocValue::Number(DocNumber::Float(f)) => serde_json::Number::from_f64(*f)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "null".to_string()),
        DocValue::Boolean(b) => b.to_string(),
        DocValue::Null => "null".to_string(),
        DocValue::Object(_) | DocValue::Array(_) => to_json(value),
    }
}

pub(crate) fn escape_json_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\x08' => result.push_str("\\b"),
            '\x0C' => result.push_str("\\f"),
            c if c.is_control() => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::{parse_json, parse_yaml};

    #[test]
    fn test_compact_scalars() {
        assert_eq!(to_json(&DocValue::Null), "null");
        assert_eq!(to_json(&DocValue::from(true)), "true");
        assert_eq!(to_json(&DocValue::from(-3)), "-3");
        assert_eq!(to_json(&DocValue::from(1.5)), "1.5");
        assert_eq!(to_json(&DocValue::from(f64::INFINITY)), "null");
        assert_eq!(
            to_json(&DocValue::Number(DocNumber::Unsigned(u64::MAX))),
            "18446744073709551615"
        );
    }

    #[test]
    fn test_escaping() {
        let doc = DocValue::from("Say \"hi\"\n\tback\\slash\u{1}");
        assert_eq!(to_json(&doc), r#""Say \"hi\"\n\tback\\slash\u0001""#);
    }

    #[test]
    fn test_compact_round_trips_through_serde() {
        let text = r#"{"a":[1,2.5,{"b":null}],"c":"d","e":{}}"#;
        let doc = parse_json(text).unwrap();
        assert_eq!(to_json(&doc), text);
    }

    #[test]
    fn test_pretty_empty_containers() {
        let doc = parse_json(r#"{"a":{},"b":[]}"#).unwrap();
        assert_eq!(to_pretty_json(&doc, 2), "{\n  \"a\": {},\n  \"b\": []\n}\n");
    }

    #[test]
    fn test_pretty_custom_indent() {
        let doc = parse_json(r#"{"a":[1]}"#).unwrap();
        assert_eq!(
            to_pretty_json(&doc, 4),
            "{\n    \"a\": [\n        1\n    ]\n}\n"
        );
    }

    #[test]
    fn test_pretty_is_deterministic() {
        let doc = parse_json("{ z: 1, a: [true, { m: 'n' }] }").unwrap();
        assert_eq!(to_pretty_json(&doc, 2), to_pretty_json(&doc, 2));
    }

    #[test]
    fn test_yaml_output_parses_back() {
        let doc = parse_json("{ hello: 25, list: ['a', 'b'] }").unwrap();
        let yaml = to_yaml(&doc).unwrap();
        assert_eq!(parse_yaml(&yaml).unwrap(), doc);
    }
}
