//! XML rendering of documents.
//!
//! Each object entry becomes an element named after its key. Arrays repeat
//! the enclosing element once per item, and `null` (as well as empty
//! containers) renders as a self-closing element. The whole document is
//! wrapped in `<root>`; when the root is an array its items become `<item>`
//! children.

use super::node::DocValue;
use super::serializer::to_json;
use std::borrow::Cow;

/// Renders a document as an XML string without declaration or whitespace.
///
/// # Example
///
/// ```
/// use docquill::document::parser::parse_json;
/// use docquill::document::xml::to_xml;
///
/// let doc = parse_json("{ bar: 1, baz: null, tags: ['a', 'b'] }").unwrap();
/// assert_eq!(
///     to_xml(&doc),
///     "<root><bar>1</bar><baz/><tags>a</tags><tags>b</tags></root>"
/// );
/// ```
pub fn to_xml(value: &DocValue) -> String {
    let mut out = String::new();
    match value {
        DocValue::Array(items) if !items.is_empty() => {
            out.push_str("<root>");
            for item in items {
                write_element("item", item, &mut out);
            }
            out.push_str("</root>");
        }
        other => write_element("root", other, &mut out),
    }
    out
}

fn write_element(name: &str, value: &DocValue, out: &mut String) {
    let tag = element_name(name);
    match value {
        DocValue::Null => empty_element(&tag, out),
        DocValue::Object(entries) if entries.is_empty() => empty_element(&tag, out),
        DocValue::Array(items) if items.is_empty() => empty_element(&tag, out),
        DocValue::Object(entries) => {
            out.push('<');
            out.push_str(&tag);
            out.push('>');
            for (key, child) in entries {
                write_element(key, child, out);
            }
            close_element(&tag, out);
        }
        DocValue::Array(items) => {
            for item in items {
                write_element(name, item, out);
            }
        }
        scalar => {
            out.push('<');
            out.push_str(&tag);
            out.push('>');
            let text = match scalar {
                DocValue::String(s) => Cow::Borrowed(s.as_str()),
                other => Cow::Owned(to_json(other)),
            };
            out.push_str(&encode_text(&text));
            close_element(&tag, out);
        }
    }
}

fn empty_element(tag: &str, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push_str("/>");
}

fn close_element(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Escapes XML special characters in text content.
fn encode_text(input: &str) -> Cow<'_, str> {
    if !input
        .bytes()
        .any(|b| matches!(b, b'<' | b'>' | b'&' | b'"' | b'\''))
    {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + 16);
    for c in input.chars() {
        match c {
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '&' => result.push_str("&amp;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            _ => result.push(c),
        }
    }
    Cow::Owned(result)
}

/// Maps an object key onto a valid XML element name.
///
/// Characters outside the XML name set become `_`, and a name that cannot
/// start an element gets a leading `_`.
fn element_name(key: &str) -> Cow<'_, str> {
    let is_name_char =
        |c: char| c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ':') || !c.is_ascii();
    let starts_ok = key
        .chars()
        .next()
        .map(|c| c.is_alphabetic() || c == '_' || c == ':' || !c.is_ascii())
        .unwrap_or(false);

    if starts_ok && key.chars().all(is_name_char) {
        return Cow::Borrowed(key);
    }

    let mut name: String = key
        .chars()
        .map(|c| if is_name_char(c) { c } else { '_' })
        .collect();
    if !starts_ok {
        name.insert(0, '_');
    }
    Cow::Owned(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parser::parse_json;

    #[test]
    fn test_nested_objects_and_arrays() {
        let doc = parse_json(
            r#"{"bar":1,"foo":"testFoo","baz":null,"ban":[{"bar":0,"foo":"p1","baz":null,"ban":null},{"bar":0,"foo":"p2","baz":null,"ban":null}]}"#,
        )
        .unwrap();
        assert_eq!(
            to_xml(&doc),
            "<root><bar>1</bar><foo>testFoo</foo><baz/><ban><bar>0</bar><foo>p1</foo><baz/><ban/></ban><ban><bar>0</bar><foo>p2</foo><baz/><ban/></ban></root>"
        );
    }

    #[test]
    fn test_escapes_text() {
        let doc = parse_json(r#"{"a":"x < y & 'z'"}"#).unwrap();
        assert_eq!(
            to_xml(&doc),
            "<root><a>x &lt; y &amp; &apos;z&apos;</a></root>"
        );
    }

    #[test]
    fn test_root_array_uses_item_elements() {
        let doc = parse_json("[1, 2]").unwrap();
        assert_eq!(to_xml(&doc), "<root><item>1</item><item>2</item></root>");
    }

    #[test]
    fn test_scalar_root_and_empty_containers() {
        assert_eq!(to_xml(&DocValue::from("hi")), "<root>hi</root>");
        let doc = parse_json(r#"{"a":{},"b":[]}"#).unwrap();
        assert_eq!(to_xml(&doc), "<root><a/><b/></root>");
    }

    #[test]
    fn test_invalid_element_names_are_sanitized() {
        let doc = parse_json(r#"{"spa cey":true,"1st":false}"#).unwrap();
        assert_eq!(
            to_xml(&doc),
            "<root><spa_cey>true</spa_cey><_1st>false</_1st></root>"
        );
    }
}
