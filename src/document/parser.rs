//! Parsing JSON and YAML text into documents.
//!
//! Parsing itself is delegated: `serde_json` reads strict JSON, `json5`
//! reads the relaxed dialect with unquoted keys and single-quoted strings,
//! and `serde_yaml` reads YAML.
//!
//! # Example
//!
//! ```
//! use docquill::document::parser::parse_json;
//!
//! let relaxed = parse_json("{ foo: 'bar' }").unwrap();
//! let strict = parse_json(r#"{"foo":"bar"}"#).unwrap();
//! assert_eq!(relaxed, strict);
//! ```

use super::node::{DocNumber, DocValue};
use indexmap::IndexMap;
use serde_yaml::Value as YamlValue;
use thiserror::Error;
use tracing::trace;

/// Failure reported by an underlying parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to parse {format}: {message}")]
pub struct ParseError {
    /// "JSON" or "YAML"
    pub format: &'static str,
    pub message: String,
}

impl ParseError {
    fn json(err: impl std::fmt::Display) -> Self {
        Self {
            format: "JSON",
            message: err.to_string(),
        }
    }

    fn yaml(err: impl std::fmt::Display) -> Self {
        Self {
            format: "YAML",
            message: err.to_string(),
        }
    }
}

/// Parses JSON, accepting unquoted keys and single-quoted strings.
///
/// Strict JSON is tried first; text that fails it is re-read as JSON5.
///
/// # Errors
///
/// Returns a [`ParseError`] if the text is neither strict nor relaxed JSON.
///
/// ```
/// use docquill::document::parser::parse_json;
///
/// assert!(parse_json(r#"{"unclosed": "#).is_err());
/// ```
pub fn parse_json(text: &str) -> Result<DocValue, ParseError> {
    let strict_err = match parse_json_strict(text) {
        Ok(value) => return Ok(value),
        Err(err) => err,
    };

    trace!(error = %strict_err, "strict JSON parse failed, retrying as JSON5");
    let value: serde_json::Value = json5::from_str(text).map_err(ParseError::json)?;
    Ok(DocValue::from(value))
}

/// Parses standard JSON only.
pub fn parse_json_strict(text: &str) -> Result<DocValue, ParseError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(ParseError::json)?;
    Ok(DocValue::from(value))
}

/// Parses a YAML document.
pub fn parse_yaml(text: &str) -> Result<DocValue, ParseError> {
    let value: YamlValue = serde_yaml::from_str(text).map_err(ParseError::yaml)?;
    Ok(from_yaml_value(value))
}

/// Converts a `serde_yaml::Value` into a document.
///
/// Non-string mapping keys are rendered as text; tags are dropped and the
/// tagged value kept.
pub fn from_yaml_value(value: YamlValue) -> DocValue {
    match value {
        YamlValue::Null => DocValue::Null,
        YamlValue::Bool(b) => DocValue::Boolean(b),
        YamlValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                DocValue::Number(DocNumber::Integer(i))
            } else if let Some(u) = n.as_u64() {
                DocValue::Number(DocNumber::Unsigned(u))
            } else {
                DocValue::Number(DocNumber::Float(n.as_f64().unwrap_or(0.0)))
            }
        }
        YamlValue::String(s) => DocValue::String(s),
        YamlValue::Sequence(items) => {
            DocValue::Array(items.into_iter().map(from_yaml_value).collect())
        }
        YamlValue::Mapping(mapping) => {
            let entries: IndexMap<String, DocValue> = mapping
                .into_iter()
                .map(|(k, v)| (yaml_key_to_string(k), from_yaml_value(v)))
                .collect();
            DocValue::Object(entries)
        }
        YamlValue::Tagged(tagged) => from_yaml_value(tagged.value),
    }
}

fn yaml_key_to_string(key: YamlValue) -> String {
    match key {
        YamlValue::String(s) => s,
        YamlValue::Null => "null".to_string(),
        YamlValue::Bool(b) => b.to_string(),
        YamlValue::Number(n) => n.to_string(),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
