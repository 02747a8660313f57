//! Conversion between Rust records and documents.
//!
//! Any `Serialize` type becomes a document with its fields in declaration
//! order, and any `DeserializeOwned` type can be rebuilt from one. For
//! callers that only know a type by name at runtime, [`TypeRegistry`] maps
//! names to decoders.
//!
//! # Example
//!
//! ```
//! use docquill::bridge::{from_json_str, to_json_string};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Point {
//!     y: i32,
//!     x: i32,
//! }
//!
//! let text = to_json_string(&Point { y: 2, x: 1 }).unwrap();
//! assert_eq!(text, r#"{"y":2,"x":1}"#);
//! let back: Point = from_json_str("{ y: 5, x: 6 }").unwrap();
//! assert_eq!(back.x, 6);
//! ```

use crate::document::node::DocValue;
use crate::document::parser::{parse_json, ParseError};
use crate::document::serializer::to_json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Errors raised while mapping records to and from documents.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Failed to convert record to document: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Failed to build {type_name} from document: {source}")]
    Deserialize {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("No type registered under the name '{0}'")]
    UnknownType(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Converts a record into a document.
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> Result<DocValue, BridgeError> {
    let json = serde_json::to_value(value).map_err(BridgeError::Serialize)?;
    Ok(DocValue::from(json))
}

/// Builds a record from a document.
pub fn from_document<T: DeserializeOwned>(doc: &DocValue) -> Result<T, BridgeError> {
    let json = serde_json::Value::from(doc.clone());
    serde_json::from_value(json).map_err(|source| BridgeError::Deserialize {
        type_name: std::any::type_name::<T>().to_string(),
        source,
    })
}

/// Serializes a record as compact JSON.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String, BridgeError> {
    Ok(to_json(&to_document(value)?))
}

/// Parses relaxed JSON into a record.
pub fn from_json_str<T: DeserializeOwned>(text: &str) -> Result<T, BridgeError> {
    from_document(&parse_json(text)?)
}

type Decoder = Box<dyn Fn(&DocValue) -> Result<Box<dyn Any>, BridgeError> + Send + Sync>;

/// Decoders keyed by type name.
///
/// ```
/// use docquill::bridge::TypeRegistry;
/// use docquill::document::parser::parse_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Named {
///     name: String,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Named>("Named");
///
/// let doc = parse_json("{ name: 'x' }").unwrap();
/// let any = registry.decode("Named", &doc).unwrap();
/// assert_eq!(any.downcast_ref::<Named>().unwrap().name, "x");
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    decoders: HashMap<String, Decoder>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` under `name`, replacing any earlier registration.
    pub fn register<T: DeserializeOwned + 'static>(&mut self, name: impl Into<String>) {
        let name = name.into();
        debug!(name = %name, type_name = std::any::type_name::<T>(), "registering type");
        self.decoders.insert(
            name,
            Box::new(|doc: &DocValue| {
                from_document::<T>(doc).map(|v| Box::new(v) as Box<dyn Any>)
            }),
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decoders.contains_key(name)
    }

    /// Decodes a document as the type registered under `name`.
    pub fn decode(&self, name: &str, doc: &DocValue) -> Result<Box<dyn Any>, BridgeError> {
        let decoder = self
            .decoders
            .get(name)
            .ok_or_else(|| BridgeError::UnknownType(name.to_string()))?;
        decoder(doc)
    }

    /// Parses relaxed JSON and decodes it as the type registered under `name`.
    pub fn decode_json(&self, name: &str, text: &str) -> Result<Box<dyn Any>, BridgeError> {
        self.decode(name, &parse_json(text)?)
    }
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.decoders.keys().collect();
        names.sort();
        f.debug_struct("TypeRegistry").field("types", &names).finish()
    }
}
