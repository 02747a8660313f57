//! An owned document with path-based access.
//!
//! `DocTree` holds a root value together with the format it was read from,
//! and exposes the path operations of [`super::mutator`] as methods.
//!
//! # Example
//!
//! ```
//! use docquill::document::tree::DocTree;
//!
//! let mut tree = DocTree::from_json("{ foo: 'bar', boo: [1, 2] }").unwrap();
//! tree.set("$.boo[2]", 3.into()).unwrap();
//! tree.set("$.boo[1]", 10.into()).unwrap();
//! assert_eq!(tree.to_json(), r#"{"foo":"bar","boo":[1,10,3]}"#);
//! ```

use super::mutator::{self, MutationError, SetOutcome};
use super::node::DocValue;
use super::parser::{parse_json, parse_yaml, ParseError};
use super::serializer::{to_json, to_pretty_json};

/// The text format a document was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceFormat {
    #[default]
    Json,
    Yaml,
}

/// A complete document tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocTree {
    root: DocValue,
    format: SourceFormat,
}

impl DocTree {
    /// Creates a new tree with the given root value.
    pub fn new(root: DocValue) -> Self {
        Self {
            root,
            format: SourceFormat::Json,
        }
    }

    pub fn with_format(root: DocValue, format: SourceFormat) -> Self {
        Self { root, format }
    }

    /// Parses relaxed JSON into a tree.
    pub fn from_json(text: &str) -> Result<Self, ParseError> {
        Ok(Self::new(parse_json(text)?))
    }

    /// Parses YAML into a tree.
    pub fn from_yaml(text: &str) -> Result<Self, ParseError> {
        Ok(Self::with_format(parse_yaml(text)?, SourceFormat::Yaml))
    }

    pub fn format(&self) -> SourceFormat {
        self.format
    }

    /// Returns a reference to the root value.
    pub fn root(&self) -> &DocValue {
        &self.root
    }

    /// Returns a mutable reference to the root value.
    pub fn root_mut(&mut self) -> &mut DocValue {
        &mut self.root
    }

    pub fn into_root(self) -> DocValue {
        self.root
    }

    /// Reads the value at `path`. See [`mutator::read`].
    pub fn read(&self, path: &str) -> Result<&DocValue, MutationError> {
        mutator::read(&self.root, path)
    }

    /// Reads the value at `path`, falling back to `default` when absent.
    pub fn read_or(&self, path: &str, default: DocValue) -> Result<DocValue, MutationError> {
        mutator::read_or(&self.root, path, default)
    }

    /// Writes `value` at `path`. See [`mutator::set`].
    pub fn set(&mut self, path: &str, value: DocValue) -> Result<SetOutcome, MutationError> {
        mutator::set(&mut self.root, path, value)
    }

    /// Appends `value` to the array at `path`.
    pub fn append(&mut self, path: &str, value: DocValue) -> Result<SetOutcome, MutationError> {
        mutator::append(&mut self.root, path, value)
    }

    /// Removes and returns the value at `path`.
    pub fn remove(&mut self, path: &str) -> Result<DocValue, MutationError> {
        mutator::remove(&mut self.root, path)
    }

    /// Compact JSON text of the whole document.
    pub fn to_json(&self) -> String {
        to_json(&self.root)
    }

    /// Indented JSON text of the whole document.
    pub fn to_pretty_json(&self, indent_size: usize) -> String {
        to_pretty_json(&self.root, indent_size)
    }
}

impl From<DocValue> for DocTree {
    fn from(root: DocValue) -> Self {
        Self::new(root)
    }
}
