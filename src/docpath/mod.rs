//! Document path parsing and parent/leaf decomposition.
//!
//! Paths address a single location inside a document and drive the
//! read and write operations in [`crate::document::mutator`].
//!
//! # Supported Syntax
//!
//! - `$` - Root node
//! - `.property` - Named property access
//! - `['property']` or `["property"]` - Bracket notation
//! - `[index]` - Array index (non-negative)
//!
//! # Examples
//!
//! ```
//! use docquill::docpath::split_parent_and_leaf;
//!
//! let (parent, leaf) = split_parent_and_leaf("$.foo[2].bar[0]").unwrap();
//! assert_eq!(parent, "$.foo[2]");
//! assert_eq!(leaf, "bar[0]");
//! ```

pub mod ast;
pub mod error;
pub mod parser;

pub use ast::{DocPath, Leaf, PathSplit, Segment};
pub use error::PathError;
pub use parser::Parser;

/// Splits path text into `(parent, leaf)` text.
///
/// Splitting `$` yields `("", "$")`.
pub fn split_parent_and_leaf(path: &str) -> Result<(String, String), PathError> {
    Ok(match Parser::parse(path)?.split() {
        Some(split) => (split.parent.to_string(), split.leaf.to_string()),
        None => (String::new(), "$".to_string()),
    })
}
