//! docquill - path-addressed reading and writing of JSON and YAML documents.
//!
//! Documents are held as [`document::DocValue`] trees and addressed with
//! JSONPath-style paths such as `$.foo[2]['bar']`. Writes create any
//! missing intermediate maps and arrays along the way.
//!
//! ```
//! use docquill::document::tree::DocTree;
//!
//! let mut tree = DocTree::from_json("{ foo: 'bar' }").unwrap();
//! tree.set("$.boo[0]", "x".into()).unwrap();
//! assert_eq!(tree.to_json(), r#"{"foo":"bar","boo":["x"]}"#);
//! ```

pub mod bridge;
pub mod config;
pub mod docpath;
pub mod document;
pub mod file;
