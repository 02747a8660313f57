//! File I/O for documents.
//!
//! Loading reads JSON or YAML from disk, a reader or stdin (optionally
//! gzipped). Saving writes pretty JSON or YAML atomically, with an optional
//! backup of the previous file.

pub mod loader;
pub mod saver;
