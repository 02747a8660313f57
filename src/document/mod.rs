//! Document model, parsing, serialization and path-addressed mutation.

pub mod mutator;
pub mod node;
pub mod parser;
pub mod serializer;
pub mod tree;
pub mod xml;

pub use mutator::{MutationError, SetOutcome};
pub use node::{DocNumber, DocValue};
pub use parser::ParseError;
pub use tree::{DocTree, SourceFormat};
