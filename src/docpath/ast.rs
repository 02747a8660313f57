//! Abstract syntax tree types for document path expressions.

use super::error::PathError;
use super::parser::Parser;
use std::fmt;
use std::str::FromStr;

/// A segment in a document path expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Root node ($)
    Root,
    /// Bareword property (.property)
    DotKey(String),
    /// Quoted property (['property'] or ["property"])
    BracketKey(String),
    /// Array index ([0])
    Index(usize),
}

impl Segment {
    /// Returns the property name for key segments.
    pub fn key(&self) -> Option<&str> {
        match self {
            Segment::DotKey(name) | Segment::BracketKey(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the position for index segments.
    pub fn index(&self) -> Option<usize> {
        match self {
            Segment::Index(i) => Some(*i),
            _ => None,
        }
    }

    pub fn is_key(&self) -> bool {
        matches!(self, Segment::DotKey(_) | Segment::BracketKey(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Root => write!(f, "$"),
            Segment::DotKey(name) if is_identifier(name) => write!(f, ".{}", name),
            Segment::DotKey(name) | Segment::BracketKey(name) => {
                write!(f, "['{}']", escape_quoted(name))
            }
            Segment::Index(i) => write!(f, "[{}]", i),
        }
    }
}

/// Characters allowed in a bareword property name.
pub(crate) fn is_identifier_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '-'
}

/// Whether `name` can be rendered as a dot segment and parsed back.
pub(crate) fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(is_identifier_char)
}

/// Escapes a property name for single-quoted bracket rendering.
fn escape_quoted(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

/// A complete document path expression.
///
/// The first segment is always [`Segment::Root`]; a path holding only the
/// root addresses the whole document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    /// Segments that make up the path.
    pub segments: Vec<Segment>,
}

impl DocPath {
    /// Creates a new path with the given segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Parses path text such as `$.foo[0]`.
    pub fn parse(text: &str) -> Result<Self, PathError> {
        Parser::parse(text)
    }

    /// The path consisting of just `$`.
    pub fn root() -> Self {
        Self {
            segments: vec![Segment::Root],
        }
    }

    /// Segments after the root marker.
    pub fn steps(&self) -> &[Segment] {
        match self.segments.first() {
            Some(Segment::Root) => &self.segments[1..],
            _ => &self.segments,
        }
    }

    pub fn is_root(&self) -> bool {
        self.steps().is_empty()
    }

    /// Appends a dot key (builder style).
    pub fn key(mut self, name: impl Into<String>) -> Self {
        self.segments.push(Segment::DotKey(name.into()));
        self
    }

    /// Appends an index (builder style).
    pub fn index(mut self, idx: usize) -> Self {
        self.segments.push(Segment::Index(idx));
        self
    }

    /// Splits the path into the parent path and the leaf.
    ///
    /// The leaf is the last key segment together with every index segment
    /// that follows it, so `$.foo[2].bar[0]` splits into `$.foo[2]` and
    /// `bar[0]`. When no key precedes the trailing indices (`$[1]`), the
    /// leaf is the bare index run and the parent is the root. The root path
    /// itself has no parent and returns `None`.
    pub fn split(&self) -> Option<PathSplit> {
        let steps = self.steps();
        if steps.is_empty() {
            return None;
        }

        let mut start = steps.len();
        while start > 0 && matches!(steps[start - 1], Segment::Index(_)) {
            start -= 1;
        }
        let indices: Vec<usize> = steps[start..].iter().filter_map(Segment::index).collect();

        let (key_pos, leaf) = if start > 0 {
            let key = steps[start - 1].clone();
            (start - 1, Leaf::Key { key, indices })
        } else {
            (0, Leaf::Elements(indices))
        };

        let mut parent = vec![Segment::Root];
        parent.extend_from_slice(&steps[..key_pos]);

        Some(PathSplit {
            parent: DocPath::new(parent),
            leaf,
        })
    }
}

impl FromStr for DocPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Parser::parse(s)
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in self.steps() {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// The final addressed part of a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    /// A key, optionally followed by index segments (`bar`, `['bar'][0]`).
    Key { key: Segment, indices: Vec<usize> },
    /// Index segments applied directly to the parent (`[1]` in `$[1]`).
    Elements(Vec<usize>),
}

impl Leaf {
    /// Trailing index segments of the leaf.
    pub fn indices(&self) -> &[usize] {
        match self {
            Leaf::Key { indices, .. } | Leaf::Elements(indices) => indices,
        }
    }

    /// Segments of the leaf in path order.
    pub fn segments(&self) -> Vec<Segment> {
        match self {
            Leaf::Key { key, indices } => std::iter::once(key.clone())
                .chain(indices.iter().map(|i| Segment::Index(*i)))
                .collect(),
            Leaf::Elements(indices) => indices.iter().map(|i| Segment::Index(*i)).collect(),
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // The leaf is rendered on its own, so a dot key drops its dot.
            Leaf::Key {
                key: Segment::DotKey(name),
                ..
            } if is_identifier(name) => write!(f, "{}", name)?,
            Leaf::Key { key, .. } => write!(f, "{}", key)?,
            Leaf::Elements(_) => {}
        }
        for i in self.indices() {
            write!(f, "[{}]", i)?;
        }
        Ok(())
    }
}

/// A path decomposed into its parent and leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSplit {
    pub parent: DocPath,
    pub leaf: Leaf,
}

impl PathSplit {
    /// Rebuilds the full path from the two halves.
    pub fn join(&self) -> DocPath {
        let mut segments = self.parent.segments.clone();
        segments.extend(self.leaf.segments());
        DocPath::new(segments)
    }
}
