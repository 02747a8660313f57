//! Path-addressed reads and writes on documents.
//!
//! Reads are strict: any missing key or index fails with
//! [`MutationError::PathNotFound`]. Writes create whatever intermediate
//! structure is missing: an absent or `null` slot becomes an empty object,
//! or an empty array when the next step is an index. A write only fails
//! when an existing value is in the way ([`MutationError::TypeMismatch`])
//! or an index would pad an array by more than [`MAX_PADDING`] nulls
//! ([`MutationError::IndexOutOfRange`]). Either way the document is left
//! untouched.
//!
//! # Example
//!
//! ```
//! use docquill::document::mutator::{read, set};
//! use docquill::document::parser::parse_json;
//! use docquill::document::serializer::to_json;
//!
//! let mut doc = parse_json("{ foo: 'bar' }").unwrap();
//! set(&mut doc, "$.boo[0]", 3.into()).unwrap();
//! assert_eq!(to_json(&doc), r#"{"foo":"bar","boo":[3]}"#);
//! assert_eq!(read(&doc, "$.boo[0]").unwrap().as_i64(), Some(3));
//! ```

use super::node::DocValue;
use crate::docpath::{DocPath, Leaf, Parser, PathError, Segment};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors raised by document reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The path text could not be parsed.
    #[error(transparent)]
    MalformedPath(#[from] PathError),
    /// A read reached a key or index that does not exist.
    #[error("Path not found: {path}")]
    PathNotFound { path: String },
    /// A write met an existing value of the wrong kind.
    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    /// A write index lies further past the end of an array than
    /// [`MAX_PADDING`] allows.
    #[error("Index {index} at {path} is too far past the end of the array (length {len})")]
    IndexOutOfRange {
        path: String,
        index: usize,
        len: usize,
    },
}

/// Largest number of `null`s a single write may pad an array with.
pub const MAX_PADDING: usize = 1 << 16;

/// What a successful write did to the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The root was modified in place.
    Updated,
    /// The root value itself was replaced, either because the path was `$`
    /// or because a `null` root had to become a container.
    RootReplaced,
}

/// Reads the value at `path`.
pub fn read<'a>(root: &'a DocValue, path: &str) -> Result<&'a DocValue, MutationError> {
    read_path(root, &Parser::parse(path)?)
}

/// Reads the value at a parsed path.
pub fn read_path<'a>(root: &'a DocValue, path: &DocPath) -> Result<&'a DocValue, MutationError> {
    let mut current = root;
    let mut walked = DocPath::root();
    for segment in path.steps() {
        walked.segments.push(segment.clone());
        current = child(current, segment).ok_or_else(|| MutationError::PathNotFound {
            path: walked.to_string(),
        })?;
    }
    Ok(current)
}

/// Reads the value at `path`, or returns `default` if it does not exist.
///
/// Malformed paths are still reported as errors.
pub fn read_or(root: &DocValue, path: &str, default: DocValue) -> Result<DocValue, MutationError> {
    match read(root, path) {
        Ok(value) => Ok(value.clone()),
        Err(MutationError::PathNotFound { .. }) => Ok(default),
        Err(err) => Err(err),
    }
}

/// Writes `value` at `path`, creating missing structure on the way.
///
/// For a leaf of the form `key[n]`, `key` is made to hold an array (an
/// absent or non-array value is replaced by one). The element at `n` is
/// then overwritten if it exists; otherwise the array is padded with
/// `null` up to `n` and `value` appended, so `n == len` is a plain append.
pub fn set(root: &mut DocValue, path: &str, value: DocValue) -> Result<SetOutcome, MutationError> {
    set_path(root, &Parser::parse(path)?, value)
}

/// Writes `value` at a parsed path. See [`set`].
pub fn set_path(
    root: &mut DocValue,
    path: &DocPath,
    value: DocValue,
) -> Result<SetOutcome, MutationError> {
    let split = match path.split() {
        Some(split) => split,
        None => {
            debug!("replacing document root");
            *root = value;
            return Ok(SetOutcome::RootReplaced);
        }
    };

    check_padding(root, path)?;

    let steps = path.steps();
    let parent_len = split.parent.steps().len();
    let outcome = if root.is_null() {
        SetOutcome::RootReplaced
    } else {
        SetOutcome::Updated
    };

    let mut walked = DocPath::root();
    ensure_container(root, &steps[0], &walked)?;

    let mut current = root;
    for (i, segment) in steps[..parent_len].iter().enumerate() {
        walked.segments.push(segment.clone());
        current = navigate_or_create(current, segment, &steps[i + 1], &walked)?;
    }

    match split.leaf {
        Leaf::Key { key, indices } => {
            let name = key.key().unwrap_or_default().to_string();
            let map = match current {
                DocValue::Object(map) => map,
                other => return Err(mismatch(&walked, "object", other)),
            };
            walked.segments.push(key);
            if indices.is_empty() {
                trace!(path = %walked, "setting key");
                map.insert(name, value);
            } else {
                let slot = map.entry(name).or_insert(DocValue::Null);
                if !slot.is_array() {
                    if !slot.is_null() {
                        debug!(
                            path = %walked,
                            found = slot.type_name(),
                            "replacing value with array"
                        );
                    }
                    *slot = DocValue::array();
                }
                write_elements(slot, &indices, value, &mut walked)?;
            }
        }
        Leaf::Elements(indices) => write_elements(current, &indices, value, &mut walked)?,
    }

    Ok(outcome)
}

/// Appends `value` to the array at `path`, creating the array if absent.
pub fn append(
    root: &mut DocValue,
    path: &str,
    value: DocValue,
) -> Result<SetOutcome, MutationError> {
    let path = Parser::parse(path)?;
    let len = match read_path(root, &path) {
        Ok(DocValue::Array(items)) => items.len(),
        Ok(DocValue::Null) | Err(MutationError::PathNotFound { .. }) => 0,
        Ok(other) => return Err(mismatch(&path, "array", other)),
        Err(err) => return Err(err),
    };
    set_path(root, &path.index(len), value)
}

/// Removes and returns the value at `path`.
///
/// Removing `$` resets the root to `null`. Object entries keep the order of
/// their remaining siblings.
pub fn remove(root: &mut DocValue, path: &str) -> Result<DocValue, MutationError> {
    let path = Parser::parse(path)?;
    let steps = path.steps();
    let (last, parents) = match steps.split_last() {
        Some(split) => split,
        None => return Ok(std::mem::take(root)),
    };

    let mut current = root;
    let mut walked = DocPath::root();
    for segment in parents {
        walked.segments.push(segment.clone());
        current = child_mut(current, segment).ok_or_else(|| MutationError::PathNotFound {
            path: walked.to_string(),
        })?;
    }
    walked.segments.push(last.clone());

    let removed = match (last, current) {
        (Segment::DotKey(key) | Segment::BracketKey(key), DocValue::Object(map)) => {
            map.shift_remove(key)
        }
        (Segment::Index(i), DocValue::Array(items)) if *i < items.len() => Some(items.remove(*i)),
        _ => None,
    };
    debug!(path = %walked, found = removed.is_some(), "remove");
    removed.ok_or_else(|| MutationError::PathNotFound {
        path: walked.to_string(),
    })
}

fn child<'a>(value: &'a DocValue, segment: &Segment) -> Option<&'a DocValue> {
    match (segment, value) {
        (Segment::DotKey(key) | Segment::BracketKey(key), DocValue::Object(map)) => map.get(key),
        (Segment::Index(i), DocValue::Array(items)) => items.get(*i),
        (Segment::Root, _) => Some(value),
        _ => None,
    }
}

fn child_mut<'a>(value: &'a mut DocValue, segment: &Segment) -> Option<&'a mut DocValue> {
    match (segment, value) {
        (Segment::DotKey(key) | Segment::BracketKey(key), DocValue::Object(map)) => {
            map.get_mut(key)
        }
        (Segment::Index(i), DocValue::Array(items)) => items.get_mut(*i),
        (Segment::Root, value) => Some(value),
        _ => None,
    }
}

/// Steps from `container` into `segment`, creating the slot if missing and
/// making sure it can take `next`.
fn navigate_or_create<'a>(
    container: &'a mut DocValue,
    segment: &Segment,
    next: &Segment,
    walked: &DocPath,
) -> Result<&'a mut DocValue, MutationError> {
    let slot = match (segment, container) {
        (Segment::DotKey(key) | Segment::BracketKey(key), DocValue::Object(map)) => {
            map.entry(key.clone()).or_insert(DocValue::Null)
        }
        (Segment::Index(i), DocValue::Array(items)) => {
            let len = i.checked_add(1).ok_or_else(|| MutationError::IndexOutOfRange {
                path: walked.to_string(),
                index: *i,
                len: items.len(),
            })?;
            pad_to(items, len, walked);
            &mut items[*i]
        }
        (segment, other) => {
            let expected = if segment.is_key() { "object" } else { "array" };
            return Err(mismatch(walked, expected, other));
        }
    };
    ensure_container(slot, next, walked)?;
    Ok(slot)
}

/// Makes `slot` a container that `next` can step into.
///
/// `null` is replaced by an empty object or array; an existing container
/// of the right kind is kept; anything else is a mismatch.
fn ensure_container(
    slot: &mut DocValue,
    next: &Segment,
    walked: &DocPath,
) -> Result<(), MutationError> {
    let wants_array = matches!(next, Segment::Index(_));
    match slot {
        DocValue::Null => {
            debug!(path = %walked, array = wants_array, "creating container");
            *slot = if wants_array {
                DocValue::array()
            } else {
                DocValue::object()
            };
            Ok(())
        }
        DocValue::Array(_) if wants_array => Ok(()),
        DocValue::Object(_) if !wants_array => Ok(()),
        other => Err(mismatch(
            walked,
            if wants_array { "array" } else { "object" },
            other,
        )),
    }
}

/// Applies trailing indices to an array: every index but the last is
/// descended into (creating nested arrays), the last receives `value`.
fn write_elements(
    array: &mut DocValue,
    indices: &[usize],
    value: DocValue,
    walked: &mut DocPath,
) -> Result<(), MutationError> {
    let (last, inner) = match indices.split_last() {
        Some(split) => split,
        None => return Ok(()),
    };

    let mut current = array;
    for idx in inner {
        let segment = Segment::Index(*idx);
        walked.segments.push(segment.clone());
        current = navigate_or_create(current, &segment, &Segment::Index(*last), walked)?;
    }
    walked.segments.push(Segment::Index(*last));

    let items = match current {
        DocValue::Array(items) => items,
        other => return Err(mismatch(walked, "array", other)),
    };
    if *last < items.len() {
        trace!(path = %walked, "overwriting element");
        items[*last] = value;
    } else {
        pad_to(items, *last, walked);
        debug!(path = %walked, "appending element");
        items.push(value);
    }
    Ok(())
}

/// Rejects writes whose indices would pad an array by more than
/// [`MAX_PADDING`] elements. Runs before anything is created.
fn check_padding(root: &DocValue, path: &DocPath) -> Result<(), MutationError> {
    let mut current = Some(root);
    let mut walked = DocPath::root();
    for segment in path.steps() {
        walked.segments.push(segment.clone());
        if let Segment::Index(index) = segment {
            let len = match current {
                Some(DocValue::Array(items)) => items.len(),
                _ => 0,
            };
            if index.saturating_sub(len) > MAX_PADDING {
                return Err(MutationError::IndexOutOfRange {
                    path: walked.to_string(),
                    index: *index,
                    len,
                });
            }
        }
        current = current.and_then(|value| child(value, segment));
    }
    Ok(())
}

fn pad_to(items: &mut Vec<DocValue>, len: usize, walked: &DocPath) {
    if items.len() < len {
        trace!(path = %walked, from = items.len(), to = len, "padding array with nulls");
        items.resize(len, DocValue::Null);
    }
}

fn mismatch(path: &DocPath, expected: &'static str, found: &DocValue) -> MutationError {
    MutationError::TypeMismatch {
        path: path.to_string(),
        expected,
        found: found.type_name(),
    }
}
