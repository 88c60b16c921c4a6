//! Ordered value tree produced by the parsers

use indexmap::map::{IntoIter, Iter, Keys, Values};
use indexmap::IndexMap;
use std::borrow::{Borrow, Cow};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use crate::error::{Error, ErrorKind, Result};
use crate::escape::decode_basic;

/// A parsed value
///
/// Numbers and booleans keep their source text so formatters reproduce the
/// literal digits. Strings keep basic-string escaped text (see [`crate::escape`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Number(String),
    Boolean(String),
    String(String),
    Table(Map),
}

impl Object {
    /// Returns true if this value is a number
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns true if this value is a boolean
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    /// Returns true if this value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns true if this value is a table
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table(_))
    }

    /// Source text of a scalar, None for tables
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Number(s) | Self::Boolean(s) | Self::String(s) => Some(s),
            Self::Table(_) => None,
        }
    }

    /// Returns the table if this is a table, None otherwise
    pub fn as_table(&self) -> Option<&Map> {
        match self {
            Self::Table(map) => Some(map),
            _ => None,
        }
    }

    /// Returns a mutable reference to the table if this is a table, None otherwise
    pub fn as_table_mut(&mut self) -> Option<&mut Map> {
        match self {
            Self::Table(map) => Some(map),
            _ => None,
        }
    }

    /// String value with escape sequences decoded
    pub fn decoded(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::String(s) => Some(decode_basic(s)),
            _ => None,
        }
    }

    /// Number text as rendered, without a leading `+`
    pub fn number_literal(&self) -> Option<&str> {
        match self {
            Self::Number(s) => Some(s.strip_prefix('+').unwrap_or(s)),
            _ => None,
        }
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        Self::Boolean(value.to_string())
    }
}

impl From<i32> for Object {
    fn from(value: i32) -> Self {
        Self::Number(value.to_string())
    }
}

impl From<i64> for Object {
    fn from(value: i64) -> Self {
        Self::Number(value.to_string())
    }
}

impl From<&str> for Object {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Object {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Map> for Object {
    fn from(value: Map) -> Self {
        Self::Table(value)
    }
}

/// Whether a key names a field or indexes an array slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyKind {
    Name,
    Index,
}

/// A map key
///
/// Equality and hashing use the key text only, so a lookup by `&str` finds the
/// key whatever its kind. The kind is fixed when the key is created.
#[derive(Clone, Debug)]
pub struct Key {
    text: String,
    kind: KeyKind,
}

impl Key {
    /// A field name key
    pub fn name(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: KeyKind::Name,
        }
    }

    /// An array slot key
    pub fn index(index: usize) -> Self {
        Self {
            text: index.to_string(),
            kind: KeyKind::Index,
        }
    }

    /// Key for a dotted-path segment: an index when the segment is a
    /// non-negative integer literal, a name otherwise
    pub fn from_segment(segment: &str) -> Self {
        let kind = if is_index_literal(segment) {
            KeyKind::Index
        } else {
            KeyKind::Name
        };
        Self {
            text: segment.to_owned(),
            kind,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    pub fn is_index(&self) -> bool {
        self.kind == KeyKind::Index
    }

    /// Slot number of an index key
    pub fn slot(&self) -> Option<usize> {
        match self.kind {
            KeyKind::Index => self.text.parse().ok(),
            KeyKind::Name => None,
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// `0` or a non-zero digit followed by digits
pub(crate) fn is_index_literal(text: &str) -> bool {
    match text.as_bytes() {
        [] => false,
        [b'0'] => true,
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
    }
}

/// An insertion-ordered table
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(pub(crate) IndexMap<Key, Object>);

impl Map {
    /// Creates a new empty map
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a reference to the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Object> {
        self.0.get_mut(key)
    }

    /// Returns true if the map contains `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Inserts a value; an existing key keeps its position and kind
    pub fn insert(&mut self, key: Key, value: impl Into<Object>) -> Option<Object> {
        self.0.insert(key, value.into())
    }

    /// Returns an iterator over the keys
    pub fn keys(&self) -> Keys<'_, Key, Object> {
        self.0.keys()
    }

    /// Returns an iterator over the values
    pub fn values(&self) -> Values<'_, Key, Object> {
        self.0.values()
    }

    /// Returns an iterator over entries in insertion order
    pub fn iter(&self) -> Iter<'_, Key, Object> {
        self.0.iter()
    }

    /// True iff the keys are exactly the index keys `0..len`, in any order
    pub fn is_array(&self) -> bool {
        if self.0.is_empty() {
            return false;
        }
        let mut seen = vec![false; self.0.len()];
        for key in self.0.keys() {
            let Some(slot) = key.slot() else {
                return false;
            };
            match seen.get_mut(slot) {
                Some(taken) if !*taken => *taken = true,
                _ => return false,
            }
        }
        true
    }

    /// First integer `n` (from 0) with no `"n"` key
    pub fn next_index(&self) -> usize {
        (0..self.0.len())
            .find(|i| !self.0.contains_key(i.to_string().as_str()))
            .unwrap_or(self.0.len())
    }

    /// Get or create the table stored under `segment`
    ///
    /// Returns None when the key already holds a scalar.
    pub fn child_table_mut(&mut self, segment: &str) -> Option<&mut Self> {
        self.0
            .entry(Key::from_segment(segment))
            .or_insert_with(|| Object::Table(Self::new()))
            .as_table_mut()
    }

    /// Walk `path`, creating missing tables, and return the last one
    pub fn ensure_table<S: AsRef<str>>(&mut self, path: &[S]) -> Result<&mut Self> {
        let mut current = self;
        for segment in path {
            current = current
                .child_table_mut(segment.as_ref())
                .ok_or_else(|| Error::new(ErrorKind::KeyConflict, join_path(path)))?;
        }
        Ok(current)
    }

    /// Insert `value` at a dotted key path, creating intermediate tables
    ///
    /// Fails with [`ErrorKind::KeyConflict`] when an intermediate segment
    /// holds a scalar. The final segment is always set, replacing any value.
    pub fn deep_add<S: AsRef<str>>(&mut self, path: &[S], value: Object) -> Result<()> {
        let Some((last, parents)) = path.split_last() else {
            return Ok(());
        };
        let table = self
            .ensure_table(parents)
            .map_err(|err| Error::new(err.kind().clone(), join_path(path)))?;
        table.insert(Key::from_segment(last.as_ref()), value);
        Ok(())
    }

    /// Merge `other` into this map
    ///
    /// Tables merge recursively; any other value replaces the destination
    /// entry outright. New keys are appended in `other`'s order.
    pub fn merge(&mut self, other: Self) {
        for (key, value) in other.0 {
            match value {
                Object::Table(inner) => {
                    let slot = self
                        .0
                        .entry(key)
                        .or_insert_with(|| Object::Table(Self::new()));
                    if !slot.is_table() {
                        *slot = Object::Table(Self::new());
                    }
                    if let Object::Table(dst) = slot {
                        dst.merge(inner);
                    }
                }
                other_value => {
                    self.0.insert(key, other_value);
                }
            }
        }
    }
}

pub(crate) fn join_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(".")
}

impl Index<&str> for Map {
    type Output = Object;

    #[allow(clippy::indexing_slicing)]
    fn index(&self, key: &str) -> &Self::Output {
        &self.0[key]
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Key, &'a Object);
    type IntoIter = Iter<'a, Key, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Map {
    type Item = (Key, Object);
    type IntoIter = IntoIter<Key, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(Key, Object)> for Map {
    fn from_iter<I: IntoIterator<Item = (Key, Object)>>(iter: I) -> Self {
        Self(IndexMap::from_iter(iter))
    }
}
