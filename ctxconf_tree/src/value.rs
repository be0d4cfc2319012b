use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

use crate::error::ShapeError;

/// Map key inside a [`ConfigTree`]. VLAN tags use integer keys, everything else strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Str(value)
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{v}"),
            Key::Str(v) => f.write_str(v),
        }
    }
}

/// One node of a [`ConfigTree`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value>),
    Set(BTreeSet<Value>),
    Map(BTreeMap<Key, Value>),
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl Value {
    /// Empty map node.
    pub fn empty_map() -> Self {
        Value::Map(BTreeMap::new())
    }

    /// Empty list node.
    pub fn empty_list() -> Self {
        Value::List(Vec::new())
    }

    /// Empty set node.
    pub fn empty_set() -> Self {
        Value::Set(BTreeSet::new())
    }

    /// Short shape name used in [`ShapeError`].
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&BTreeSet<Value>> {
        match self {
            Value::Set(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<Key, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut BTreeMap<Key, Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Look up a direct child of a map node.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.as_map()?.get(&key.into())
    }

    /// Follow `path` through nested maps.
    pub fn pointer(&self, path: &[Key]) -> Option<&Value> {
        path.iter()
            .try_fold(self, |node, key| node.as_map()?.get(key))
    }

    /// Mutable variant of [`Value::pointer`].
    pub fn pointer_mut(&mut self, path: &[Key]) -> Option<&mut Value> {
        let mut node = self;
        for key in path {
            node = node.as_map_mut()?.get_mut(key)?;
        }
        Some(node)
    }

    /// Return the node at `path`, creating missing intermediate maps and
    /// inserting `default()` as the leaf when absent.
    ///
    /// An empty path returns `self`.
    pub fn entry(
        &mut self,
        path: &[Key],
        default: impl FnOnce() -> Value,
    ) -> Result<&mut Value, ShapeError> {
        let Some((leaf, parents)) = path.split_last() else {
            return Ok(self);
        };
        let mut node = self;
        for key in parents {
            node = node
                .expect_map()?
                .entry(key.clone())
                .or_insert_with(Value::empty_map);
        }
        Ok(node.expect_map()?.entry(leaf.clone()).or_insert_with(default))
    }

    /// Map at `path`, created when missing.
    pub fn map_entry(&mut self, path: &[Key]) -> Result<&mut BTreeMap<Key, Value>, ShapeError> {
        self.entry(path, Value::empty_map)?.expect_map()
    }

    /// List at `path`, created when missing.
    pub fn list_entry(&mut self, path: &[Key]) -> Result<&mut Vec<Value>, ShapeError> {
        match self.entry(path, Value::empty_list)? {
            Value::List(list) => Ok(list),
            other => Err(ShapeError::new("list", other.kind())),
        }
    }

    /// Set at `path`, created when missing.
    pub fn set_entry(&mut self, path: &[Key]) -> Result<&mut BTreeSet<Value>, ShapeError> {
        match self.entry(path, Value::empty_set)? {
            Value::Set(set) => Ok(set),
            other => Err(ShapeError::new("set", other.kind())),
        }
    }

    /// Store `value` at `path`, replacing a previous scalar.
    ///
    /// Returns the replaced value, if any.
    pub fn assign(&mut self, path: &[Key], value: Value) -> Result<Option<Value>, ShapeError> {
        let Some((leaf, parents)) = path.split_last() else {
            return Err(ShapeError::new("map", self.kind()));
        };
        Ok(self.map_entry(parents)?.insert(leaf.clone(), value))
    }

    fn expect_map(&mut self) -> Result<&mut BTreeMap<Key, Value>, ShapeError> {
        let found = self.kind();
        self.as_map_mut()
            .ok_or_else(|| ShapeError::new("map", found))
    }
}

/// Parsed configuration of one device: a map rooted at the top level.
///
/// Grammar actions build it incrementally; once parsing returns, the tree is
/// handed to the caller as a plain value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigTree {
    root: Value,
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            root: Value::empty_map(),
        }
    }

    /// Borrow the root map node.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Mutably borrow the root map node.
    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    /// Consume the tree, returning the root node.
    pub fn into_root(self) -> Value {
        self.root
    }

    /// Look up a top-level section.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.root.get(key)
    }

    /// Follow `path` from the root.
    pub fn pointer(&self, path: &[Key]) -> Option<&Value> {
        self.root.pointer(path)
    }

    /// Top-level keys in iteration order.
    pub fn sections(&self) -> impl Iterator<Item = &Key> {
        self.root.as_map().into_iter().flat_map(|map| map.keys())
    }

    /// Serialize the tree as pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Stable content hash of the tree.
    ///
    /// Two trees with equal content produce the same fingerprint, since maps
    /// and sets serialize in key order.
    pub fn fingerprint(&self) -> serde_json::Result<u64> {
        let canonical = serde_json::to_string(self)?;
        Ok(xxh3_64(canonical.as_bytes()))
    }
}

impl fmt::Display for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => Err(fmt::Error),
        }
    }
}
