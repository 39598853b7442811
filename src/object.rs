//! Ordered object node.
//!
//! An [`Object`] is a type name plus an ordered mapping from field keys to
//! values. Insertion order is preserved so that written output reproduces the
//! order fields were added in. The type name is `""` for untyped objects; a
//! non-empty name is written as a bare word before the opening brace and is
//! what the registry resolves on deserialization.
//!
//! By default, adding [`Value::Null`] is a no-op; a node built with
//! [`Object::retain_nulls`] keeps explicit null entries instead.
//!
//! ## Examples
//!
//! ```rust
//! use muesli::{Object, Value};
//!
//! let mut obj = Object::typed("User");
//! obj.add("name", "Alice").add("age", 30);
//!
//! assert_eq!(obj.type_name(), "User");
//! assert_eq!(obj.get("name").and_then(Value::as_str), Some("Alice"));
//!
//! // Nulls are dropped on insertion unless the node retains them.
//! obj.add("missing", Value::Null);
//! assert_eq!(obj.len(), 2);
//! ```

use crate::{Format, List, Value, Writer};
use indexmap::IndexMap;
use std::fmt;

/// A typed, ordered key-to-value mapping.
#[derive(Clone, Debug, Default)]
pub struct Object {
    name: String,
    entries: IndexMap<String, Value>,
    nullable: bool,
}

impl Object {
    /// Creates an empty untyped object.
    #[must_use]
    pub fn new() -> Self {
        Object::typed("")
    }

    /// Creates an empty object carrying the given type name.
    #[must_use]
    pub fn typed(name: impl Into<String>) -> Self {
        Object {
            name: name.into(),
            entries: IndexMap::new(),
            nullable: false,
        }
    }

    /// Switches the node to retaining explicit null entries.
    #[must_use]
    pub fn retain_nulls(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// The type name; empty for untyped objects.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.name
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the object has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if an entry exists for the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the value stored under the key, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Returns the object stored under the key, if the entry is an object.
    #[must_use]
    pub fn object(&self, key: &str) -> Option<&Object> {
        self.get(key).and_then(Value::as_object)
    }

    /// Returns the list stored under the key, if the entry is a list.
    #[must_use]
    pub fn list(&self, key: &str) -> Option<&List> {
        self.get(key).and_then(Value::as_list)
    }

    /// Adds an entry, replacing any previous value for the key. Null values
    /// are dropped unless the node retains them. Returns `self` for chaining.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let value = value.into();
        if !value.is_null() || self.nullable {
            self.entries.insert(key.into(), value);
        }
        self
    }

    /// Removes and returns the entry for the key, preserving the order of the
    /// remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.entries.keys()
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.entries.values()
    }

    /// The backing entry map.
    #[must_use]
    pub fn entries(&self) -> &IndexMap<String, Value> {
        &self.entries
    }
}

/// Two objects are equal when their entries are equal. The type name and the
/// null-retention policy are carrier details: a default registered as an
/// untyped literal must compare equal to the typed value computed for the
/// matching field.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut writer = Writer::with_format(Format::compact());
        writer.write_object(self);
        f.write_str(writer.as_str())
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        let mut obj = Object::new();
        for (key, value) in iter {
            obj.add(key, value);
        }
        obj
    }
}

impl Extend<(String, Value)> for Object {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}
