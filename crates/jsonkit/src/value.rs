//! The JSON value model.
//!
//! [`Json`] is a closed tagged union mirroring RFC 8259 plus a decimal
//! variant for lossless base-10 numbers. [`JsonObject`] preserves insertion
//! order for iteration and re-encoding while still offering O(1) expected
//! lookup; [`JsonArray`] is a plain ordered sequence.
use std::fmt;

use indexmap::IndexMap;

#[cfg(feature = "decimal")]
pub use rust_decimal::Decimal;

/// An ordered sequence of [`Json`] values. Equality is element-wise and
/// positional.
pub type JsonArray = Vec<Json>;

/// A string-keyed mapping of [`Json`] values.
///
/// Keys are unique; inserting an existing key overwrites its value in
/// place, preserving the key's original position. Iteration order is
/// insertion order. Equality compares key *sets* and their values; order is
/// not significant (two objects built by inserting the same key/value
/// pairs in a different order are equal).
#[derive(Debug, Clone, Default)]
pub struct JsonObject {
    entries: IndexMap<String, Json>,
}

impl JsonObject {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Creates an empty object with room for at least `capacity` entries
    /// without reallocating.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Json> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Json> {
        self.entries.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts `value` under `key`, overwriting any existing value while
    /// keeping the key's original insertion position. Returns the previous
    /// value, if any.
    pub fn insert(&mut self, key: impl Into<String>, value: Json) -> Option<Json> {
        self.entries.insert(key.into(), value)
    }

    /// Removes `key`, shifting later entries back to keep insertion order
    /// contiguous. Returns the removed value, if any.
    pub fn remove(&mut self, key: &str) -> Option<Json> {
        self.entries.shift_remove(key)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Json)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl PartialEq for JsonObject {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(k, v)| other.entries.get(k).is_some_and(|ov| ov == v))
    }
}

impl FromIterator<(String, Json)> for JsonObject {
    fn from_iter<T: IntoIterator<Item = (String, Json)>>(iter: T) -> Self {
        let mut obj = Self::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

impl<'a> IntoIterator for &'a JsonObject {
    type Item = (&'a str, &'a Json);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a Json)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// A JSON value: the closed union produced by the parser/decoder and
/// consumed by the encoder and typed accessors.
///
/// Numbers are represented by exactly one of three mutually exclusive
/// variants depending on how the source literal parsed and on
/// [`crate::ParserOptions::use_decimals`]: [`Json::Int64`] for integer
/// literals that fit a signed 64-bit integer, [`Json::Double`] for any
/// other literal by default, or [`Json::Decimal`] when decimal
/// preservation is requested (see the `decimal` crate feature).
#[derive(Debug, Clone, PartialEq)]
pub enum Json {
    Null,
    Bool(bool),
    String(String),
    Int64(i64),
    Double(f64),
    #[cfg(feature = "decimal")]
    Decimal(Decimal),
    Object(JsonObject),
    Array(JsonArray),
}

/// The coarse classification used in type-mismatch error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Null,
    Bool,
    String,
    Number,
    Object,
    Array,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Number => "number",
            Self::Object => "object",
            Self::Array => "array",
        };
        f.write_str(s)
    }
}

impl Json {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// True for any of `Int64`/`Double`/`Decimal` — the `number` category.
    #[must_use]
    pub fn is_number(&self) -> bool {
        match self {
            Self::Int64(_) | Self::Double(_) => true,
            #[cfg(feature = "decimal")]
            Self::Decimal(_) => true,
            _ => false,
        }
    }

    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// The coarse category of this value, used in error messages.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Self::Null => Category::Null,
            Self::Bool(_) => Category::Bool,
            Self::String(_) => Category::String,
            Self::Int64(_) | Self::Double(_) => Category::Number,
            #[cfg(feature = "decimal")]
            Self::Decimal(_) => Category::Number,
            Self::Object(_) => Category::Object,
            Self::Array(_) => Category::Array,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The exact `i64` this value parsed to, if it is an [`Json::Int64`].
    /// Does not coerce doubles or decimals — see [`crate::accessors`] for
    /// the lossy numeric coercion family.
    #[must_use]
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Self::Int64(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }

    #[cfg(feature = "decimal")]
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<bool> for Json {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Json {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f64> for Json {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<String> for Json {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Json {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<JsonObject> for Json {
    fn from(v: JsonObject) -> Self {
        Self::Object(v)
    }
}

impl From<JsonArray> for Json {
    fn from(v: JsonArray) -> Self {
        Self::Array(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_equality_ignores_insertion_order() {
        let mut a = JsonObject::new();
        a.insert("x", Json::Int64(1));
        a.insert("y", Json::Int64(2));

        let mut b = JsonObject::new();
        b.insert("y", Json::Int64(2));
        b.insert("x", Json::Int64(1));

        assert_eq!(a, b);
    }

    #[test]
    fn object_iteration_preserves_insertion_order() {
        let mut obj = JsonObject::new();
        obj.insert("b", Json::Null);
        obj.insert("a", Json::Null);
        let keys: Vec<_> = obj.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn reinserting_a_key_keeps_its_original_position() {
        let mut obj = JsonObject::new();
        obj.insert("a", Json::Int64(1));
        obj.insert("b", Json::Int64(2));
        obj.insert("a", Json::Int64(3));
        assert_eq!(obj.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(obj.get("a"), Some(&Json::Int64(3)));
    }

    #[test]
    fn array_equality_is_positional() {
        let a = Json::Array(vec![Json::Int64(1), Json::Int64(2)]);
        let b = Json::Array(vec![Json::Int64(2), Json::Int64(1)]);
        assert_ne!(a, b);
    }
}
