//! Hashable projection of JSON values.
//!
//! `serde_json::Value` implements `Eq` but not `Hash`, so it cannot key a
//! `HashSet` directly. [`Hashable`] is an owned surrogate whose equality agrees
//! with `Value`'s: two values project to equal surrogates exactly when they
//! compare equal. It is only used for deduplication, never for output.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde_json::{Map, Number, Value};

/// A hashable stand-in for a [`Value`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Hashable {
    Null,
    Bool(bool),
    /// Non-negative integers.
    UInt(u64),
    /// Negative integers.
    Int(i64),
    /// Float bit pattern, with `-0.0` folded into `0.0`.
    Float(u64),
    Str(String),
    /// Sequences keep their element order.
    Seq(Vec<Hashable>),
    /// Mappings compare by their item set.
    Map(FrozenMap),
}

impl Hashable {
    /// Project a value.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::from_number(n),
            Value::String(s) => Self::Str(s.clone()),
            Value::Array(items) => Self::Seq(items.iter().map(Self::from_value).collect()),
            Value::Object(map) => Self::Map(FrozenMap::from_map(map)),
        }
    }

    fn from_number(n: &Number) -> Self {
        if let Some(u) = n.as_u64() {
            Self::UInt(u)
        } else if let Some(i) = n.as_i64() {
            Self::Int(i)
        } else {
            Self::Float(float_bits(n.as_f64().unwrap_or_default()))
        }
    }
}

impl From<&Value> for Hashable {
    fn from(value: &Value) -> Self {
        Self::from_value(value)
    }
}

/// Bit pattern of `f` for hashing; `-0.0` and `0.0` are equal as values.
pub(crate) fn float_bits(f: f64) -> u64 {
    if f == 0.0 {
        0.0f64.to_bits()
    } else {
        f.to_bits()
    }
}

/// An immutable mapping with a hash fixed at construction.
///
/// Entries are sorted by key, so equality and hashing depend only on the set
/// of items. There is no `&mut` access to the entries: once built, the cached
/// hash can never go stale.
#[derive(Clone, Debug)]
pub struct FrozenMap {
    entries: Box<[(String, Hashable)]>,
    hash: u64,
}

impl FrozenMap {
    /// Freeze a JSON object.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self::from_entries(
            map.iter()
                .map(|(k, v)| (k.clone(), Hashable::from_value(v)))
                .collect(),
        )
    }

    /// Freeze arbitrary entries. Later duplicates of a key are dropped.
    pub fn from_entries(mut entries: Vec<(String, Hashable)>) -> Self {
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|later, earlier| later.0 == earlier.0);

        let mut hasher = DefaultHasher::new();
        entries.hash(&mut hasher);
        Self {
            entries: entries.into_boxed_slice(),
            hash: hasher.finish(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Hashable> {
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Hashable)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for FrozenMap {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.entries == other.entries
    }
}

impl Eq for FrozenMap {}

impl Hash for FrozenMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl PartialOrd for FrozenMap {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrozenMap {
    fn cmp(&self, other: &Self) -> Ordering {
        self.entries.cmp(&other.entries)
    }
}
