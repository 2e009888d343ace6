//! Deduplication of observed values.
//!
//! Scalars are keyed by borrowed [`ScalarKey`]s with no copying. As soon as
//! any value is a list or mapping, the whole batch is keyed by the owned
//! [`Hashable`] projection instead. Both paths agree with `Value` equality and
//! keep the first occurrence of each distinct value.

use std::collections::HashSet;
use std::hash::Hash;

use serde_json::Value;

use crate::hashable::{float_bits, Hashable};

/// Borrowed key for a scalar value.
#[derive(PartialEq, Eq, Hash)]
enum ScalarKey<'a> {
    Null,
    Bool(bool),
    UInt(u64),
    Int(i64),
    Float(u64),
    Str(&'a str),
}

impl<'a> ScalarKey<'a> {
    /// `None` for lists and mappings.
    fn probe(value: &'a Value) -> Option<Self> {
        Some(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else {
                    Self::Float(float_bits(n.as_f64().unwrap_or_default()))
                }
            }
            Value::String(s) => Self::Str(s),
            Value::Array(_) | Value::Object(_) => return None,
        })
    }
}

/// Distinct values of `values`, in order of first occurrence.
pub fn dedup<'a>(values: &[&'a Value]) -> Vec<&'a Value> {
    match values
        .iter()
        .map(|v| ScalarKey::probe(v))
        .collect::<Option<Vec<_>>>()
    {
        Some(keys) => keep_first(values, keys),
        None => keep_first(values, values.iter().map(|v| Hashable::from_value(v))),
    }
}

fn keep_first<'a, K, I>(values: &[&'a Value], keys: I) -> Vec<&'a Value>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut seen = HashSet::with_capacity(values.len());
    let mut distinct = Vec::new();
    for (value, key) in values.iter().zip(keys) {
        if seen.insert(key) {
            distinct.push(*value);
        }
    }
    distinct
}
