//! Per-attribute merge outcome and its `details.json` encoding.
//!
//! Internally the outcome is a three-variant enum. Only at the serialization
//! boundary is it encoded the way the detail report stores it:
//!
//! ```text
//! Identical(v)             ->  v
//! TypeDiff{n, value, tys}  ->  ["@typeDiff:<n>", value, [tys...]]
//! Different{n, values}     ->  ["@different:<n>", [values...]]
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Tag prefix of an encoded [`MergedAttribute::Different`].
pub const DIFFERENT_PREFIX: &str = "@different:";

/// Tag prefix of an encoded [`MergedAttribute::TypeDiff`].
pub const TYPE_DIFF_PREFIX: &str = "@typeDiff:";

/// The result of merging one attribute across every snapshot that has it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MergedAttribute {
    /// Every snapshot reports exactly the same value.
    Identical(Value),
    /// Snapshots agree on the value's textual form but not on its type.
    TypeDiff {
        /// Number of distinct raw values.
        count: usize,
        /// The shared textual form.
        value: String,
        /// The distinct type tags present, sorted.
        types: Vec<String>,
    },
    /// Snapshots disagree on the value.
    Different {
        /// Number of distinct raw values.
        count: usize,
        /// The distinct raw values, sorted.
        values: Vec<Value>,
    },
}

/// Which of the three outcomes a [`MergedAttribute`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeKind {
    Identical,
    TypeDiff,
    Different,
}

impl MergedAttribute {
    pub fn kind(&self) -> MergeKind {
        match self {
            Self::Identical(_) => MergeKind::Identical,
            Self::TypeDiff { .. } => MergeKind::TypeDiff,
            Self::Different { .. } => MergeKind::Different,
        }
    }

    pub fn is_identical(&self) -> bool {
        matches!(self, Self::Identical(_))
    }

    /// Encode into the detail-report representation.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Identical(value) => value.clone(),
            Self::TypeDiff { count, value, types } => Value::Array(vec![
                Value::String(format!("{TYPE_DIFF_PREFIX}{count}")),
                Value::String(value.clone()),
                Value::Array(types.iter().cloned().map(Value::String).collect()),
            ]),
            Self::Different { count, values } => Value::Array(vec![
                Value::String(format!("{DIFFERENT_PREFIX}{count}")),
                Value::Array(values.clone()),
            ]),
        }
    }

    /// Decode from the detail-report representation.
    ///
    /// Only arrays with exactly the tagged shape decode as `TypeDiff` or
    /// `Different` (the count must be at least 2, and for `Different` must
    /// match the number of values). Every other value is `Identical`.
    pub fn from_json(value: Value) -> Self {
        if let Value::Array(items) = &value {
            if let Some(decoded) = decode_tagged(items) {
                return decoded;
            }
        }
        Self::Identical(value)
    }
}

fn decode_tagged(items: &[Value]) -> Option<MergedAttribute> {
    let tag = items.first()?.as_str()?;

    if let Some(count) = tag.strip_prefix(DIFFERENT_PREFIX) {
        let count: usize = count.parse().ok()?;
        return match items {
            [_, Value::Array(values)] if count >= 2 && values.len() == count => {
                Some(MergedAttribute::Different {
                    count,
                    values: values.clone(),
                })
            }
            _ => None,
        };
    }

    if let Some(count) = tag.strip_prefix(TYPE_DIFF_PREFIX) {
        let count: usize = count.parse().ok()?;
        return match items {
            [_, Value::String(value), Value::Array(types)] if count >= 2 => {
                let types = types
                    .iter()
                    .map(|t| t.as_str().map(str::to_owned))
                    .collect::<Option<Vec<_>>>()?;
                Some(MergedAttribute::TypeDiff {
                    count,
                    value: value.clone(),
                    types,
                })
            }
            _ => None,
        };
    }

    None
}

impl Serialize for MergedAttribute {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Identical(value) => value.serialize(serializer),
            other => other.to_json().serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MergedAttribute {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_json)
    }
}
