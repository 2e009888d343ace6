//! Captured snapshots: `class name -> {attribute name -> value}`.
//!
//! Values are kept as raw [`serde_json::Value`]s. Opaque native objects appear
//! as marker strings (see [`crate::handle`]) and are only interpreted when a
//! canonical form is computed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{TypeError, TypeResult};

/// Attribute name -> captured default value for a single class.
pub type AttributeMap = BTreeMap<String, Value>;

/// One capture run's defaults, keyed by class name.
///
/// Snapshots are read-only inputs to the merge. Class names are unique by
/// construction (they are map keys); an attribute missing from a class means
/// "not observed here", never `null`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    classes: BTreeMap<String, AttributeMap>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot from an already-parsed JSON document.
    ///
    /// The document must be an object whose values are all objects.
    pub fn from_value(value: Value) -> TypeResult<Self> {
        let Value::Object(top) = value else {
            return Err(TypeError::SnapshotNotAnObject {
                found: json_type_name(&value),
            });
        };

        let mut classes = BTreeMap::new();
        for (class, attrs) in top {
            match attrs {
                Value::Object(attrs) => {
                    classes.insert(class, attrs.into_iter().collect());
                }
                other => {
                    return Err(TypeError::ClassNotAnObject {
                        class,
                        found: json_type_name(&other),
                    });
                }
            }
        }
        Ok(Self { classes })
    }

    /// Insert (or replace) the attribute map for a class.
    pub fn insert_class(&mut self, class: impl Into<String>, attrs: AttributeMap) {
        self.classes.insert(class.into(), attrs);
    }

    /// The attribute map recorded for `class`, if any.
    pub fn class(&self, class: &str) -> Option<&AttributeMap> {
        self.classes.get(class)
    }

    /// Iterate over class names in sorted order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Iterate over `(class, attributes)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttributeMap)> {
        self.classes.iter()
    }

    /// Number of classes captured.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no classes were captured.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Convert back into a plain JSON document.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.classes
                .iter()
                .map(|(class, attrs)| {
                    let attrs = attrs.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                    (class.clone(), Value::Object(attrs))
                })
                .collect(),
        )
    }
}

impl From<BTreeMap<String, AttributeMap>> for Snapshot {
    fn from(classes: BTreeMap<String, AttributeMap>) -> Self {
        Self { classes }
    }
}

/// Short name of a JSON value's kind, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
