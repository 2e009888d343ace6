//! The merged report: class -> attribute -> [`MergedAttribute`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::outcome::{MergeKind, MergedAttribute};

/// Attribute name -> merge outcome for one class.
pub type MergedClass = BTreeMap<String, MergedAttribute>;

/// The canonical merge of every input snapshot.
///
/// Serializes to exactly the `details.json` document. Contains the union of
/// class names and, per class, the union of attribute names across inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergedReport {
    pub classes: BTreeMap<String, MergedClass>,
}

/// Counts over a [`MergedReport`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    pub classes: usize,
    pub attributes: usize,
    pub identical: usize,
    pub type_diff: usize,
    pub different: usize,
}

impl MergedReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_class(&mut self, class: impl Into<String>, attrs: MergedClass) {
        self.classes.insert(class.into(), attrs);
    }

    /// The merged attributes of `class`.
    pub fn class(&self, class: &str) -> Option<&MergedClass> {
        self.classes.get(class)
    }

    /// The outcome for a single `(class, attribute)` pair.
    pub fn get(&self, class: &str, attr: &str) -> Option<&MergedAttribute> {
        self.classes.get(class)?.get(attr)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MergedClass)> {
        self.classes.iter()
    }

    /// Tally classes and attribute outcomes.
    pub fn stats(&self) -> ReportStats {
        let mut stats = ReportStats {
            classes: self.classes.len(),
            ..ReportStats::default()
        };
        for attr in self.classes.values().flat_map(|c| c.values()) {
            stats.attributes += 1;
            match attr.kind() {
                MergeKind::Identical => stats.identical += 1,
                MergeKind::TypeDiff => stats.type_diff += 1,
                MergeKind::Different => stats.different += 1,
            }
        }
        stats
    }
}
