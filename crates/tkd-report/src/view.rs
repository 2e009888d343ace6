use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tkd_types::outcome::DIFFERENT_PREFIX;
use tkd_types::{render, MergedAttribute, MergedReport};

/// Marker appended to type-diff values in the extra-concise view.
pub const TYPE_DIFF_MARKER: &str = "    @typeDiff";

/// One of the three report projections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportView {
    /// Full detail, the canonical merged report.
    Details,
    /// Differences collapsed to a count, type-diffs to one string.
    Concise,
    /// Differences dropped entirely, type-diffs flagged inline.
    ExtraConcise,
}

impl ReportView {
    /// All views, in the order they are written.
    pub const ALL: [ReportView; 3] = [Self::Details, Self::Concise, Self::ExtraConcise];

    /// The file this view is written to.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Details => "details.json",
            Self::Concise => "concise.json",
            Self::ExtraConcise => "concise_2.json",
        }
    }

    /// Human-readable name for progress output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Details => "detailed",
            Self::Concise => "concise",
            Self::ExtraConcise => "extra concise",
        }
    }

    /// Project `report` into this view.
    pub fn render(self, report: &MergedReport) -> Value {
        match self {
            Self::Details => details(report),
            Self::Concise => concise(report),
            Self::ExtraConcise => extra_concise(report),
        }
    }
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Details => "details",
            Self::Concise => "concise",
            Self::ExtraConcise => "extra-concise",
        })
    }
}

impl FromStr for ReportView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "details" => Ok(Self::Details),
            "concise" => Ok(Self::Concise),
            "extra-concise" | "concise_2" => Ok(Self::ExtraConcise),
            other => Err(format!("unknown report view: {other}")),
        }
    }
}

fn project<F>(report: &MergedReport, mut f: F) -> Value
where
    F: FnMut(&MergedAttribute) -> Option<Value>,
{
    let classes = report
        .iter()
        .map(|(class, attrs)| {
            let attrs: Map<String, Value> = attrs
                .iter()
                .filter_map(|(name, attr)| f(attr).map(|v| (name.clone(), v)))
                .collect();
            (class.clone(), Value::Object(attrs))
        })
        .collect();
    Value::Object(classes)
}

/// The full-detail document (`details.json`).
pub fn details(report: &MergedReport) -> Value {
    project(report, |attr| Some(attr.to_json()))
}

/// The concise document (`concise.json`).
pub fn concise(report: &MergedReport) -> Value {
    project(report, |attr| Some(concise_attribute(attr)))
}

/// The extra-concise document (`concise_2.json`).
pub fn extra_concise(report: &MergedReport) -> Value {
    project(report, extra_concise_attribute)
}

/// Concise form of one outcome.
pub fn concise_attribute(attr: &MergedAttribute) -> Value {
    match attr {
        MergedAttribute::Identical(v) => v.clone(),
        MergedAttribute::TypeDiff { value, types, .. } => {
            Value::String(format!("{value} = {}", render::repr_str_list(types)))
        }
        MergedAttribute::Different { count, .. } => {
            Value::String(format!("{DIFFERENT_PREFIX}{count}"))
        }
    }
}

/// Extra-concise form of one outcome; `None` drops the attribute.
pub fn extra_concise_attribute(attr: &MergedAttribute) -> Option<Value> {
    match attr {
        MergedAttribute::Identical(v) => Some(v.clone()),
        MergedAttribute::TypeDiff { value, .. } => {
            Some(Value::String(format!("{value}{TYPE_DIFF_MARKER}")))
        }
        MergedAttribute::Different { .. } => None,
    }
}
