//! Class-level and report-level merge.
//!
//! Both levels follow the same pattern: take the union of keys across inputs,
//! gather the entries of the inputs that define each key (inputs without the
//! key contribute nothing), and merge what was gathered.

use std::collections::BTreeSet;

use serde_json::Value;
use tkd_types::{AttributeMap, MergedClass, MergedReport, Snapshot};
use tracing::debug;

use crate::attribute::merge_attribute;

/// Merge one class's attribute maps, one per snapshot that has the class.
pub fn merge_widget(attrs: &[&AttributeMap]) -> MergedClass {
    let names: BTreeSet<&String> = attrs.iter().flat_map(|a| a.keys()).collect();

    let mut merged = MergedClass::new();
    for name in names {
        let values: Vec<&Value> = attrs.iter().filter_map(|a| a.get(name)).collect();
        if let Some(outcome) = merge_attribute(&values) {
            merged.insert(name.clone(), outcome);
        }
    }
    merged
}

/// Merge every snapshot into one report.
///
/// The report holds the union of class names, and within each class the
/// union of attribute names, across all snapshots.
pub fn merge_data(snapshots: &[Snapshot]) -> MergedReport {
    let names: BTreeSet<&str> = snapshots.iter().flat_map(|s| s.class_names()).collect();

    let mut report = MergedReport::new();
    for name in names {
        let attrs: Vec<&AttributeMap> = snapshots.iter().filter_map(|s| s.class(name)).collect();
        debug!(class = name, sources = attrs.len(), "merging class");
        report.insert_class(name, merge_widget(&attrs));
    }

    let stats = report.stats();
    debug!(
        snapshots = snapshots.len(),
        classes = stats.classes,
        identical = stats.identical,
        type_diff = stats.type_diff,
        different = stats.different,
        "merge complete"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use tkd_types::MergedAttribute;

    fn snap(v: Value) -> Snapshot {
        Snapshot::from_value(v).unwrap()
    }

    #[test]
    fn identical_scenario() {
        let report = merge_data(&[
            snap(json!({"Button": {"bg": "white"}})),
            snap(json!({"Button": {"bg": "white"}})),
        ]);
        assert_eq!(
            report.get("Button", "bg"),
            Some(&MergedAttribute::Identical(json!("white")))
        );
    }

    #[test]
    fn bool_vs_int_scenario() {
        let report = merge_data(&[
            snap(json!({"Button": {"width": 1}})),
            snap(json!({"Button": {"width": true}})),
        ]);
        assert_eq!(
            report.get("Button", "width"),
            Some(&MergedAttribute::Different {
                count: 2,
                values: vec![json!(1), json!(true)],
            })
        );
    }

    #[test]
    fn handle_vs_int_scenario() {
        let report = merge_data(&[
            snap(json!({"Entry": {"cursor": "@Tcl_Obj: type=pixel, value=2"}})),
            snap(json!({"Entry": {"cursor": 2}})),
        ]);
        assert_eq!(
            report.get("Entry", "cursor"),
            Some(&MergedAttribute::TypeDiff {
                count: 2,
                value: "2".into(),
                types: vec!["@Py_int".into(), "pixel".into()],
            })
        );
    }

    #[test]
    fn union_of_classes_and_attributes() {
        let report = merge_data(&[
            snap(json!({"Button": {"bg": "white"}, "Label": {"fg": "black"}})),
            snap(json!({"Button": {"bd": 2}, "Canvas": {}})),
        ]);
        assert_eq!(report.len(), 3);
        assert_eq!(report.class("Button").unwrap().len(), 2);
        assert!(report.class("Canvas").unwrap().is_empty());
        // Observed once: identical, not different-from-missing.
        assert_eq!(
            report.get("Button", "bd"),
            Some(&MergedAttribute::Identical(json!(2)))
        );
        assert_eq!(
            report.get("Label", "fg"),
            Some(&MergedAttribute::Identical(json!("black")))
        );
    }

    #[test]
    fn missing_attribute_is_not_null() {
        let report = merge_data(&[
            snap(json!({"Button": {"image": null}})),
            snap(json!({"Button": {}})),
        ]);
        assert_eq!(
            report.get("Button", "image"),
            Some(&MergedAttribute::Identical(json!(null)))
        );
    }

    #[test]
    fn no_snapshots_no_report() {
        assert!(merge_data(&[]).is_empty());
    }

    #[test]
    fn merge_widget_directly() {
        let a: AttributeMap = [("x".to_string(), json!([1, 2]))].into_iter().collect();
        let b: AttributeMap = [("x".to_string(), json!([1, 2]))].into_iter().collect();
        let merged = merge_widget(&[&a, &b]);
        assert_eq!(merged["x"], MergedAttribute::Identical(json!([1, 2])));
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            (-3i64..3).prop_map(|i| json!(i)),
            (-3i64..3).prop_map(|i| json!(i as f64)),
            (-3i64..3).prop_map(|i| json!(i as f64 + 0.5)),
            "[ab]{0,2}".prop_map(Value::String),
            (-3i64..3).prop_map(|i| json!(format!("@Tcl_Obj: type=pixel, value={i}"))),
        ];
        leaf.prop_recursive(2, 8, 3, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
                prop::collection::btree_map("[xy]", inner, 0..3)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    fn arb_snapshot() -> impl Strategy<Value = Snapshot> {
        prop::collection::btree_map(
            "(Button|Label|Entry)",
            prop::collection::btree_map("(bg|fg|width)", arb_value(), 0..3),
            0..3,
        )
        .prop_map(Snapshot::from)
    }

    proptest! {
        #[test]
        fn merge_is_order_independent(
            (original, shuffled) in prop::collection::vec(arb_snapshot(), 1..5)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            let a = serde_json::to_value(merge_data(&original)).unwrap();
            let b = serde_json::to_value(merge_data(&shuffled)).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn report_covers_every_input_key(snaps in prop::collection::vec(arb_snapshot(), 0..5)) {
            let report = merge_data(&snaps);
            for s in &snaps {
                for (class, attrs) in s.iter() {
                    for attr in attrs.keys() {
                        prop_assert!(report.get(class, attr).is_some());
                    }
                }
            }
        }

        #[test]
        fn single_snapshot_is_all_identical(s in arb_snapshot()) {
            let report = merge_data(std::slice::from_ref(&s));
            for (class, attrs) in s.iter() {
                for (attr, value) in attrs {
                    prop_assert_eq!(
                        report.get(class, attr),
                        Some(&MergedAttribute::Identical(value.clone()))
                    );
                }
            }
        }
    }
}
