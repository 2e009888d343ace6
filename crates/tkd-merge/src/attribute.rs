//! Per-attribute merge.

use std::collections::BTreeSet;

use serde_json::Value;
use tkd_types::MergedAttribute;

use crate::canonicalize::canonicalize;
use crate::dedup::dedup;
use crate::ordering::sort_values;

/// Classify the values one attribute takes across the snapshots that have it.
///
/// 1. One distinct raw value -> `Identical`. This includes the case of a
///    single observation.
/// 2. Otherwise, if every raw value has the same canonical string form ->
///    `TypeDiff` with the sorted distinct type tags.
/// 3. Otherwise -> `Different` with the sorted distinct raw values.
///
/// Returns `None` only when `values` is empty.
pub fn merge_attribute(values: &[&Value]) -> Option<MergedAttribute> {
    let mut distinct = dedup(values);
    match distinct.as_slice() {
        [] => return None,
        [only] => return Some(MergedAttribute::Identical((*only).clone())),
        _ => {}
    }

    let forms: BTreeSet<_> = values.iter().map(|v| canonicalize(v)).collect();
    let mut texts = forms.iter().map(|f| f.text.as_str());
    if let Some(text) = texts.next() {
        if texts.all(|t| t == text) {
            let types: BTreeSet<&str> = forms.iter().map(|f| f.type_tag.as_str()).collect();
            return Some(MergedAttribute::TypeDiff {
                count: distinct.len(),
                value: text.to_string(),
                types: types.into_iter().map(str::to_owned).collect(),
            });
        }
    }

    sort_values(&mut distinct);
    Some(MergedAttribute::Different {
        count: distinct.len(),
        values: distinct.into_iter().cloned().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn merge(vals: &[Value]) -> MergedAttribute {
        let refs: Vec<&Value> = vals.iter().collect();
        merge_attribute(&refs).unwrap()
    }

    #[test]
    fn empty_has_no_outcome() {
        assert!(merge_attribute(&[]).is_none());
    }

    #[test]
    fn single_observation_is_identical() {
        assert_eq!(
            merge(&[json!({"nested": [1]})]),
            MergedAttribute::Identical(json!({"nested": [1]}))
        );
    }

    #[test]
    fn equal_values_are_identical() {
        assert_eq!(
            merge(&[json!("white"), json!("white"), json!("white")]),
            MergedAttribute::Identical(json!("white"))
        );
    }

    #[test]
    fn handle_and_int_are_type_diff() {
        assert_eq!(
            merge(&[json!("@Tcl_Obj: type=pixel, value=2"), json!(2)]),
            MergedAttribute::TypeDiff {
                count: 2,
                value: "2".into(),
                types: vec!["@Py_int".into(), "pixel".into()],
            }
        );
    }

    #[test]
    fn int_and_integral_float_are_type_diff() {
        assert_eq!(
            merge(&[json!(2.0), json!(2), json!(2)]),
            MergedAttribute::TypeDiff {
                count: 2,
                value: "2".into(),
                types: vec!["@Py_float".into(), "@Py_int".into()],
            }
        );
    }

    #[test]
    fn string_and_handle_with_same_text_are_type_diff() {
        assert_eq!(
            merge(&[json!("raised"), json!("@Tcl_Obj: type=relief, value=raised")]),
            MergedAttribute::TypeDiff {
                count: 2,
                value: "raised".into(),
                types: vec!["@Py_str".into(), "relief".into()],
            }
        );
    }

    #[test]
    fn bool_and_int_are_different() {
        assert_eq!(
            merge(&[json!(true), json!(1)]),
            MergedAttribute::Different {
                count: 2,
                values: vec![json!(1), json!(true)],
            }
        );
    }

    #[test]
    fn different_values_are_sorted_and_counted() {
        assert_eq!(
            merge(&[json!("c"), json!("a"), json!("c"), json!("b")]),
            MergedAttribute::Different {
                count: 3,
                values: vec![json!("a"), json!("b"), json!("c")],
            }
        );
    }

    #[test]
    fn different_with_incomparable_values() {
        let m = merge(&[json!({"a": 1}), json!("x"), json!([1])]);
        match m {
            MergedAttribute::Different { count, values } => {
                assert_eq!(count, 3);
                assert_eq!(values, vec![json!([1]), json!("x"), json!({"a": 1})]);
            }
            other => panic!("expected Different, got {other:?}"),
        }
    }

    #[test]
    fn partial_text_agreement_is_different() {
        let m = merge(&[json!(2), json!("@Tcl_Obj: type=pixel, value=2"), json!(3)]);
        assert_eq!(
            m,
            MergedAttribute::Different {
                count: 3,
                values: vec![
                    json!(2),
                    json!(3),
                    json!("@Tcl_Obj: type=pixel, value=2"),
                ],
            }
        );
    }
}
