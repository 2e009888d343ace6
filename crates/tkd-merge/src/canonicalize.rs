//! Value canonicalization.
//!
//! Maps any captured value to a [`CanonicalForm`]. Total: unknown shapes fall
//! through to a generic `@Py_<type>` form rather than failing.

use serde_json::{Number, Value};
use tkd_types::canonical::{TAG_BOOL, TAG_FLOAT, TAG_INT, TAG_NONE, TAG_STR};
use tkd_types::{render, CanonicalForm, OpaqueHandle};

/// Compute the canonical form of a captured value.
///
/// - handle marker -> `(declared type, textual form)`
/// - string -> `("@Py_str", s)`
/// - bool -> `("@Py_bool", "True" | "False")`, never folded into integers
/// - integer -> `("@Py_int", decimal)`
/// - float -> `("@Py_float", text)`, integral floats print without a fraction
/// - null -> `("@Py_None", "None")`
/// - list / mapping -> `("@Py_list" | "@Py_dict", rendered value)`
pub fn canonicalize(value: &Value) -> CanonicalForm {
    match value {
        Value::String(s) => match OpaqueHandle::parse(s) {
            Some(handle) => CanonicalForm::new(handle.type_name, handle.value),
            None => CanonicalForm::new(TAG_STR, s.as_str()),
        },
        // JSON keeps booleans apart from numbers, so this arm can never see 1/0.
        Value::Bool(b) => CanonicalForm::new(TAG_BOOL, if *b { "True" } else { "False" }),
        Value::Number(n) => canonicalize_number(n),
        Value::Null => CanonicalForm::new(TAG_NONE, "None"),
        Value::Array(_) => CanonicalForm::fallback("list", render::repr(value)),
        Value::Object(_) => CanonicalForm::fallback("dict", render::repr(value)),
    }
}

fn canonicalize_number(n: &Number) -> CanonicalForm {
    if let Some(u) = n.as_u64() {
        CanonicalForm::new(TAG_INT, u.to_string())
    } else if let Some(i) = n.as_i64() {
        CanonicalForm::new(TAG_INT, i.to_string())
    } else {
        match n.as_f64() {
            Some(f) => CanonicalForm::new(TAG_FLOAT, float_text(f)),
            None => CanonicalForm::fallback("float", n.to_string()),
        }
    }
}

/// Textual form of a float: integral values drop the fraction (`2.0` -> `"2"`).
pub fn float_text(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        if f == 0.0 {
            "0".to_string()
        } else {
            format!("{f:.0}")
        }
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn form(tag: &str, text: &str) -> CanonicalForm {
        CanonicalForm::new(tag, text)
    }

    #[test]
    fn strings() {
        assert_eq!(canonicalize(&json!("white")), form("@Py_str", "white"));
        assert_eq!(canonicalize(&json!("")), form("@Py_str", ""));
    }

    #[test]
    fn repr_markers_are_plain_strings() {
        assert_eq!(
            canonicalize(&json!("@repr:<Foo>")),
            form("@Py_str", "@repr:<Foo>")
        );
    }

    #[test]
    fn handles_use_declared_type() {
        assert_eq!(
            canonicalize(&json!("@Tcl_Obj: type=pixel, value=2")),
            form("pixel", "2")
        );
    }

    #[test]
    fn booleans_are_not_integers() {
        let t = canonicalize(&json!(true));
        let one = canonicalize(&json!(1));
        assert_eq!(t, form("@Py_bool", "True"));
        assert_eq!(one, form("@Py_int", "1"));
        assert_ne!(t, one);
        assert_eq!(canonicalize(&json!(false)), form("@Py_bool", "False"));
    }

    #[test]
    fn integers() {
        assert_eq!(canonicalize(&json!(0)), form("@Py_int", "0"));
        assert_eq!(canonicalize(&json!(-12)), form("@Py_int", "-12"));
        assert_eq!(
            canonicalize(&json!(u64::MAX)),
            form("@Py_int", "18446744073709551615")
        );
    }

    #[test]
    fn integral_float_matches_integer_text() {
        let i = canonicalize(&json!(2));
        let f = canonicalize(&json!(2.0));
        assert_eq!(f, form("@Py_float", "2"));
        assert_eq!(i.text, f.text);
        assert_ne!(i.type_tag, f.type_tag);
    }

    #[test]
    fn fractional_floats_keep_fraction() {
        assert_eq!(canonicalize(&json!(2.5)), form("@Py_float", "2.5"));
        assert_ne!(canonicalize(&json!(2.5)).text, canonicalize(&json!(2.0)).text);
    }

    #[test]
    fn float_text_edge_cases() {
        assert_eq!(float_text(-0.0), "0");
        assert_eq!(float_text(-3.0), "-3");
        assert_eq!(float_text(1e20), "100000000000000000000");
        assert_eq!(float_text(0.1), "0.1");
    }

    #[test]
    fn null() {
        assert_eq!(canonicalize(&json!(null)), form("@Py_None", "None"));
    }

    #[test]
    fn containers_fall_back() {
        assert_eq!(
            canonicalize(&json!([1, "a"])),
            form("@Py_list", "[1, 'a']")
        );
        assert_eq!(
            canonicalize(&json!({"k": null})),
            form("@Py_dict", "{'k': None}")
        );
    }

    proptest! {
        #[test]
        fn unmarked_strings_keep_their_text(s in "[a-zA-Z0-9 #.-]*") {
            let f = canonicalize(&Value::String(s.clone()));
            prop_assert_eq!(f.type_tag, "@Py_str");
            prop_assert_eq!(f.text, s);
        }

        #[test]
        fn integer_and_integral_float_share_text(i in -1_000_000i64..1_000_000) {
            let a = canonicalize(&json!(i));
            let b = canonicalize(&json!(i as f64));
            prop_assert_eq!(a.text, b.text);
        }
    }
}
