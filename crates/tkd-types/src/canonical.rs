//! Canonical forms for loose value comparison.

use std::fmt;

/// Type tag for plain strings.
pub const TAG_STR: &str = "@Py_str";
/// Type tag for integers.
pub const TAG_INT: &str = "@Py_int";
/// Type tag for booleans.
pub const TAG_BOOL: &str = "@Py_bool";
/// Type tag for floats.
pub const TAG_FLOAT: &str = "@Py_float";
/// Type tag for null.
pub const TAG_NONE: &str = "@Py_None";

/// A `(type tag, string form)` pair.
///
/// Two values with equal string forms are "the same value" even when their
/// type tags differ: the integer `2` and a `pixel` handle with textual form
/// `2` share the string form `"2"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalForm {
    /// The representation type: one of the `@Py_*` tags or a handle's
    /// declared type name.
    pub type_tag: String,
    /// The value's textual form.
    pub text: String,
}

impl CanonicalForm {
    pub fn new(type_tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            text: text.into(),
        }
    }

    /// A form for a value with no dedicated tag, tagged `@Py_<type_name>`.
    pub fn fallback(type_name: &str, text: impl Into<String>) -> Self {
        Self::new(format!("@Py_{type_name}"), text)
    }
}

impl fmt::Display for CanonicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.type_tag)
    }
}
