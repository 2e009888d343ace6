//! Opaque-handle markers.
//!
//! The capture step cannot serialize native toolkit objects directly. It
//! records them as strings of the form `@Tcl_Obj: type=<T>, value=<V>`, keeping
//! the object's declared type name and its textual form. Values it could not
//! classify at all are written as `@repr:<R>`; those carry no type name and are
//! treated as ordinary strings.

use std::fmt;

/// Prefix of a typed opaque-handle marker.
pub const HANDLE_PREFIX: &str = "@Tcl_Obj: type=";

/// Separator between the type name and the textual form.
const VALUE_SEPARATOR: &str = ", value=";

/// Prefix of an untyped fallback marker.
pub const REPR_PREFIX: &str = "@repr:";

/// A native object captured as its declared type name and textual form.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpaqueHandle {
    /// The object's declared type name (e.g. `pixel`, `color`).
    pub type_name: String,
    /// The object's textual form.
    pub value: String,
}

impl OpaqueHandle {
    pub fn new(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            value: value.into(),
        }
    }

    /// Parse a marker string. Returns `None` if `s` is not a typed marker.
    ///
    /// The type name ends at the first `", value="`; everything after it is
    /// the textual form, which may itself contain the separator.
    pub fn parse(s: &str) -> Option<Self> {
        let rest = s.strip_prefix(HANDLE_PREFIX)?;
        let (type_name, value) = rest.split_once(VALUE_SEPARATOR)?;
        Some(Self::new(type_name, value))
    }

    /// Render the marker string this handle was (or would be) captured as.
    pub fn to_marker(&self) -> String {
        format!("{HANDLE_PREFIX}{}{VALUE_SEPARATOR}{}", self.type_name, self.value)
    }
}

impl fmt::Display for OpaqueHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_marker())
    }
}

/// Returns `true` if `s` is an untyped `@repr:` fallback marker.
pub fn is_repr_marker(s: &str) -> bool {
    s.starts_with(REPR_PREFIX)
}
