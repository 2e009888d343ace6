//! Textual rendering of captured values.
//!
//! Reports describe values in the notation of the capture tooling: `None`,
//! `True`/`False`, single-quoted strings, `[a, b]` lists, `{'k': v}` mappings.
//! [`repr`] quotes strings; [`to_text`] leaves a top-level string bare.

use serde_json::{Number, Value};

/// Quote a string, preferring single quotes.
pub fn repr_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Render a number. Integers print in decimal, floats keep their fraction.
pub fn repr_number(n: &Number) -> String {
    n.to_string()
}

/// Quoted rendering of any value.
pub fn repr(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => repr_number(n),
        Value::String(s) => repr_str(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(repr).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let items: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", repr_str(k), repr(v)))
                .collect();
            format!("{{{}}}", items.join(", "))
        }
    }
}

/// Unquoted rendering: strings as-is, everything else as [`repr`].
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => repr(other),
    }
}

/// Render a list of strings, e.g. `['@Py_int', 'pixel']`.
pub fn repr_str_list<S: AsRef<str>>(items: &[S]) -> String {
    let items: Vec<String> = items.iter().map(|s| repr_str(s.as_ref())).collect();
    format!("[{}]", items.join(", "))
}
