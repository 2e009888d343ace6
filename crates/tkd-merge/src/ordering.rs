//! Ordering of distinct values for `Different` outcomes.
//!
//! Numbers and booleans order numerically, strings lexicographically, lists
//! element-wise. Values of unrelated kinds (a string and a number, two
//! mappings) have no natural order. When every pair in a batch is comparable
//! the batch is sorted naturally; otherwise it is sorted by textual form.
//! Either way the result is a deterministic total order.

use std::cmp::Ordering;

use serde_json::{Number, Value};
use tkd_types::render;

/// Natural order of two values, or `None` if they are not comparable.
///
/// Numerically equal values of different kinds (`1`, `1.0`, `true`) are
/// ordered integer, then float, then boolean.
pub fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Array(xs), Value::Array(ys)) => compare_seqs(xs, ys),
        (Value::Object(_), Value::Object(_)) if a == b => Some(Ordering::Equal),
        _ => {
            let x = Numeric::of(a)?;
            let y = Numeric::of(b)?;
            Some(x.cmp_value(&y)?.then(x.rank.cmp(&y.rank)))
        }
    }
}

fn compare_seqs(xs: &[Value], ys: &[Value]) -> Option<Ordering> {
    for (x, y) in xs.iter().zip(ys) {
        if x != y {
            return compare_values(x, y);
        }
    }
    Some(xs.len().cmp(&ys.len()))
}

/// A number or boolean viewed as a number.
struct Numeric {
    value: NumericValue,
    rank: u8,
}

enum NumericValue {
    Int(i128),
    Float(f64),
}

impl Numeric {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self {
                value: NumericValue::Int(i128::from(*b)),
                rank: 2,
            }),
            Value::Number(n) => Some(Self::of_number(n)),
            _ => None,
        }
    }

    fn of_number(n: &Number) -> Self {
        let value = if let Some(u) = n.as_u64() {
            NumericValue::Int(i128::from(u))
        } else if let Some(i) = n.as_i64() {
            NumericValue::Int(i128::from(i))
        } else {
            return Self {
                value: NumericValue::Float(n.as_f64().unwrap_or_default()),
                rank: 1,
            };
        };
        Self { value, rank: 0 }
    }

    fn as_f64(&self) -> f64 {
        match self.value {
            NumericValue::Int(i) => i as f64,
            NumericValue::Float(f) => f,
        }
    }

    fn cmp_value(&self, other: &Self) -> Option<Ordering> {
        match (&self.value, &other.value) {
            (NumericValue::Int(x), NumericValue::Int(y)) => Some(x.cmp(y)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

/// Kind rank used to separate values with the same textual form.
fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Sort distinct values into a deterministic order.
pub fn sort_values(values: &mut [&Value]) {
    let orderable = values
        .iter()
        .enumerate()
        .all(|(i, a)| values[i + 1..].iter().all(|b| compare_values(a, b).is_some()));

    if orderable {
        values.sort_by(|a, b| compare_values(a, b).unwrap_or(Ordering::Equal));
    } else {
        values.sort_by_cached_key(|v| (render::to_text(v), kind_rank(v), v.to_string()));
    }
}
