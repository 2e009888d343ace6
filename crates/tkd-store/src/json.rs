//! JSON reading and deterministic writing.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;
use tkd_types::Snapshot;

use crate::error::{StoreError, StoreResult};

/// Read and parse a JSON document.
pub fn read_json(path: &Path) -> StoreResult<Value> {
    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a snapshot document, failing if it is not an object of objects.
pub fn read_snapshot(path: &Path) -> StoreResult<Snapshot> {
    let value = read_json(path)?;
    Snapshot::from_value(value).map_err(|source| StoreError::MalformedSnapshot {
        path: path.to_path_buf(),
        source,
    })
}

/// Render `value` with sorted keys. `indent == 0` gives compact output.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, indent: usize) -> StoreResult<String> {
    let bytes = if indent == 0 {
        serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))?
    } else {
        let indent = " ".repeat(indent);
        let mut out = Vec::new();
        let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
        value
            .serialize(&mut ser)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        out
    };
    String::from_utf8(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Write `value` to `path` followed by a newline, replacing any existing file.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, indent: usize) -> StoreResult<()> {
    let mut text = to_json_string(value, indent)?;
    text.push('\n');
    fs::write(path, text).map_err(|e| StoreError::io(path, e))
}
