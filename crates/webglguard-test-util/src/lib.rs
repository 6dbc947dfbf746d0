//! Shared test utilities for the webglguard workspace.
//!
//! Integration tests in other crates use these, so they cannot live behind
//! `#[cfg(test)]` in `webglguard-types`.

use serde_json::Value;

const ENVELOPE_KEYS: [&str; 7] = [
    "schema",
    "tool",
    "started_at",
    "finished_at",
    "verdict",
    "results",
    "data",
];

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// `tool.version` is replaced with `"__VERSION__"` only on a root object that
/// carries every report envelope key. Timestamps (`started_at`, `finished_at`)
/// are replaced with `"__TIMESTAMP__"` at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ENVELOPE_KEYS.iter().all(|key| obj.contains_key(*key));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if let Some(slot) = map.get_mut(key) {
                    *slot = Value::String("__TIMESTAMP__".to_string());
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}
