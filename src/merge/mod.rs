//! Deep merge with array append
//!
//! Arrays on the base side are extended rather than replaced, objects merge
//! key by key, and any other overlay value replaces the base value.

use crate::index::TypeIndex;
use serde_json::Value;

/// Merge `overlay` into `base`, returning the combined value.
///
/// - base array: overlay elements are appended (a non-array overlay is
///   appended as a single element). No deduplication.
/// - both objects: keys unique to either side pass through, shared keys
///   recurse.
/// - anything else: the overlay wins, `null` included.
pub fn merge_values(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Array(mut items), Value::Array(extra)) => {
            items.extend(extra);
            Value::Array(items)
        }
        (Value::Array(mut items), single) => {
            items.push(single);
            Value::Array(items)
        }
        (Value::Object(mut target), Value::Object(extra)) => {
            for (key, overlay_value) in extra {
                match target.get_mut(&key) {
                    Some(existing) => {
                        let current = std::mem::take(existing);
                        *existing = merge_values(current, overlay_value);
                    }
                    None => {
                        target.insert(key, overlay_value);
                    }
                }
            }
            Value::Object(target)
        }
        (_, overlay) => overlay,
    }
}

/// Fold `overrides` into `base`.
///
/// Keys only present in `overrides` are appended in override order; shared
/// keys keep their base position and hold the [`merge_values`] result.
pub fn merge_indices(mut base: TypeIndex, overrides: TypeIndex) -> TypeIndex {
    for (key, record) in overrides {
        match base.get_mut(&key) {
            Some(existing) => {
                tracing::debug!("merging override for '{}'", key);
                let current = std::mem::take(existing);
                *existing = merge_values(current, record);
            }
            None => {
                tracing::debug!("adding '{}' from overrides", key);
                base.insert(key, record);
            }
        }
    }
    base
}
