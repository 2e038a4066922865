use crate::error::CoreResult;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

// Canonical form feeding every checksum in this crate:
// - UTF-8 JSON, no BOM
// - keys sorted lexicographically at every nesting level
// - no insignificant whitespace
// - strings escaped per RFC 8259 (serde_json handles)
// Numbers pass through as serde_json prints them; ryu formatting is stable
// for a given value, so the bytes stay a pure function of content.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> CoreResult<Vec<u8>> {
    let v = serde_json::to_value(value)?;
    let normalized = normalize_value(v);
    let s = serde_json::to_string(&normalized)?;
    Ok(s.into_bytes())
}

fn normalize_value(v: Value) -> Value {
    match v {
        Value::Object(map) => {
            let mut btm: BTreeMap<String, Value> = BTreeMap::new();
            for (k, vv) in map {
                btm.insert(k, normalize_value(vv));
            }
            // serde_json::Map preserves insertion order; rebuild sorted.
            let mut out = serde_json::Map::new();
            for (k, vv) in btm {
                out.insert(k, vv);
            }
            Value::Object(out)
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(normalize_value).collect()),
        other => other,
    }
}
