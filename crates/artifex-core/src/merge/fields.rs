//! Field-level payload semantics
//!
//! - scalars and objects overwrite
//! - `null` clears the field
//! - arrays merge (existing order, then new distinct entries) unless the
//!   sibling `<field>_replace` is `true`
//! - `*_replace` keys are directives and are never stored

use serde_json::{Map, Value};
use std::collections::BTreeMap;

const REPLACE_SUFFIX: &str = "_replace";

pub fn is_directive(key: &str) -> bool {
    key.len() > REPLACE_SUFFIX.len() && key.ends_with(REPLACE_SUFFIX)
}

fn replace_requested(payload: &Map<String, Value>, field: &str) -> bool {
    matches!(
        payload.get(&format!("{}{}", field, REPLACE_SUFFIX)),
        Some(Value::Bool(true))
    )
}

/// Append entries of `incoming` not already present, keeping order
pub fn merge_array(existing: &mut Vec<Value>, incoming: &[Value]) {
    for value in incoming {
        if !existing.contains(value) {
            existing.push(value.clone());
        }
    }
}

/// Apply an ADD or EDIT payload to an item's fields
pub fn apply_payload(fields: &mut BTreeMap<String, Value>, payload: &Map<String, Value>) {
    for (key, value) in payload {
        if is_directive(key) {
            continue;
        }
        match value {
            Value::Null => {
                fields.remove(key);
            }
            Value::Array(incoming) if !replace_requested(payload, key) => {
                match fields.get_mut(key) {
                    Some(Value::Array(existing)) => merge_array(existing, incoming),
                    _ => {
                        let mut fresh = Vec::with_capacity(incoming.len());
                        merge_array(&mut fresh, incoming);
                        fields.insert(key.clone(), Value::Array(fresh));
                    }
                }
            }
            other => {
                fields.insert(key.clone(), other.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> BTreeMap<String, Value> {
        match value {
            Value::Object(map) => map.into_iter().collect(),
            _ => BTreeMap::new(),
        }
    }

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn arrays_merge_by_default() {
        let mut f = fields(json!({"anchors": ["§161", "§170"]}));
        apply_payload(&mut f, &payload(json!({"anchors": ["§170", "§205"]})));
        assert_eq!(f["anchors"], json!(["§161", "§170", "§205"]));
    }

    #[test]
    fn replace_flag_is_per_field() {
        let mut f = fields(json!({"anchors": ["§161"], "discriminates": ["H1"]}));
        apply_payload(
            &mut f,
            &payload(json!({
                "anchors": ["§205", "§212"],
                "anchors_replace": true,
                "discriminates": ["H2"],
            })),
        );
        assert_eq!(f["anchors"], json!(["§205", "§212"]));
        assert_eq!(f["discriminates"], json!(["H1", "H2"]));
        assert!(!f.contains_key("anchors_replace"));
    }

    #[test]
    fn replace_false_still_merges() {
        let mut f = fields(json!({"anchors": ["§1"]}));
        apply_payload(&mut f, &payload(json!({"anchors": ["§2"], "anchors_replace": false})));
        assert_eq!(f["anchors"], json!(["§1", "§2"]));
    }

    #[test]
    fn scalars_overwrite_and_null_clears() {
        let mut f = fields(json!({"claim": "old", "mechanism": "m", "predictions": {"H1": "up"}}));
        apply_payload(
            &mut f,
            &payload(json!({"claim": "new", "mechanism": null, "predictions": {"H2": "down"}})),
        );
        assert_eq!(f["claim"], json!("new"));
        assert!(!f.contains_key("mechanism"));
        assert_eq!(f["predictions"], json!({"H2": "down"}));
    }

    #[test]
    fn array_over_scalar_replaces_it() {
        let mut f = fields(json!({"anchors": "§4"}));
        apply_payload(&mut f, &payload(json!({"anchors": ["§5", "§5"]})));
        assert_eq!(f["anchors"], json!(["§5"]));
    }
}
