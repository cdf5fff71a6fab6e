use serde_json::{Map, Value};

/// Merges `patch` into `base` key by key. Two objects under the same key merge
/// recursively; any other pairing, arrays included, takes the patch value.
pub fn deep_merge(base: &mut Map<String, Value>, patch: Map<String, Value>) {
    for (key, incoming) in patch {
        let Value::Object(incoming) = incoming else {
            base.insert(key, incoming);
            continue;
        };
        if let Some(Value::Object(existing)) = base.get_mut(&key) {
            deep_merge(existing, incoming);
            continue;
        }
        base.insert(key, Value::Object(incoming));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn merged(base: Value, patch: Value) -> Value {
        let (Value::Object(mut base), Value::Object(patch)) = (base, patch) else {
            panic!("objects expected");
        };
        deep_merge(&mut base, patch);
        Value::Object(base)
    }

    #[test]
    fn nested_objects_merge() {
        let out = merged(
            json!({"a": {"x": 1, "y": 2}, "b": 1}),
            json!({"a": {"y": 3, "z": 4}}),
        );
        assert_eq!(out, json!({"a": {"x": 1, "y": 3, "z": 4}, "b": 1}));
    }

    #[test]
    fn arrays_are_replaced() {
        let out = merged(json!({"a": [1, 2, 3]}), json!({"a": [4]}));
        assert_eq!(out, json!({"a": [4]}));
    }

    #[test]
    fn object_replaces_scalar_and_scalar_replaces_object() {
        let out = merged(
            json!({"a": 1, "b": {"x": 1}}),
            json!({"a": {"x": 2}, "b": "flat"}),
        );
        assert_eq!(out, json!({"a": {"x": 2}, "b": "flat"}));
    }

    #[test]
    fn explicit_null_overwrites() {
        let out = merged(json!({"a": {"x": 1}}), json!({"a": null}));
        assert_eq!(out, json!({"a": null}));
    }
}
