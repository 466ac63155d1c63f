//! JSON <-> sorrel Value conversion utilities

use crate::Value;

/// Convert serde_json::Value to a sorrel Value
///
/// Object keys land in a `BTreeMap`, so any insertion order the JSON text
/// had is replaced by natural key order.
pub fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else {
                Value::Float(n.as_f64().unwrap())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => {
            Value::Array(arr.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(obj) => {
            Value::Object(obj.into_iter().map(|(k, v)| (k, json_to_value(v))).collect())
        }
    }
}

/// Convert a sorrel Value to serde_json::Value
pub fn value_to_json(v: Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(b),
        Value::Integer(i) => serde_json::Value::Number(i.into()),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s),
        Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(value_to_json).collect())
        }
        Value::Object(obj) => serde_json::Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, value_to_json(v)))
                .collect(),
        ),
    }
}

#[test]
fn test_numbers_keep_their_kind() {
    let v = json_to_value(serde_json::json!([7, 2.5]));
    assert_eq!(
        v,
        Value::Array(vec![Value::Integer(7), Value::Float(2.5)])
    );
}

#[test]
fn test_object_keys_come_back_sorted() {
    let v = json_to_value(serde_json::json!({"zoo": 1, "ant": 2}));
    let Value::Object(map) = v else {
        panic!("Expected an object");
    };
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["ant", "zoo"]);
}
