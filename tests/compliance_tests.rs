// tests/compliance_tests.rs
//
// End-to-end scenario tables over realistic documents, run with explicit
// evaluation options so cases stay independent of process-wide state.

use serde_json::json;
use sorrel::cli::json_to_value;
use sorrel::{parse, set_auto_id_field, EvalOptions, Value};

fn doc(j: serde_json::Value) -> Value {
    json_to_value(j)
}

fn find_values(expression: &str, document: &Value, options: &EvalOptions) -> Vec<Value> {
    parse(expression)
        .unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", expression, e))
        .find_with(document, options)
        .unwrap_or_else(|e| panic!("Failed to evaluate {:?}: {}", expression, e))
        .into_iter()
        .map(|m| m.into_value())
        .collect()
}

fn find_paths(expression: &str, document: &Value, options: &EvalOptions) -> Vec<String> {
    parse(expression)
        .unwrap_or_else(|e| panic!("Failed to parse {:?}: {}", expression, e))
        .find_with(document, options)
        .unwrap_or_else(|e| panic!("Failed to evaluate {:?}: {}", expression, e))
        .iter()
        .map(|m| m.path().to_string())
        .collect()
}

fn plain() -> EvalOptions {
    EvalOptions::default()
}

fn with_id() -> EvalOptions {
    EvalOptions {
        auto_id_field: Some("id".to_string()),
    }
}

fn check_values(cases: Vec<(&str, serde_json::Value, serde_json::Value)>, options: &EvalOptions) {
    for (expression, document, expected) in cases {
        let expected = match doc(expected) {
            Value::Array(items) => items,
            other => vec![other],
        };
        assert_eq!(
            find_values(expression, &doc(document), options),
            expected,
            "Failed for: {}",
            expression
        );
    }
}

// ============================================================================
// Core Navigation
// ============================================================================

#[test]
fn test_fields_table() {
    check_values(
        vec![
            ("foo", json!({"foo": "baz"}), json!(["baz"])),
            ("foo,baz", json!({"foo": 1, "baz": 2}), json!([1, 2])),
            ("@foo", json!({"@foo": 1}), json!([1])),
            ("foo.baz", json!({"foo": {"baz": 3}}), json!([3])),
            ("foo.baz", json!({"foo": {"baz": [3]}}), json!([[3]])),
            ("foo.baz.bizzle", json!({"foo": {"baz": {"bizzle": 5}}}), json!([5])),
            ("foo.bar-baz", json!({"foo": {"bar-baz": 3}}), json!([3])),
        ],
        &plain(),
    );
}

#[test]
fn test_index_table() {
    check_values(
        vec![
            ("[0]", json!([42]), json!([42])),
            ("[5]", json!([42]), json!([])),
            ("[2]", json!([34, 65, 29, 59]), json!([29])),
            ("[0]", json!(None::<i64>), json!([])),
            ("[-1]", json!([34, 65, 29]), json!([29])),
        ],
        &plain(),
    );
}

#[test]
fn test_slice_table() {
    check_values(
        vec![
            ("[*]", json!([1, 2, 3]), json!([1, 2, 3])),
            ("[*]", json!(1), json!([1])),
            ("[1:]", json!([1, 2, 3, 4]), json!([2, 3, 4])),
            ("[:2]", json!([1, 2, 3, 4]), json!([1, 2])),
        ],
        &plain(),
    );
}

#[test]
fn test_root_this_parent_table() {
    check_values(
        vec![
            ("$", json!({"foo": "baz"}), json!([{"foo": "baz"}])),
            ("foo.$", json!({"foo": "baz"}), json!([{"foo": "baz"}])),
            ("foo.$.foo", json!({"foo": "baz"}), json!(["baz"])),
            ("`this`", json!({"foo": "baz"}), json!([{"foo": "baz"}])),
            ("foo.`this`", json!({"foo": "baz"}), json!(["baz"])),
            ("foo.`this`.baz", json!({"foo": {"baz": 3}}), json!([3])),
            ("foo.baz.`parent`", json!({"foo": {"baz": 3}}), json!([{"baz": 3}])),
            (
                "foo.`parent`.foo.baz",
                json!({"foo": {"baz": 3}}),
                json!([3]),
            ),
        ],
        &plain(),
    );
}

#[test]
fn test_descendants_table() {
    check_values(
        vec![
            (
                "foo..baz",
                json!({"foo": {"baz": 1, "bing": {"baz": 2}}}),
                json!([1, 2]),
            ),
            (
                "foo..baz",
                json!({"foo": [{"baz": 1}, {"baz": 2}]}),
                json!([1, 2]),
            ),
        ],
        &plain(),
    );
}

// ============================================================================
// Path Reification
// ============================================================================

#[test]
fn test_paths_table() {
    let cases = vec![
        ("foo", json!({"foo": "baz"}), "foo"),
        ("foo.baz", json!({"foo": {"baz": 3}}), "foo.baz"),
        ("[0]", json!([1]), "[0]"),
        ("$", json!({"foo": "baz"}), "$"),
        ("`this`", json!({"foo": "baz"}), "`this`"),
    ];

    for (expression, document, expected) in cases {
        assert_eq!(
            find_paths(expression, &doc(document), &plain()),
            vec![expected],
            "Failed for: {}",
            expression
        );
    }
}

// ============================================================================
// Auto-Id
// ============================================================================

#[test]
fn test_auto_id_values() {
    check_values(
        vec![
            // a scalar member: its own ancestry names it
            ("foo.id", json!({"foo": "baz"}), json!(["foo"])),
            // a real id on the way shadows the segment
            ("foo.id", json!({"foo": {"id": "baz"}}), json!(["baz"])),
            ("id", json!({"foo": "baz"}), json!(["`this`"])),
            ("$.id", json!({"foo": "baz"}), json!(["$"])),
            (
                "foo.baz.id",
                json!({"foo": {"id": "bizzle", "baz": 3}}),
                json!(["bizzle.baz"]),
            ),
            (
                "foo.baz.id",
                json!({"foo": {"baz": {"id": "hi"}}}),
                json!(["foo.hi"]),
            ),
            // numeric ids render through their string form
            (
                "foo.baz.id",
                json!({"foo": {"baz": {"id": 3}}}),
                json!(["foo.3"]),
            ),
        ],
        &with_id(),
    );
}

#[test]
fn test_auto_id_over_wildcard() {
    let d = doc(json!({"foo": {"id": 1}, "baz": 2}));
    let mut found = find_values("*.id", &d, &with_id());
    found.sort_by(|a, b| a.as_string().cmp(&b.as_string()));
    assert_eq!(found, vec![doc(json!("1")), doc(json!("baz"))]);
}

#[test]
fn test_wildcard_includes_a_synthetic_id_member() {
    let d = doc(json!({"foo": 1, "baz": 2}));
    // natural key order, then the synthesized id
    assert_eq!(
        find_values("*", &d, &with_id()),
        vec![doc(json!(2)), doc(json!(1)), doc(json!("`this`"))]
    );
    assert_eq!(find_values("*", &d, &plain()).len(), 2);
}

#[test]
fn test_synthetic_ids_have_no_children() {
    let d = doc(json!({"foo": {"id": "x", "child": 1}}));
    // the synthetic datum is terminal even though a real key backs it
    assert_eq!(find_values("foo.id.child", &d, &with_id()), vec![]);
}

#[test]
fn test_auto_id_path_is_the_field_name() {
    let d = doc(json!({"foo": "baz"}));
    assert_eq!(find_paths("foo.id", &d, &with_id()), vec!["foo.id"]);
}

#[test]
fn test_custom_auto_id_field_name() {
    let options = EvalOptions {
        auto_id_field: Some("_key".to_string()),
    };
    let d = doc(json!({"foo": {"_key": "k1"}}));
    assert_eq!(
        find_values("foo._key", &d, &options),
        vec![doc(json!("k1"))]
    );
}

#[test]
fn test_global_default_auto_id() {
    let d = doc(json!({"foo": "baz"}));
    let expr = parse("foo.id").unwrap();

    set_auto_id_field(Some("id".to_string()));
    let with_default: Vec<Value> = expr
        .find(&d)
        .unwrap()
        .into_iter()
        .map(|m| m.into_value())
        .collect();
    set_auto_id_field(None);

    assert_eq!(with_default, vec![doc(json!("foo"))]);
    // disabled again: no id key exists, so nothing matches
    assert_eq!(expr.find(&d).unwrap(), vec![]);
}

// ============================================================================
// Reference Scenarios
// ============================================================================

#[test]
fn test_real_life_metric_lookup() {
    let d = doc(json!({"payload": {"metrics": [
        {"name": "cpu.frequency", "value": 1600},
        {"name": "cpu.user.time", "value": 10},
    ]}}));
    check_values(
        vec![(
            "payload.metrics[?(@.name = 'cpu.frequency')].value",
            json!({"payload": {"metrics": [
                {"name": "cpu.frequency", "value": 1600},
                {"name": "cpu.user.time", "value": 10},
            ]}}),
            json!([1600]),
        )],
        &plain(),
    );
    assert_eq!(
        find_paths(
            "payload.metrics[?(@.name = 'cpu.frequency')].value",
            &d,
            &plain(),
        ),
        vec!["payload.metrics.[0].value"]
    );
}

#[test]
fn test_store_catalog_walk() {
    let d = doc(json!({"store": {"book": [
        {"title": "Sayings", "price": 8.95},
        {"title": "Sword", "price": 12.99},
    ]}}));
    check_values(
        vec![
            (
                "$.store.book[*].title",
                json!({"store": {"book": [
                    {"title": "Sayings", "price": 8.95},
                    {"title": "Sword", "price": 12.99},
                ]}}),
                json!(["Sayings", "Sword"]),
            ),
            (
                "$.store..price",
                json!({"store": {"book": [
                    {"title": "Sayings", "price": 8.95},
                    {"title": "Sword", "price": 12.99},
                ]}}),
                json!([8.95, 12.99]),
            ),
        ],
        &plain(),
    );
    assert_eq!(
        find_paths("store.book[?price<10].title", &d, &plain()),
        vec!["store.book.[0].title"]
    );
}
