use super::*;
use serde_json::json;

#[test]
fn summarize_statistics_keeps_scalars() {
    let rows = summarize_statistics(&json!({
        "total_practices": 4,
        "accuracy": "87.5",
        "daily": [1, 2],
        "nested": {"a": 1}
    }));
    assert_eq!(
        rows,
        vec![
            ("accuracy".to_owned(), "87.5".to_owned()),
            ("total practices".to_owned(), "4".to_owned()),
        ]
    );
}

#[test]
fn summarize_statistics_ignores_non_objects() {
    assert!(summarize_statistics(&json!([1, 2, 3])).is_empty());
    assert!(summarize_statistics(&Value::Null).is_empty());
}
