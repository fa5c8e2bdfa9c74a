use super::*;

fn record(id: i64) -> ErrorRecord {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "expression": "3 + 4",
        "correct_answer": 7.0,
        "user_answer": 8.0,
        "answer_time": 2.5,
        "completion_time": "2024-05-01 10:00:00",
        "difficulty": "simple",
        "error_count": 1,
        "is_exported": false,
        "export_time": null
    }))
    .unwrap()
}

// =============================================================
// Selection
// =============================================================

#[test]
fn toggle_adds_then_removes() {
    let mut selection = Selection::default();
    selection.toggle(4);
    assert!(selection.contains(4));
    selection.toggle(4);
    assert!(!selection.contains(4));
    assert!(selection.is_empty());
}

#[test]
fn ids_are_sorted() {
    let mut selection = Selection::default();
    for id in [9, 2, 5] {
        selection.toggle(id);
    }
    assert_eq!(selection.ids(), vec![2, 5, 9]);
}

#[test]
fn retain_present_drops_vanished_rows() {
    let mut selection = Selection::default();
    selection.toggle(1);
    selection.toggle(2);
    selection.retain_present(&[record(2), record(3)]);
    assert_eq!(selection.ids(), vec![2]);
}

// =============================================================
// Helpers
// =============================================================

#[test]
fn difficulty_labels_are_lowercase() {
    assert_eq!(difficulty_label(Difficulty::Simple), "simple");
    assert_eq!(difficulty_label(Difficulty::Hard), "hard");
}

#[test]
fn date_filter_treats_blank_as_none() {
    assert_eq!(date_filter("   "), None);
    assert_eq!(date_filter(" 2024-05-01 "), Some("2024-05-01".to_owned()));
}
