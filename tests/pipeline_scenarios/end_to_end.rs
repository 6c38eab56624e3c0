//! One upload per test, from trigger event to stored row

use crate::test_utils::{Harness, BUCKET, TABLE};
use recordingest::{IngestError, JsonKind, Outcome, Stage, TriggerEvent};
use std::collections::BTreeSet;

#[test]
fn test_valid_record_is_normalized_and_stored() {
    let h = Harness::new();
    let object = h.upload(
        "jane.json",
        r#"{"email": "Jane.Doe@Example.com", "first_name": "Jane"}"#,
    );

    let outcome = h.ingestor.handle_event(&TriggerEvent::for_object(&object));
    assert_eq!(
        outcome,
        Outcome::Stored {
            object,
            key: "jane.doe@example.com".into()
        }
    );

    let row = h.store.get_item(TABLE, "jane.doe@example.com").unwrap();
    assert_eq!(row.len(), 2);
    assert_eq!(row["email"], "jane.doe@example.com");
    assert_eq!(row["first_name"], "jane");
}

#[test]
fn test_invalid_email_is_dropped_without_write() {
    let h = Harness::new();
    let object = h.upload("bad.json", r#"{"email": "not-an-email"}"#);

    let outcome = h.ingestor.handle(&object);
    assert_eq!(
        outcome.error(),
        Some(&IngestError::InvalidEmail {
            value: "not-an-email".into()
        })
    );
    assert_eq!(h.store.version(), 0);
}

#[test]
fn test_forbidden_field_is_dropped_without_write() {
    let h = Harness::new();
    let object = h.upload("phone.json", r#"{"email": "a@b.com", "phone": "555"}"#);

    let outcome = h.ingestor.handle(&object);
    assert_eq!(
        outcome.error(),
        Some(&IngestError::ForbiddenFields {
            keys: BTreeSet::from(["phone".to_string()])
        })
    );
    assert_eq!(h.store.item_count(TABLE), 0);
}

#[test]
fn test_array_body_is_shape_error_in_acquire() {
    let h = Harness::new();
    let object = h.upload("list.json", "[1,2,3]");

    match h.ingestor.handle(&object) {
        Outcome::Dropped { stage, error, .. } => {
            assert_eq!(stage, Stage::Acquire);
            assert_eq!(
                error,
                IngestError::Shape {
                    actual: JsonKind::Array
                }
            );
        }
        other => panic!("expected Dropped, got {:?}", other),
    }
    assert_eq!(h.store.version(), 0);
}

#[test]
fn test_example_body_with_mixed_case_and_padding() {
    let h = Harness::new();
    let object = h.upload(
        "example.json",
        r#"{"Email": " User@Example.com ", "First_Name": " Jane "}"#,
    );

    assert!(h.ingestor.handle(&object).is_stored());
    let row = h.store.get_item(TABLE, "user@example.com").unwrap();
    assert_eq!(row["first_name"], "jane");
}

#[test]
fn test_empty_object_is_empty_input() {
    let h = Harness::new();
    let object = h.upload("empty.json", "{}");
    assert_eq!(h.ingestor.handle(&object).error(), Some(&IngestError::EmptyInput));
}

#[test]
fn test_missing_email_is_missing_field() {
    let h = Harness::new();
    let object = h.upload("noemail.json", r#"{"First_Name": "Jane"}"#);
    assert!(matches!(
        h.ingestor.handle(&object).error(),
        Some(IngestError::MissingField { field }) if field == "email"
    ));
}

#[test]
fn test_invalid_json_is_parse_error() {
    let h = Harness::new();
    let object = h.upload("broken.json", r#"{"email": "a@b.com""#);
    assert!(matches!(
        h.ingestor.handle(&object).error(),
        Some(IngestError::Parse { .. })
    ));
}

#[test]
fn test_missing_object_is_fetch_error() {
    let h = Harness::new();
    let event = TriggerEvent::from_json(&format!(
        r#"{{"Records":[{{"s3":{{"bucket":{{"name":"{}"}},"object":{{"key":"ghost.json"}}}}}}]}}"#,
        BUCKET
    ))
    .unwrap();

    match h.ingestor.handle_event(&event) {
        Outcome::Dropped { object, stage, error } => {
            assert_eq!(object.key, "ghost.json");
            assert_eq!(stage, Stage::Acquire);
            assert!(matches!(error, IngestError::FetchFailed { .. }));
        }
        other => panic!("expected Dropped, got {:?}", other),
    }
}

#[test]
fn test_reupload_replaces_row() {
    let h = Harness::new();
    let first = h.upload(
        "v1.json",
        r#"{"email": "a@b.com", "first_name": "Ann", "last_name": "Lee"}"#,
    );
    let second = h.upload("v2.json", r#"{"email": "A@B.com", "first_name": "Anne"}"#);

    assert!(h.ingestor.handle(&first).is_stored());
    assert!(h.ingestor.handle(&second).is_stored());

    let row = h.store.get_item(TABLE, "a@b.com").unwrap();
    assert_eq!(row["first_name"], "anne");
    assert!(!row.contains_key("last_name"));
    assert_eq!(h.store.item_count(TABLE), 1);
}

#[test]
fn test_failures_do_not_affect_later_events() {
    let h = Harness::new();
    let bad = h.upload("bad.json", "null");
    let good = h.upload("good.json", r#"{"email": "ok@example.org"}"#);

    assert!(!h.ingestor.handle(&bad).is_stored());
    assert!(h.ingestor.handle(&good).is_stored());
    assert_eq!(h.store.item_count(TABLE), 1);
}
