//! Independent invocations sharing one store

use crate::test_utils::{Harness, TABLE};
use std::sync::Arc;
use std::thread;

#[test]
fn test_different_objects_in_parallel() {
    let h = Arc::new(Harness::new());
    let objects: Vec<_> = (0..20)
        .map(|i| {
            h.upload(
                &format!("user{}.json", i),
                &format!(r#"{{"email": "User{}@Example.com"}}"#, i),
            )
        })
        .collect();

    let handles: Vec<_> = objects
        .into_iter()
        .map(|object| {
            let h = Arc::clone(&h);
            thread::spawn(move || h.ingestor.handle(&object).is_stored())
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(h.store.item_count(TABLE), 20);
    assert!(h.store.get_item(TABLE, "user7@example.com").is_some());
}

#[test]
fn test_same_email_last_write_wins() {
    let h = Arc::new(Harness::new());
    let names = ["ann", "bea", "cat", "dot"];
    let objects: Vec<_> = names
        .iter()
        .map(|name| {
            h.upload(
                &format!("{}.json", name),
                &format!(r#"{{"email": "shared@example.com", "first_name": "{}"}}"#, name),
            )
        })
        .collect();

    let handles: Vec<_> = objects
        .into_iter()
        .map(|object| {
            let h = Arc::clone(&h);
            thread::spawn(move || h.ingestor.handle(&object).is_stored())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }

    assert_eq!(h.store.item_count(TABLE), 1);
    assert_eq!(h.store.version(), names.len() as u64);
    let row = h.store.get_item(TABLE, "shared@example.com").unwrap();
    assert!(names.contains(&row["first_name"].as_str()));
}
