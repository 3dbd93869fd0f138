//! End-to-end walkthrough: three labeled records, a two-partition index,
//! a similarity lookup, and a training export.

use crate::*;

/// Test the cat/car/dog walkthrough
#[test]
fn test_cat_car_dog_walkthrough() {
    let db = test_db(3);

    let cat = db
        .records
        .insert(NewRecord::with_metadata("cat", label("animal"), vec![1.0, 0.0, 0.0]))
        .unwrap();
    db.records
        .insert(NewRecord::with_metadata("car", label("vehicle"), vec![0.0, 1.0, 0.0]))
        .unwrap();
    db.records
        .insert(NewRecord::with_metadata("dog", label("animal"), vec![0.9, 0.1, 0.0]))
        .unwrap();

    db.index.build(IvfParams::new(2).with_seed(42)).unwrap();

    // Exact hit: the cat record at distance zero.
    let matches = db.index.search(&[1.0, 0.0, 0.0], 1).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, cat);
    assert_eq!(matches[0].text, "cat");
    assert!(matches[0].distance.abs() < 1e-6);
    assert_eq!(
        matches[0]
            .metadata
            .as_ref()
            .and_then(|m| m.as_object())
            .and_then(|o| o.get("label"))
            .and_then(Value::as_str),
        Some("animal")
    );

    // Training export sees all three labeled records.
    let training_set = db.training.fetch_labeled();
    assert_eq!(training_set.len(), 3);
    let labels: Vec<&str> = training_set.iter().map(|v| v.label.as_str()).collect();
    assert_eq!(labels, vec!["animal", "vehicle", "animal"]);
}
