//! Record store operations through the facade.

use crate::*;

/// Test insert assigns increasing ids and get round-trips the record
#[test]
fn test_insert_and_get() {
    let db = test_db(3);

    let a = db
        .records
        .insert(NewRecord::with_metadata("cat", label("animal"), vec![1.0, 0.0, 0.0]))
        .unwrap();
    let b = db
        .records
        .insert(NewRecord::new("car", vec![0.0, 1.0, 0.0]))
        .unwrap();
    assert!(a < b);

    let record = db.records.get(a).unwrap();
    assert_eq!(record.text, "cat");
    assert_eq!(record.metadata, Some(label("animal")));
    assert_eq!(record.embedding, vec![1.0, 0.0, 0.0]);
}

/// Test dimension invariant rejects wrong-length vectors without mutation
#[test]
fn test_dimension_invariant() {
    let db = test_db(3);

    let result = db.records.insert(NewRecord::new("short", vec![1.0]));
    assert!(matches!(
        result,
        Err(Error::DimensionMismatch { expected: 3, got: 1 })
    ));

    let result = db
        .records
        .insert(NewRecord::new("long", vec![1.0, 2.0, 3.0, 4.0]));
    assert!(matches!(
        result,
        Err(Error::DimensionMismatch { expected: 3, got: 4 })
    ));

    assert_eq!(db.records.count(), 0);
    assert_eq!(db.records.write_version(), 0);
}

/// Test empty text is rejected as a validation error
#[test]
fn test_empty_text_rejected() {
    let db = test_db(3);
    let result = db.records.insert(NewRecord::new("", vec![1.0, 0.0, 0.0]));
    assert!(matches!(result, Err(Error::ValidationError(_))));
}

/// Test batch insert is all-or-nothing and reports the failing index
#[test]
fn test_batch_atomicity() {
    let db = test_db(3);

    let result = db.records.insert_batch(vec![
        NewRecord::new("fine", vec![1.0, 0.0, 0.0]),
        NewRecord::new("fine too", vec![0.0, 1.0, 0.0]),
        NewRecord::new("", vec![0.0, 0.0, 1.0]),
    ]);
    match result {
        Err(Error::BatchItem { index, source }) => {
            assert_eq!(index, 2);
            assert!(matches!(*source, Error::ValidationError(_)));
        }
        other => panic!("expected BatchItem, got {other:?}"),
    }
    assert_eq!(db.records.count(), 0, "no partial batch may persist");
}

/// Test get on an unknown id returns NotFound
#[test]
fn test_get_not_found() {
    let db = test_db(3);
    let result = db.records.get(RecordId::new(123));
    assert!(matches!(result, Err(Error::NotFound(_))));
    assert!(!db.records.contains(RecordId::new(123)));
}

/// Test scans yield ascending ids and honor metadata filters
#[test]
fn test_scan_ordering_and_filter() {
    let db = test_db(2);
    db.records
        .insert_batch(vec![
            NewRecord::with_metadata("a", label("x"), vec![0.0, 0.0]),
            NewRecord::new("b", vec![0.0, 1.0]),
            NewRecord::with_metadata("c", label("x"), vec![1.0, 0.0]),
            NewRecord::with_metadata("d", label("y"), vec![1.0, 1.0]),
        ])
        .unwrap();

    let all: Vec<u64> = db.records.scan(None).map(|r| r.id.as_u64()).collect();
    assert_eq!(all, vec![0, 1, 2, 3]);

    let filter = MetadataFilter::new().eq("label", "x");
    let xs: Vec<u64> = db
        .records
        .scan(Some(filter))
        .map(|r| r.id.as_u64())
        .collect();
    assert_eq!(xs, vec![0, 2]);
}

/// Test two scans over the same store are independent
#[test]
fn test_scan_restartable() {
    let db = test_db(2);
    db.records
        .insert_batch(vec![
            NewRecord::new("a", vec![0.0, 0.0]),
            NewRecord::new("b", vec![1.0, 0.0]),
        ])
        .unwrap();

    let mut first = db.records.scan(None);
    assert_eq!(first.next().unwrap().text, "a");

    // A second scan starts from the beginning regardless of the first.
    let second: Vec<String> = db.records.scan(None).map(|r| r.text).collect();
    assert_eq!(second, vec!["a", "b"]);
    assert_eq!(first.next().unwrap().text, "b");
}

/// Test the write counter advances once per committed operation
#[test]
fn test_write_version_counts_operations() {
    let db = test_db(2);
    assert_eq!(db.records.write_version(), 0);

    db.records.insert(NewRecord::new("a", vec![0.0, 0.0])).unwrap();
    assert_eq!(db.records.write_version(), 1);

    db.records
        .insert_batch(vec![
            NewRecord::new("b", vec![1.0, 0.0]),
            NewRecord::new("c", vec![0.0, 1.0]),
        ])
        .unwrap();
    assert_eq!(db.records.write_version(), 2);
}

/// Test builder validation of dimension and path requirements
#[test]
fn test_builder_requires_dimension() {
    let result = Corpus::builder().ephemeral();
    assert!(matches!(result, Err(Error::InvalidParameter(_))));

    let result = Corpus::builder().dimension(0).ephemeral();
    assert!(matches!(result, Err(Error::InvalidParameter(_))));

    let result = Corpus::builder().dimension(4).open();
    assert!(matches!(result, Err(Error::InvalidParameter(_))));

    let db = Corpus::builder().dimension(4).ephemeral().unwrap();
    assert_eq!(db.records.dimension(), 4);
}
