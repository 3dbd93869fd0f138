//! Ingestion pipeline through the facade.

use crate::*;

const DIM: usize = 32;

/// Test labeled and unlabeled items land with the right metadata
#[test]
fn test_ingest_labels() {
    let db = test_db(DIM);
    let encoder = HashingEncoder::new(DIM).unwrap();

    let ids = db
        .ingest
        .batch(
            &encoder,
            &[
                RawItem::labeled("a small gray cat", "animal"),
                RawItem::new("nothing labeled here"),
            ],
        )
        .unwrap();
    assert_eq!(ids.len(), 2);

    let labeled = db.records.get(ids[0]).unwrap();
    assert_eq!(
        labeled.metadata_field("label").and_then(Value::as_str),
        Some("animal")
    );
    assert!(db.records.get(ids[1]).unwrap().metadata.is_none());
}

/// Test an encoder with the wrong dimension aborts before any insert
#[test]
fn test_ingest_dimension_fail_fast() {
    let db = test_db(DIM);
    let wrong = HashingEncoder::new(DIM * 2).unwrap();

    let result = db.ingest.batch(&wrong, &[RawItem::new("hello")]);
    assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    assert_eq!(db.records.count(), 0);
    assert_eq!(db.records.write_version(), 0);
}

/// Test ingestion advances the write counter exactly once per batch
#[test]
fn test_ingest_is_one_write() {
    let db = test_db(DIM);
    let encoder = HashingEncoder::new(DIM).unwrap();

    db.ingest
        .batch(
            &encoder,
            &[
                RawItem::labeled("one", "a"),
                RawItem::labeled("two", "b"),
                RawItem::labeled("three", "c"),
            ],
        )
        .unwrap();
    assert_eq!(db.records.write_version(), 1);
    assert_eq!(db.records.count(), 3);
}

/// Test encoder determinism: re-ingesting the same text yields equal vectors
#[test]
fn test_encoder_determinism_across_batches() {
    let db = test_db(DIM);
    let encoder = HashingEncoder::new(DIM).unwrap();

    let first = db
        .ingest
        .batch(&encoder, &[RawItem::new("same text twice")])
        .unwrap();
    let second = db
        .ingest
        .batch(&encoder, &[RawItem::new("same text twice")])
        .unwrap();

    let a = db.records.get(first[0]).unwrap().embedding;
    let b = db.records.get(second[0]).unwrap().embedding;
    assert_eq!(a, b);
}
