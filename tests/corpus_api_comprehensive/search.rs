//! Index build and similarity search through the facade.

use crate::*;

fn populated_db() -> Corpus {
    let db = test_db(2);
    db.records
        .insert_batch(vec![
            NewRecord::new("origin-ish a", vec![0.0, 0.1]),
            NewRecord::new("origin-ish b", vec![0.1, 0.0]),
            NewRecord::new("origin-ish c", vec![0.05, 0.05]),
            NewRecord::new("far a", vec![10.0, 10.1]),
            NewRecord::new("far b", vec![10.1, 10.0]),
            NewRecord::new("far c", vec![9.95, 10.05]),
        ])
        .unwrap();
    db
}

/// Test searching before any build fails with IndexNotBuilt
#[test]
fn test_search_requires_build() {
    let db = populated_db();
    let result = db.index.search(&[0.0, 0.0], 1);
    assert!(matches!(result, Err(Error::IndexNotBuilt)));
    assert!(db.index.info().is_none());
}

/// Test build validates its parameters
#[test]
fn test_build_parameter_validation() {
    let db = populated_db();
    assert!(matches!(
        db.index.build(IvfParams::new(0)),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        db.index.build(IvfParams::new(100)),
        Err(Error::InvalidParameter(_))
    ));

    let empty = test_db(2);
    assert!(matches!(
        empty.index.build(IvfParams::new(1)),
        Err(Error::EmptyStore)
    ));
}

/// Test basic search returns the nearest record with its payload
#[test]
fn test_search_returns_hydrated_matches() {
    let db = populated_db();
    db.index.build(IvfParams::new(2).with_seed(7)).unwrap();

    let matches = db.index.search(&[0.0, 0.0], 1).unwrap();
    assert_eq!(matches.len(), 1);
    let top = &matches[0];
    assert_eq!(top.text, "origin-ish c");
    assert!(top.distance < 0.1);
}

/// Test full-probe query equals a brute-force scan
#[test]
fn test_full_probe_is_exact() {
    let db = test_db(3);
    let records: Vec<NewRecord> = (0..40)
        .map(|i| {
            let x = (i as f32 * 0.37).sin() * 5.0;
            let y = (i as f32 * 0.71).cos() * 5.0;
            let z = i as f32 * 0.1;
            NewRecord::new(format!("r{i}"), vec![x, y, z])
        })
        .collect();
    db.records.insert_batch(records).unwrap();
    let info = db.index.build(IvfParams::new(5).with_seed(21)).unwrap();

    let query = [1.0, -2.0, 0.5];
    let metric = db.records.config().metric;
    let mut exact: Vec<(RecordId, f32)> = db
        .records
        .scan(None)
        .map(|r| (r.id, metric.distance(&query, &r.embedding)))
        .collect();
    exact.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    exact.truncate(8);

    let approx = db.index.query(&query, 8, info.num_partitions).unwrap();
    let approx_pairs: Vec<(RecordId, f32)> =
        approx.into_iter().map(|m| (m.id, m.distance)).collect();
    assert_eq!(approx_pairs, exact);
}

/// Test raising the probe count never shrinks recall
#[test]
fn test_probe_count_trades_recall() {
    let db = populated_db();
    db.index.build(IvfParams::new(2).with_seed(3)).unwrap();

    let narrow = db.index.query(&[0.0, 0.0], 6, 1).unwrap();
    let wide = db.index.query(&[0.0, 0.0], 6, 2).unwrap();
    assert!(narrow.len() <= wide.len());
    assert_eq!(wide.len(), 6, "full probe sees every record");
}

/// Test query rejects malformed arguments
#[test]
fn test_query_validation() {
    let db = populated_db();
    db.index.build(IvfParams::new(2).with_seed(3)).unwrap();

    assert!(matches!(
        db.index.search(&[0.0, 0.0, 0.0], 1),
        Err(Error::DimensionMismatch { .. })
    ));
    assert!(matches!(
        db.index.query(&[0.0, 0.0], 0, 1),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        db.index.query(&[0.0, 0.0], 1, 0),
        Err(Error::InvalidParameter(_))
    ));
}

/// Test seeded rebuilds produce identical index descriptions
#[test]
fn test_seeded_build_reproducible() {
    let db = populated_db();
    let first = db.index.build(IvfParams::new(2).with_seed(99)).unwrap();
    let second = db.index.build(IvfParams::new(2).with_seed(99)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.seed, 99);
}

/// Test a canceled build leaves the previous index live
#[test]
fn test_canceled_build_keeps_old_index() {
    let db = populated_db();
    let before = db.index.build(IvfParams::new(2).with_seed(1)).unwrap();

    let cancel = CancelToken::new();
    cancel.cancel();
    let result = db
        .index
        .build_with_cancel(IvfParams::new(3).with_seed(2), &cancel);
    assert!(matches!(result, Err(Error::Canceled)));

    assert_eq!(db.index.info(), Some(before));
}
