//! Persistence across reopen: records, schema, and the index artifact.

use crate::*;
use tempfile::TempDir;

fn config() -> StoreConfig {
    StoreConfig::new(2, DistanceMetric::Euclidean).unwrap()
}

/// Test records survive a close-and-reopen cycle
#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();

    let ids;
    {
        let db = Corpus::open(dir.path(), config()).unwrap();
        ids = db
            .records
            .insert_batch(vec![
                NewRecord::with_metadata("cat", label("animal"), vec![1.0, 0.0]),
                NewRecord::new("car", vec![0.0, 1.0]),
            ])
            .unwrap();
    }

    let db = Corpus::open(dir.path(), config()).unwrap();
    assert_eq!(db.records.count(), 2);
    assert_eq!(db.records.write_version(), 1);
    let cat = db.records.get(ids[0]).unwrap();
    assert_eq!(cat.text, "cat");
    assert_eq!(cat.metadata, Some(label("animal")));
}

/// Test create is idempotent but a different dimension is a schema conflict
#[test]
fn test_open_idempotent_and_schema_checked() {
    let dir = TempDir::new().unwrap();
    drop(Corpus::open(dir.path(), config()).unwrap());
    drop(Corpus::open(dir.path(), config()).unwrap()); // no-op on match

    let other = StoreConfig::new(3, DistanceMetric::Euclidean).unwrap();
    assert!(matches!(
        Corpus::open(dir.path(), other),
        Err(Error::SchemaConflict { .. })
    ));
}

/// Test the index artifact is persisted by build and reloaded on open
#[test]
fn test_index_artifact_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let built;
    {
        let db = Corpus::open(dir.path(), config()).unwrap();
        db.records
            .insert_batch(vec![
                NewRecord::new("a", vec![0.0, 0.0]),
                NewRecord::new("b", vec![0.1, 0.0]),
                NewRecord::new("c", vec![5.0, 5.0]),
                NewRecord::new("d", vec![5.1, 5.0]),
            ])
            .unwrap();
        built = db.index.build(IvfParams::new(2).with_seed(17)).unwrap();
    }

    let db = Corpus::open(dir.path(), config()).unwrap();
    assert_eq!(db.index.info(), Some(built));
    assert!(!db.index.is_stale().unwrap());

    let matches = db.index.search(&[0.05, 0.0], 2).unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].text, "a");
}

/// Test a reloaded index goes stale once new records arrive
#[test]
fn test_reloaded_index_tracks_staleness() {
    let dir = TempDir::new().unwrap();
    {
        let db = Corpus::open(dir.path(), config()).unwrap();
        db.records
            .insert_batch(vec![
                NewRecord::new("a", vec![0.0, 0.0]),
                NewRecord::new("b", vec![1.0, 1.0]),
            ])
            .unwrap();
        db.index.build(IvfParams::new(1).with_seed(4)).unwrap();
    }

    let db = Corpus::open(dir.path(), config()).unwrap();
    assert!(!db.index.is_stale().unwrap());
    db.records
        .insert(NewRecord::new("late", vec![0.5, 0.5]))
        .unwrap();
    assert!(db.index.is_stale().unwrap());
}

/// Test an ephemeral database leaves no files behind
#[test]
fn test_ephemeral_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let db = test_db(2);
    db.records
        .insert_batch(vec![
            NewRecord::new("a", vec![0.0, 0.0]),
            NewRecord::new("b", vec![1.0, 1.0]),
        ])
        .unwrap();
    db.index.build(IvfParams::new(1)).unwrap();

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
