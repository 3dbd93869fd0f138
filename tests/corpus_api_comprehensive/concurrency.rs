//! Shared-handle thread safety.

use crate::*;
use std::collections::HashSet;
use std::sync::Arc;

/// Test concurrent writers never collide on ids and lose no records
#[test]
fn test_concurrent_inserts_are_serialized() {
    let db = Arc::new(test_db(2));
    let threads = 8;
    let per_thread = 50;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let db = db.clone();
            std::thread::spawn(move || {
                let mut ids = Vec::new();
                for i in 0..per_thread {
                    let id = db
                        .records
                        .insert(NewRecord::new(
                            format!("t{t}-{i}"),
                            vec![t as f32, i as f32],
                        ))
                        .unwrap();
                    ids.push(id);
                }
                ids
            })
        })
        .collect();

    let mut all: Vec<RecordId> = Vec::new();
    for handle in handles {
        let ids = handle.join().unwrap();
        // Ids within one thread strictly increase.
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        all.extend(ids);
    }

    let unique: HashSet<RecordId> = all.iter().copied().collect();
    assert_eq!(unique.len(), threads * per_thread);
    assert_eq!(db.records.count(), threads * per_thread);
    assert_eq!(db.records.write_version() as usize, threads * per_thread);
}

/// Test readers run alongside writers and only ever see whole batches
#[test]
fn test_readers_see_whole_batches_only() {
    let db = Arc::new(test_db(2));
    let batches = 40;
    let batch_size = 5;

    let writer = {
        let db = db.clone();
        std::thread::spawn(move || {
            for b in 0..batches {
                let batch = (0..batch_size)
                    .map(|i| NewRecord::new(format!("b{b}-{i}"), vec![b as f32, i as f32]))
                    .collect();
                db.records.insert_batch(batch).unwrap();
            }
        })
    };

    let reader = {
        let db = db.clone();
        std::thread::spawn(move || {
            for _ in 0..200 {
                let count = db.records.scan(None).count();
                assert_eq!(count % batch_size, 0, "scan saw a partial batch");
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();
    assert_eq!(db.records.count(), batches * batch_size);
}

/// Test queries against the old index finish while a rebuild swaps it
#[test]
fn test_queries_survive_concurrent_rebuilds() {
    let db = Arc::new(test_db(2));
    db.records
        .insert_batch(
            (0..20)
                .map(|i| NewRecord::new(format!("r{i}"), vec![i as f32, (20 - i) as f32]))
                .collect(),
        )
        .unwrap();
    db.index.build(IvfParams::new(4).with_seed(1)).unwrap();

    let rebuilder = {
        let db = db.clone();
        std::thread::spawn(move || {
            for seed in 0..20 {
                db.index.build(IvfParams::new(4).with_seed(seed)).unwrap();
            }
        })
    };

    let searcher = {
        let db = db.clone();
        std::thread::spawn(move || {
            for i in 0..200 {
                let matches = db
                    .index
                    .query(&[i as f32 % 20.0, 10.0], 3, 4)
                    .unwrap();
                assert_eq!(matches.len(), 3);
            }
        })
    };

    rebuilder.join().unwrap();
    searcher.join().unwrap();
}
