//! Lloyd k-means over embedding vectors.
//!
//! This is the clustering pass behind the IVF builder. Determinism contract:
//! a fixed seed over the same points yields identical centroids and
//! assignments, which is what makes seeded index builds reproducible.

use crate::cancel::CancelToken;
use corpus_core::{DistanceMetric, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Result of a clustering pass.
pub(crate) struct Clustering {
    /// `k` centroid vectors
    pub centroids: Vec<Vec<f32>>,
    /// Per-point index into `centroids`
    pub assignments: Vec<usize>,
}

/// Run Lloyd's algorithm: seeded initialization from the data points, then
/// assign/update until assignments stabilize or `max_iterations` is hit.
///
/// Preconditions (validated by the builder): `0 < k <= points.len()` and all
/// points share one dimension.
pub(crate) fn lloyd(
    points: &[&[f32]],
    k: usize,
    metric: DistanceMetric,
    seed: u64,
    max_iterations: usize,
    cancel: &CancelToken,
) -> Result<Clustering> {
    let mut rng = StdRng::seed_from_u64(seed);
    let picked = rand::seq::index::sample(&mut rng, points.len(), k);
    let mut centroids: Vec<Vec<f32>> = picked.iter().map(|i| points[i].to_vec()).collect();

    let mut assignments = vec![0usize; points.len()];
    for iteration in 0..max_iterations {
        cancel.checkpoint()?;

        let mut changed = false;
        for (point_idx, point) in points.iter().enumerate() {
            let nearest = nearest_centroid(point, &centroids, metric);
            if assignments[point_idx] != nearest {
                assignments[point_idx] = nearest;
                changed = true;
            }
        }

        if iteration > 0 && !changed {
            debug!(iteration, "k-means converged");
            break;
        }

        rescue_empty_clusters(points, &centroids, &mut assignments, metric);
        update_centroids(points, &assignments, &mut centroids, metric);
    }

    Ok(Clustering {
        centroids,
        assignments,
    })
}

/// Index of the closest centroid; ties resolve to the lowest index.
pub(crate) fn nearest_centroid(
    point: &[f32],
    centroids: &[Vec<f32>],
    metric: DistanceMetric,
) -> usize {
    let mut best = 0;
    let mut best_distance = f32::INFINITY;
    for (idx, centroid) in centroids.iter().enumerate() {
        let distance = metric.distance(point, centroid);
        if distance < best_distance {
            best = idx;
            best_distance = distance;
        }
    }
    best
}

/// Give every empty cluster the point currently worst-served by its
/// assignment, so all `k` partitions stay populated.
fn rescue_empty_clusters(
    points: &[&[f32]],
    centroids: &[Vec<f32>],
    assignments: &mut [usize],
    metric: DistanceMetric,
) {
    let mut counts = vec![0usize; centroids.len()];
    for &assignment in assignments.iter() {
        counts[assignment] += 1;
    }

    for cluster in 0..centroids.len() {
        if counts[cluster] > 0 {
            continue;
        }
        let mut worst_point = None;
        let mut worst_distance = -1.0f32;
        for (point_idx, point) in points.iter().enumerate() {
            // Only steal from clusters that can spare a member.
            if counts[assignments[point_idx]] <= 1 {
                continue;
            }
            let distance = metric.distance(point, &centroids[assignments[point_idx]]);
            if distance > worst_distance {
                worst_distance = distance;
                worst_point = Some(point_idx);
            }
        }
        if let Some(point_idx) = worst_point {
            counts[assignments[point_idx]] -= 1;
            assignments[point_idx] = cluster;
            counts[cluster] += 1;
        }
    }
}

/// Recompute each centroid as the mean of its members. Cosine centroids are
/// re-normalized so they remain direction representatives.
fn update_centroids(
    points: &[&[f32]],
    assignments: &[usize],
    centroids: &mut [Vec<f32>],
    metric: DistanceMetric,
) {
    let dimension = points.first().map(|p| p.len()).unwrap_or(0);
    let mut sums = vec![vec![0.0f32; dimension]; centroids.len()];
    let mut counts = vec![0usize; centroids.len()];

    for (point, &assignment) in points.iter().zip(assignments.iter()) {
        counts[assignment] += 1;
        for (slot, value) in sums[assignment].iter_mut().zip(point.iter()) {
            *slot += value;
        }
    }

    for (cluster, sum) in sums.into_iter().enumerate() {
        if counts[cluster] == 0 {
            continue; // keep the previous centroid
        }
        let mut mean: Vec<f32> = sum
            .into_iter()
            .map(|value| value / counts[cluster] as f32)
            .collect();
        if metric == DistanceMetric::Cosine {
            let norm: f32 = mean.iter().map(|v| v * v).sum::<f32>().sqrt();
            if norm > 0.0 {
                for value in mean.iter_mut() {
                    *value /= norm;
                }
            }
        }
        centroids[cluster] = mean;
    }
}
