// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Lloyd's algorithm with k-means++ seeding.

use rand::{Rng as _, SeedableRng as _, rngs::StdRng};

use crate::feature::{extract::FeatureValue, space::FeatureMatrix};

#[must_use]
pub(crate) fn squared_distance(lhs: &[FeatureValue], rhs: &[FeatureValue]) -> FeatureValue {
    debug_assert_eq!(lhs.len(), rhs.len());
    lhs.iter()
        .zip(rhs)
        .map(|(lhs, rhs)| (lhs - rhs).powi(2))
        .sum()
}

/// Result of a single run.
#[derive(Debug, Clone)]
pub(crate) struct Run {
    pub(crate) labels: Vec<usize>,
    pub(crate) inertia: FeatureValue,
    pub(crate) iterations: usize,
    pub(crate) converged: bool,
}

/// Index of the nearest centroid.
///
/// Ties are resolved in favor of the lowest index.
fn nearest_centroid(row: &[FeatureValue], centroids: &FeatureMatrix) -> (usize, FeatureValue) {
    let mut nearest = (0, FeatureValue::INFINITY);
    for (index, centroid) in centroids.rows().enumerate() {
        let distance = squared_distance(row, centroid);
        if distance < nearest.1 {
            nearest = (index, distance);
        }
    }
    nearest
}

fn assign(matrix: &FeatureMatrix, centroids: &FeatureMatrix) -> Vec<usize> {
    matrix
        .rows()
        .map(|row| nearest_centroid(row, centroids).0)
        .collect()
}

fn cluster_sizes(labels: &[usize], cluster_count: usize) -> Vec<usize> {
    let mut sizes = vec![0; cluster_count];
    for &label in labels {
        sizes[label] += 1;
    }
    sizes
}

/// Moves the rows that are farthest from their centroid into empty clusters.
///
/// Only rows of clusters with more than one member are moved. Requires
/// at least as many rows as clusters.
fn relocate_into_empty_clusters(
    matrix: &FeatureMatrix,
    centroids: &FeatureMatrix,
    labels: &mut [usize],
) {
    let mut sizes = cluster_sizes(labels, centroids.row_count());
    for empty in 0..sizes.len() {
        if sizes[empty] > 0 {
            continue;
        }
        let farthest = matrix
            .rows()
            .enumerate()
            .filter(|(row_index, _)| sizes[labels[*row_index]] > 1)
            .map(|(row_index, row)| {
                let distance = squared_distance(row, centroids.row(labels[row_index]));
                (row_index, distance)
            })
            .fold(None, |farthest: Option<(usize, FeatureValue)>, next| {
                match farthest {
                    Some(farthest) if farthest.1 >= next.1 => Some(farthest),
                    _ => Some(next),
                }
            });
        let Some((row_index, _)) = farthest else {
            log::warn!("No row available for empty cluster {empty}");
            return;
        };
        log::debug!("Relocating row {row_index} into empty cluster {empty}");
        sizes[labels[row_index]] -= 1;
        labels[row_index] = empty;
        sizes[empty] = 1;
    }
}

fn centroids_of(matrix: &FeatureMatrix, labels: &[usize], cluster_count: usize) -> FeatureMatrix {
    let width = matrix.width();
    let mut sums = vec![vec![0.0; width]; cluster_count];
    for (row, &label) in matrix.rows().zip(labels) {
        for (sum, value) in sums[label].iter_mut().zip(row) {
            *sum += value;
        }
    }
    let sizes = cluster_sizes(labels, cluster_count);
    for (sum, size) in sums.iter_mut().zip(sizes) {
        debug_assert!(size > 0);
        let size = size.max(1) as FeatureValue;
        for value in sum.iter_mut() {
            *value /= size;
        }
    }
    FeatureMatrix::from_rows(sums).unwrap_or_else(|| FeatureMatrix::with_width(width))
}

/// Selects the initial centroids.
///
/// The first centroid is drawn uniformly, all following centroids are
/// drawn with a probability proportional to the squared distance from
/// the nearest centroid that has already been chosen.
fn init_centroids(matrix: &FeatureMatrix, cluster_count: usize, rng: &mut StdRng) -> FeatureMatrix {
    let row_count = matrix.row_count();
    let mut chosen = Vec::with_capacity(cluster_count);
    chosen.push(rng.random_range(0..row_count));
    let mut min_distances = matrix
        .rows()
        .map(|row| squared_distance(row, matrix.row(chosen[0])))
        .collect::<Vec<_>>();
    while chosen.len() < cluster_count {
        let total = min_distances.iter().sum::<FeatureValue>();
        let next = if total > 0.0 {
            let threshold = rng.random::<FeatureValue>() * total;
            let mut cumulative = 0.0;
            min_distances
                .iter()
                .position(|distance| {
                    cumulative += distance;
                    cumulative > threshold
                })
                // Rounding might leave the threshold unreached
                .unwrap_or_else(|| {
                    min_distances
                        .iter()
                        .rposition(|distance| *distance > 0.0)
                        .unwrap_or(row_count - 1)
                })
        } else {
            // All remaining rows coincide with a centroid
            rng.random_range(0..row_count)
        };
        chosen.push(next);
        for (min_distance, row) in min_distances.iter_mut().zip(matrix.rows()) {
            *min_distance = min_distance.min(squared_distance(row, matrix.row(next)));
        }
    }
    FeatureMatrix::from_rows(chosen.into_iter().map(|index| matrix.row(index)))
        .unwrap_or_else(|| FeatureMatrix::with_width(matrix.width()))
}

fn mean_column_variance(matrix: &FeatureMatrix) -> FeatureValue {
    let row_count = matrix.row_count() as FeatureValue;
    let total = (0..matrix.width())
        .map(|column| {
            let mean = matrix.column(column).sum::<FeatureValue>() / row_count;
            matrix
                .column(column)
                .map(|value| (value - mean).powi(2))
                .sum::<FeatureValue>()
                / row_count
        })
        .sum::<FeatureValue>();
    total / matrix.width() as FeatureValue
}

/// A single seeded run.
///
/// Iterates until the assignment is stable, until the centroids move
/// less than the tolerance relative to the mean column variance, or
/// until `max_iterations` has been reached.
pub(crate) fn run(
    matrix: &FeatureMatrix,
    cluster_count: usize,
    seed: u64,
    max_iterations: usize,
    tolerance: FeatureValue,
) -> Run {
    debug_assert!(cluster_count > 0);
    debug_assert!(cluster_count <= matrix.row_count());
    let mut rng = StdRng::seed_from_u64(seed);
    let mut centroids = init_centroids(matrix, cluster_count, &mut rng);
    let max_shift = tolerance * mean_column_variance(matrix);
    let mut labels = assign(matrix, &centroids);
    let mut iterations = 0;
    let mut converged = false;
    while iterations < max_iterations {
        iterations += 1;
        relocate_into_empty_clusters(matrix, &centroids, &mut labels);
        let next_centroids = centroids_of(matrix, &labels, cluster_count);
        let shift = centroids
            .rows()
            .zip(next_centroids.rows())
            .map(|(prev, next)| squared_distance(prev, next))
            .sum::<FeatureValue>();
        centroids = next_centroids;
        let next_labels = assign(matrix, &centroids);
        let stable = next_labels == labels;
        labels = next_labels;
        if stable || shift <= max_shift {
            converged = true;
            break;
        }
    }
    relocate_into_empty_clusters(matrix, &centroids, &mut labels);
    let centroids = centroids_of(matrix, &labels, cluster_count);
    let inertia = matrix
        .rows()
        .zip(&labels)
        .map(|(row, &label)| squared_distance(row, centroids.row(label)))
        .sum();
    Run {
        labels,
        inertia,
        iterations,
        converged,
    }
}
