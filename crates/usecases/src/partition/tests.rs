// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::collections::HashSet;

use super::*;
use crate::fixtures::init_logger;

fn cluster_count(count: usize) -> NonZeroUsize {
    NonZeroUsize::new(count).unwrap()
}

/// Three well separated blobs with four points each.
fn blobs() -> FeatureMatrix {
    FeatureMatrix::from_rows([
        [0.0, 0.0],
        [0.1, 0.2],
        [0.2, 0.1],
        [0.1, 0.1],
        [5.0, 5.0],
        [5.1, 5.2],
        [5.2, 5.1],
        [5.1, 5.1],
        [0.0, 9.0],
        [0.1, 9.2],
        [0.2, 9.1],
        [0.1, 9.1],
    ])
    .unwrap()
}

#[test]
fn default_params() {
    let params = Params::default();
    assert_eq!(42, params.seed);
    assert_eq!(10, params.restarts.get());
    assert_eq!(300, params.max_iterations.get());
    assert_eq!(7, Params::with_seed(7).seed);
}

#[test]
fn effective_cluster_count_never_exceeds_row_count() {
    assert_eq!(
        Some(cluster_count(3)),
        effective_cluster_count(cluster_count(5), 3)
    );
    assert_eq!(
        Some(cluster_count(5)),
        effective_cluster_count(cluster_count(5), 12)
    );
    assert_eq!(None, effective_cluster_count(cluster_count(5), 0));
}

#[test]
fn separate_blobs() {
    init_logger();
    let matrix = blobs();
    let mut diagnostics = Diagnostics::new();
    let partitioning =
        partition(&matrix, cluster_count(3), &Params::new(), &mut diagnostics).unwrap();
    assert_eq!(3, partitioning.cluster_count().get());
    assert_eq!(12, partitioning.labels.len());
    assert!(partitioning.converged);
    assert!(diagnostics.notices().is_empty());
    for blob in partitioning.labels.chunks(4) {
        assert!(blob.iter().all(|label| *label == blob[0]));
    }
    let distinct_labels = partitioning.labels.iter().collect::<HashSet<_>>();
    assert_eq!(3, distinct_labels.len());
    let silhouette = partitioning.quality.silhouette.unwrap();
    assert!(silhouette.value().is_finite());
    assert!(silhouette.value() > 0.9);
    assert!(silhouette.value() <= 1.0);
}

#[test]
fn deterministic_for_same_seed() {
    let matrix = FeatureMatrix::from_rows(
        (0..40).map(|index| [f64::from(index % 7), f64::from((index * 13) % 11)]),
    )
    .unwrap();
    let params = Params::with_seed(4711);
    let first = partition(
        &matrix,
        cluster_count(4),
        &params,
        &mut Diagnostics::new(),
    )
    .unwrap();
    for _ in 0..3 {
        let next = partition(
            &matrix,
            cluster_count(4),
            &params,
            &mut Diagnostics::new(),
        )
        .unwrap();
        assert_eq!(first, next);
    }
}

#[test]
fn reduce_cluster_count_to_row_count() {
    let matrix = FeatureMatrix::from_rows([[0.0], [1.0], [2.0]]).unwrap();
    let mut diagnostics = Diagnostics::new();
    let partitioning =
        partition(&matrix, cluster_count(5), &Params::new(), &mut diagnostics).unwrap();
    assert_eq!(3, partitioning.cluster_count().get());
    assert_eq!(
        &[Notice::DegenerateClusterCount {
            requested: cluster_count(5),
            effective: cluster_count(3),
        }],
        diagnostics.notices()
    );
    // Every row forms a cluster of its own
    let distinct_labels = partitioning.labels.iter().collect::<HashSet<_>>();
    assert_eq!(3, distinct_labels.len());
    assert!(partitioning.inertia.abs() < 1e-12);
}

#[test]
fn every_cluster_is_populated_for_coinciding_rows() {
    let matrix = FeatureMatrix::from_rows([[1.0, 1.0]; 4]).unwrap();
    let partitioning = partition(
        &matrix,
        cluster_count(4),
        &Params::new(),
        &mut Diagnostics::new(),
    )
    .unwrap();
    let mut labels = partitioning.labels.clone();
    labels.sort_unstable();
    assert_eq!(vec![0, 1, 2, 3], labels);
    // Only zero distances
    assert!(partitioning.quality.silhouette.is_some_and(|score| score.value().abs() < 1e-12));
}

#[test]
fn single_row_has_undefined_quality() {
    let matrix = FeatureMatrix::from_rows([[0.0, 0.0]]).unwrap();
    let partitioning = partition(
        &matrix,
        cluster_count(5),
        &Params::new(),
        &mut Diagnostics::new(),
    )
    .unwrap();
    assert_eq!(1, partitioning.cluster_count().get());
    assert_eq!(vec![0], partitioning.labels);
    assert!(partitioning.quality.silhouette.is_none());
}

#[test]
fn single_cluster_has_undefined_quality() {
    let partitioning = partition(
        &blobs(),
        cluster_count(1),
        &Params::new(),
        &mut Diagnostics::new(),
    )
    .unwrap();
    assert!(partitioning.labels.iter().all(|label| *label == 0));
    assert!(partitioning.quality.silhouette.is_none());
}

#[test]
fn reject_empty_matrix() {
    let matrix = FeatureMatrix::with_width(2);
    let err = partition(
        &matrix,
        cluster_count(2),
        &Params::new(),
        &mut Diagnostics::new(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
}

#[test]
fn report_nonconvergence() {
    let matrix = FeatureMatrix::from_rows(
        (0..30).map(|index| [f64::from(index), f64::from((index * 7) % 30)]),
    )
    .unwrap();
    let params = Params {
        max_iterations: NonZeroUsize::MIN,
        tolerance: 0.0,
        restarts: NonZeroUsize::MIN,
        ..Params::new()
    };
    let mut diagnostics = Diagnostics::new();
    let partitioning = partition(&matrix, cluster_count(3), &params, &mut diagnostics).unwrap();
    assert_eq!(1, partitioning.iterations);
    let expected_notices = if partitioning.converged {
        vec![]
    } else {
        vec![Notice::PartitionNonconvergence { iterations: 1 }]
    };
    assert_eq!(expected_notices, diagnostics.notices());
}

#[test]
fn silhouette_score_of_two_clusters() {
    let matrix = FeatureMatrix::from_rows([[0.0], [1.0], [10.0], [11.0]]).unwrap();
    let score = silhouette::silhouette_score(&matrix, &[0, 0, 1, 1], 2).unwrap();
    let expected = (9.5 / 10.5 + 8.5 / 9.5) / 2.0;
    assert!((score.value() - expected).abs() < 1e-12);
}

#[test]
fn silhouette_score_of_singleton_member_is_zero() {
    let matrix = FeatureMatrix::from_rows([[0.0], [1.0], [10.0]]).unwrap();
    let score = silhouette::silhouette_score(&matrix, &[0, 0, 1], 2).unwrap();
    let expected = (0.9 + 8.0 / 9.0 + 0.0) / 3.0;
    assert!((score.value() - expected).abs() < 1e-12);
}

#[test]
fn silhouette_score_requires_two_distinct_labels() {
    let matrix = FeatureMatrix::from_rows([[0.0], [1.0], [10.0]]).unwrap();
    assert!(silhouette::silhouette_score(&matrix, &[1, 1, 1], 3).is_none());
}
