// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use spotisplit_core::track::Popularity;

use super::*;
use crate::fixtures::{descriptor, init_logger, separable_audio_batch, track};

fn assert_standardized(matrix: &FeatureMatrix, column: usize) {
    let row_count = matrix.row_count() as f64;
    let mean = matrix.column(column).sum::<f64>() / row_count;
    let variance = matrix
        .column(column)
        .map(|value| (value - mean).powi(2))
        .sum::<f64>()
        / row_count;
    assert!(mean.abs() < 1e-9, "mean = {mean}");
    assert!((variance - 1.0).abs() < 1e-9, "variance = {variance}");
}

#[test]
fn matrix_from_rows() {
    let matrix = FeatureMatrix::from_rows([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]).unwrap();
    assert_eq!(2, matrix.width());
    assert_eq!(3, matrix.row_count());
    assert_eq!(&[3.0, 4.0], matrix.row(1));
    assert_eq!(vec![2.0, 4.0, 6.0], matrix.column(1).collect::<Vec<_>>());
}

#[test]
fn matrix_from_rows_rejects_ragged_or_empty_rows() {
    assert!(FeatureMatrix::from_rows([vec![1.0, 2.0], vec![3.0]]).is_none());
    assert!(FeatureMatrix::from_rows(Vec::<Vec<f64>>::new()).is_none());
    assert!(FeatureMatrix::from_rows([Vec::<f64>::new()]).is_none());
}

#[test]
fn standardize_columns() {
    let matrix = FeatureMatrix::from_rows([[1.0, 10.0], [2.0, 30.0], [3.0, 20.0], [6.0, 0.0]])
        .unwrap();
    let (standardized, stats) = standardize(&matrix);
    assert_standardized(&standardized, 0);
    assert_standardized(&standardized, 1);
    assert!((stats[0].mean - 3.0).abs() < 1e-12);
    assert!((stats[1].mean - 15.0).abs() < 1e-12);
    // Population standard deviation
    assert!((stats[0].std_dev - 3.5_f64.sqrt()).abs() < 1e-12);
}

#[test]
fn standardize_constant_column_to_zero() {
    let matrix = FeatureMatrix::from_rows([[0.1, 1.0], [0.1, 2.0], [0.1, 3.0]]).unwrap();
    let (standardized, stats) = standardize(&matrix);
    assert!(stats[0].is_constant());
    assert!(!stats[1].is_constant());
    assert!(standardized.column(0).all(|value| value == 0.0));
    assert_standardized(&standardized, 1);
}

#[test]
fn standardize_single_row() {
    let matrix = FeatureMatrix::from_rows([[4.0, -2.0]]).unwrap();
    let (standardized, stats) = standardize(&matrix);
    assert!(stats.iter().all(ColumnStats::is_constant));
    assert_eq!(&[0.0, 0.0], standardized.row(0));
}

#[test]
fn build_audio_space_excludes_incomplete_tracks() {
    init_logger();
    let (tracks, mut descriptors) = separable_audio_batch(6);
    descriptors.remove(&tracks[1].id);
    descriptors.get_mut(&tracks[4].id).unwrap().tempo = None;

    let mut diagnostics = Diagnostics::new();
    let space = FeatureSpace::build(
        Schema::Audio,
        &tracks,
        &descriptors,
        2024,
        &mut diagnostics,
    )
    .unwrap();
    assert_eq!(6, space.total_count());
    assert_eq!(&[0, 2, 3, 5], space.row_indices());
    assert_eq!(&[1, 4], space.excluded_indices());
    assert_eq!(4, space.standardized().row_count());
    assert_eq!(4, space.standardized().width());
    assert!(space.features_of(1).is_none());
    assert_eq!(
        Some(space.features().row(1)),
        space.features_of(2)
    );
    assert!(
        diagnostics
            .notices()
            .contains(&Notice::MissingFeatureRecords { count: 2 })
    );
    for column in 0..4 {
        assert_standardized(space.standardized(), column);
    }
}

#[test]
fn build_fails_without_complete_tracks() {
    let tracks = vec![track("a"), track("b")];
    let mut diagnostics = Diagnostics::new();
    let err = FeatureSpace::build(
        Schema::Audio,
        &tracks,
        &AudioDescriptors::new(),
        2024,
        &mut diagnostics,
    )
    .unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
}

#[test]
fn build_fails_for_empty_batch() {
    let mut diagnostics = Diagnostics::new();
    let err = FeatureSpace::build(
        Schema::Metadata,
        &[],
        &AudioDescriptors::new(),
        2024,
        &mut diagnostics,
    )
    .unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
}

#[test]
fn build_metadata_space_with_interactions() {
    let mut tracks = vec![track("a"), track("b"), track("c")];
    tracks[0].popularity = Popularity::new(10);
    tracks[1].popularity = Popularity::new(40);
    tracks[2].popularity = Popularity::new(90);
    tracks[2].explicit = true;

    let mut descriptors = AudioDescriptors::new();
    // Ignored by the metadata schema
    descriptors.insert(tracks[0].id.clone(), descriptor(0.1, 0.2, 0.3, 100.0));

    let mut diagnostics = Diagnostics::new();
    let space = FeatureSpace::build(
        Schema::Metadata,
        &tracks,
        &descriptors,
        2024,
        &mut diagnostics,
    )
    .unwrap();
    assert_eq!(&[0, 1, 2], space.row_indices());
    assert!(space.excluded_indices().is_empty());
    assert_eq!(20, space.features().width());

    // popularity_duration = popularity_normalized * duration_minutes
    let row = space.features_of(2).unwrap();
    assert!((row[15] - 0.9 * 3.0).abs() < 1e-12);
    // explicit_popularity
    assert!((row[17] - 0.9).abs() < 1e-12);
    assert!(space.features_of(0).unwrap()[17].abs() < 1e-12);

    // All tracks share the same duration
    assert!(
        diagnostics
            .notices()
            .contains(&Notice::ConstantFeatureColumn {
                column: "duration_minutes"
            })
    );
    assert!(
        !diagnostics
            .notices()
            .contains(&Notice::ConstantFeatureColumn {
                column: "popularity"
            })
    );
    assert!(
        space
            .standardized()
            .column(0)
            .all(|value| value == 0.0)
    );
    assert!(
        !diagnostics
            .notices()
            .iter()
            .any(|notice| matches!(notice, Notice::MissingFeatureRecords { .. }))
    );
}
