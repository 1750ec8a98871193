// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

fn cluster_count(count: usize) -> NonZeroUsize {
    NonZeroUsize::new(count).unwrap()
}

#[test]
fn label_index() {
    assert_eq!(None, Label::EXCLUDED.index());
    assert!(Label::EXCLUDED.is_excluded());
    assert_eq!(Some(0), Label::from_index(0).index());
    assert!(!Label::from_index(0).is_excluded());
    assert_eq!(-1, Label::EXCLUDED.value());
    assert!(Label::EXCLUDED < Label::from_index(0));
}

#[test]
fn clusters_omit_excluded_tracks_and_keep_order() {
    let assignment = Assignment::new_unchecked(
        cluster_count(2),
        vec![
            ("a".into(), Label::from_index(1)),
            ("b".into(), Label::EXCLUDED),
            ("c".into(), Label::from_index(0)),
            ("d".into(), Label::from_index(1)),
        ],
    );
    assert!(assignment.is_valid());
    assert_eq!(1, assignment.excluded_count());
    assert_eq!(Some(Label::EXCLUDED), assignment.label_of(&"b".into()));
    assert_eq!(None, assignment.label_of(&"x".into()));

    let clusters = assignment.clusters();
    assert_eq!(
        vec![Label::from_index(0), Label::from_index(1)],
        clusters.keys().copied().collect::<Vec<_>>()
    );
    assert_eq!(
        vec!["a", "d"],
        clusters[&Label::from_index(1)]
            .iter()
            .map(|id| id.as_str())
            .collect::<Vec<_>>()
    );
}

#[test]
fn validate_assignment() {
    let out_of_range = Assignment::new_unchecked(
        cluster_count(1),
        vec![("a".into(), Label::from_index(1))],
    );
    assert!(!out_of_range.is_valid());

    let duplicate = Assignment::new_unchecked(
        cluster_count(1),
        vec![
            ("a".into(), Label::from_index(0)),
            ("a".into(), Label::EXCLUDED),
        ],
    );
    assert!(!duplicate.is_valid());
}

#[test]
fn display_quality() {
    let quality = Quality {
        cluster_count: cluster_count(3),
        silhouette: Some(SilhouetteScore::new(0.4567)),
    };
    assert_eq!("clusters: 3 | silhouette: 0.457", quality.to_string());
    let quality = Quality {
        cluster_count: cluster_count(1),
        silhouette: None,
    };
    assert_eq!("clusters: 1", quality.to_string());
}

#[test]
fn validate_silhouette_score() {
    assert!(SilhouetteScore::MIN.is_valid());
    assert!(SilhouetteScore::MAX.is_valid());
    assert!(!SilhouetteScore::new(1.5).is_valid());
    assert!(!SilhouetteScore::new(f64::NAN).is_valid());
}
