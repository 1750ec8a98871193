// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use semval::IsValid as _;

use spotisplit_core::cluster::SilhouetteScore;

use super::kmeans::squared_distance;
use crate::feature::{extract::FeatureValue, space::FeatureMatrix};

fn distance(lhs: &[FeatureValue], rhs: &[FeatureValue]) -> FeatureValue {
    squared_distance(lhs, rhs).sqrt()
}

/// Mean silhouette coefficient over all rows using Euclidean distances.
///
/// Members of singleton clusters contribute a coefficient of 0. Returns
/// `None` unless at least two distinct labels occur.
#[must_use]
pub fn silhouette_score(
    matrix: &FeatureMatrix,
    labels: &[usize],
    cluster_count: usize,
) -> Option<SilhouetteScore> {
    debug_assert_eq!(matrix.row_count(), labels.len());
    let mut sizes = vec![0_usize; cluster_count];
    for &label in labels {
        sizes[label] += 1;
    }
    if sizes.iter().filter(|&&size| size > 0).count() < 2 {
        return None;
    }
    let mut total = 0.0;
    let mut distance_sums = vec![0.0; cluster_count];
    for (index, row) in matrix.rows().enumerate() {
        let own = labels[index];
        if sizes[own] < 2 {
            continue;
        }
        distance_sums.fill(0.0);
        for (other, &label) in matrix.rows().zip(labels) {
            distance_sums[label] += distance(row, other);
        }
        // The distance to itself is 0
        let cohesion = distance_sums[own] / (sizes[own] - 1) as FeatureValue;
        let separation = distance_sums
            .iter()
            .zip(&sizes)
            .enumerate()
            .filter(|&(label, (_, &size))| label != own && size > 0)
            .map(|(_, (sum, &size))| sum / size as FeatureValue)
            .fold(FeatureValue::INFINITY, FeatureValue::min);
        let scale = cohesion.max(separation);
        if scale > 0.0 {
            total += (separation - cohesion) / scale;
        }
    }
    let score = SilhouetteScore::new(total / labels.len() as FeatureValue);
    debug_assert!(score.is_valid());
    Some(score)
}
