// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use anyhow::anyhow;
use semval::IsValid as _;

use spotisplit_core::{
    Track,
    cluster::{Assignment, Label},
};

use crate::{Result, feature::space::FeatureSpace, partition::Partitioning};

/// Maps the labels of the partitioned rows back onto the whole batch.
///
/// Tracks that have been excluded from the feature space receive
/// [`Label::EXCLUDED`]. The resulting entries follow the order of
/// `tracks`.
pub fn reconcile(
    tracks: &[Track],
    space: &FeatureSpace,
    partitioning: &Partitioning,
) -> Result<Assignment> {
    debug_assert_eq!(tracks.len(), space.total_count());
    debug_assert_eq!(space.row_indices().len(), partitioning.labels.len());
    let mut labels = vec![Label::EXCLUDED; tracks.len()];
    for (&index, &label) in space.row_indices().iter().zip(&partitioning.labels) {
        labels[index] = Label::from_index(label);
    }
    let entries = tracks
        .iter()
        .map(|track| track.id.clone())
        .zip(labels)
        .collect();
    let assignment = Assignment::new_unchecked(partitioning.cluster_count(), entries);
    if !assignment.is_valid() {
        return Err(anyhow!("inconsistent cluster assignment").into());
    }
    log::debug!(
        "Assigned {assigned} of {total} track(s)",
        assigned = assignment.len() - assignment.excluded_count(),
        total = assignment.len(),
    );
    Ok(assignment)
}

#[cfg(test)]
mod tests;
