// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::num::NonZeroUsize;

use super::*;
use crate::{
    diagnostics::Diagnostics,
    feature::Schema,
    fixtures::separable_audio_batch,
    partition::{Params, partition},
};

#[test]
fn excluded_tracks_receive_sentinel_label() {
    let (tracks, mut descriptors) = separable_audio_batch(9);
    descriptors.remove(&tracks[0].id);
    descriptors.remove(&tracks[7].id);

    let mut diagnostics = Diagnostics::new();
    let space = FeatureSpace::build(Schema::Audio, &tracks, &descriptors, 2024, &mut diagnostics)
        .unwrap();
    let partitioning = partition(
        space.standardized(),
        NonZeroUsize::new(3).unwrap(),
        &Params::new(),
        &mut diagnostics,
    )
    .unwrap();
    let assignment = reconcile(&tracks, &space, &partitioning).unwrap();

    assert_eq!(tracks.len(), assignment.len());
    assert_eq!(2, assignment.excluded_count());
    for (track, (track_id, label)) in tracks.iter().zip(assignment.iter()) {
        assert_eq!(&track.id, track_id);
        if track.id == tracks[0].id || track.id == tracks[7].id {
            assert_eq!(Label::EXCLUDED, label);
        } else {
            assert!(label.index().is_some_and(|index| index < 3));
        }
    }
    let clustered = assignment
        .clusters()
        .values()
        .map(Vec::len)
        .sum::<usize>();
    assert_eq!(7, clustered);
}
