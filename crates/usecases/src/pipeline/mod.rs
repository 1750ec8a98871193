// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{collections::HashSet, num::NonZeroUsize};

use semval::IsValid as _;
use static_assertions::const_assert_eq;

use spotisplit_core::{
    Track, TrackId,
    cluster::{Assignment, Label, Quality},
    util::clock::YearType,
};

use crate::{
    InvalidInput, Result,
    diagnostics::{Diagnostics, Notice},
    feature::{
        AudioDescriptors, Schema,
        extract::{DEFAULT_REFERENCE_YEAR, FeatureValue},
        space::FeatureSpace,
    },
    partition::{self, Partitioning},
    reconcile::reconcile,
};

pub const DEFAULT_CLUSTER_COUNT: NonZeroUsize = NonZeroUsize::MIN.saturating_add(4);

const_assert_eq!(5, DEFAULT_CLUSTER_COUNT.get());

#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub schema: Schema,

    /// Reduced to the number of tracks with complete features if
    /// exceeding it
    pub requested_cluster_count: NonZeroUsize,

    /// Substitutes unknown release years and serves as the origin
    /// for calculating the age of tracks
    pub reference_year: YearType,

    pub partition: partition::Params,
}

impl Params {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            schema: Schema::Audio,
            requested_cluster_count: DEFAULT_CLUSTER_COUNT,
            reference_year: DEFAULT_REFERENCE_YEAR,
            partition: partition::Params::new(),
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Validated,
    SpaceBuilt,
    Partitioned,
    Reconciled,
}

#[derive(Debug)]
pub struct Outcome {
    pub assignment: Assignment,
    pub space: FeatureSpace,
    pub partitioning: Partitioning,
    pub notices: Vec<Notice>,
}

impl Outcome {
    #[must_use]
    pub const fn quality(&self) -> &Quality {
        &self.partitioning.quality
    }

    /// Label and unscaled features per track in the original order.
    ///
    /// Features are `None` for excluded tracks. Their columns are
    /// named by [`Self::column_names`].
    pub fn rows(
        &self,
    ) -> impl ExactSizeIterator<Item = (&TrackId, Label, Option<&[FeatureValue]>)> + '_ {
        self.assignment
            .iter()
            .enumerate()
            .map(|(index, (track_id, label))| (track_id, label, self.space.features_of(index)))
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> {
        self.space.schema().column_names()
    }
}

/// Rejects tracks without identifier and duplicate tracks.
pub fn validate_tracks(tracks: &[Track]) -> Result<()> {
    let mut track_ids = HashSet::with_capacity(tracks.len());
    for (index, track) in tracks.iter().enumerate() {
        if track.id.is_empty() {
            log::warn!("Track #{index} has no identifier");
            return Err(InvalidInput::EmptyTrackId.into());
        }
        if !track_ids.insert(&track.id) {
            return Err(InvalidInput::DuplicateTrack(track.id.clone()).into());
        }
        if !track.is_valid() {
            log::warn!("Track {} has invalid metadata", track.id);
        }
    }
    Ok(())
}

fn advance(stage: Stage) {
    log::debug!("Completed stage {stage:?}");
}

/// Assigns every track to a cluster or excludes it.
///
/// The run either succeeds as a whole or fails without any
/// partial result.
pub fn run(tracks: &[Track], descriptors: &AudioDescriptors, params: &Params) -> Result<Outcome> {
    let Params {
        schema,
        requested_cluster_count,
        reference_year,
        partition: partition_params,
    } = params;
    validate_tracks(tracks)?;
    advance(Stage::Validated);
    let mut diagnostics = Diagnostics::new();
    log::info!(
        "Clustering {count} track(s) using the {schema:?} schema",
        count = tracks.len(),
    );
    let space = FeatureSpace::build(
        *schema,
        tracks,
        descriptors,
        *reference_year,
        &mut diagnostics,
    )?;
    advance(Stage::SpaceBuilt);
    let partitioning = partition::partition(
        space.standardized(),
        *requested_cluster_count,
        partition_params,
        &mut diagnostics,
    )?;
    advance(Stage::Partitioned);
    let assignment = reconcile(tracks, &space, &partitioning)?;
    advance(Stage::Reconciled);
    Ok(Outcome {
        assignment,
        space,
        partitioning,
        notices: diagnostics.into_notices(),
    })
}
