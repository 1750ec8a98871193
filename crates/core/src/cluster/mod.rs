// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Outcome of partitioning a batch of tracks into clusters.

use std::{collections::BTreeMap, fmt, num::NonZeroUsize};

use crate::{TrackId, prelude::*};

///////////////////////////////////////////////////////////////////////
// Label
///////////////////////////////////////////////////////////////////////

pub type LabelValue = i32;

/// Cluster label of a single track.
///
/// Either an index in `[0, k)` or the sentinel [`Label::EXCLUDED`] for
/// tracks that did not take part in the partitioning.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Label(LabelValue);

impl Label {
    pub const EXCLUDED: Self = Self(-1);

    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn from_index(index: usize) -> Self {
        debug_assert!(LabelValue::try_from(index).is_ok());
        Self(index as LabelValue)
    }

    #[must_use]
    pub const fn value(self) -> LabelValue {
        let Self(value) = self;
        value
    }

    #[must_use]
    pub const fn is_excluded(self) -> bool {
        self.0 == Self::EXCLUDED.0
    }

    #[must_use]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

///////////////////////////////////////////////////////////////////////
// Assignment
///////////////////////////////////////////////////////////////////////

/// Total mapping of a batch of tracks onto cluster labels.
///
/// Entries are stored in the original order of the tracks. Each track
/// appears exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    cluster_count: NonZeroUsize,
    entries: Vec<(TrackId, Label)>,
}

impl Assignment {
    /// Create a new assignment without checking its invariants.
    ///
    /// Use [`Validate`] for verifying the result.
    #[must_use]
    pub fn new_unchecked(cluster_count: NonZeroUsize, entries: Vec<(TrackId, Label)>) -> Self {
        Self {
            cluster_count,
            entries,
        }
    }

    /// The effective number of clusters
    #[must_use]
    pub const fn cluster_count(&self) -> NonZeroUsize {
        self.cluster_count
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&TrackId, Label)> + '_ {
        self.entries.iter().map(|(track_id, label)| (track_id, *label))
    }

    #[must_use]
    pub fn label_of(&self, track_id: &TrackId) -> Option<Label> {
        self.entries
            .iter()
            .find_map(|(id, label)| (id == track_id).then_some(*label))
    }

    #[must_use]
    pub fn excluded_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, label)| label.is_excluded())
            .count()
    }

    /// Track identifiers per cluster in ascending label order.
    ///
    /// Excluded tracks are omitted. Tracks within each cluster keep
    /// their original order.
    #[must_use]
    pub fn clusters(&self) -> BTreeMap<Label, Vec<&TrackId>> {
        let mut clusters = BTreeMap::<_, Vec<_>>::new();
        for (track_id, label) in self.iter() {
            if label.is_excluded() {
                continue;
            }
            clusters.entry(label).or_default().push(track_id);
        }
        clusters
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<(TrackId, Label)> {
        self.entries
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssignmentInvalidity {
    LabelOutOfRange(TrackId, Label),
    DuplicateTrack(TrackId),
}

impl Validate for Assignment {
    type Invalidity = AssignmentInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        let mut context = ValidationContext::new();
        let mut track_ids = std::collections::HashSet::with_capacity(self.entries.len());
        for (track_id, label) in &self.entries {
            let in_range = label.is_excluded()
                || label
                    .index()
                    .is_some_and(|index| index < self.cluster_count.get());
            context = context
                .invalidate_if(
                    !in_range,
                    AssignmentInvalidity::LabelOutOfRange(track_id.clone(), *label),
                )
                .invalidate_if(
                    !track_ids.insert(track_id),
                    AssignmentInvalidity::DuplicateTrack(track_id.clone()),
                );
        }
        context.into()
    }
}

///////////////////////////////////////////////////////////////////////
// Quality
///////////////////////////////////////////////////////////////////////

pub type SilhouetteScoreValue = f64;

/// Mean silhouette coefficient in the range [-1.0, 1.0]
///
/// Higher values indicate dense, well separated clusters.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct SilhouetteScore(SilhouetteScoreValue);

impl SilhouetteScore {
    pub const MIN: Self = Self(-1.0);
    pub const MAX: Self = Self(1.0);

    #[must_use]
    pub const fn new(value: SilhouetteScoreValue) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> SilhouetteScoreValue {
        let Self(value) = self;
        value
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SilhouetteScoreInvalidity {
    OutOfRange,
}

impl Validate for SilhouetteScore {
    type Invalidity = SilhouetteScoreInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                !(*self >= Self::MIN && *self <= Self::MAX),
                Self::Invalidity::OutOfRange,
            )
            .into()
    }
}

impl fmt::Display for SilhouetteScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.value())
    }
}

/// Diagnostic summary of a partitioning.
///
/// Never affects the grouping itself.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quality {
    /// The effective number of clusters
    pub cluster_count: NonZeroUsize,

    /// Undefined for a single cluster or if only a single
    /// distinct label occurred.
    pub silhouette: Option<SilhouetteScore>,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            cluster_count,
            silhouette,
        } = self;
        write!(f, "clusters: {cluster_count}")?;
        if let Some(silhouette) = silhouette {
            write!(f, " | silhouette: {silhouette}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
