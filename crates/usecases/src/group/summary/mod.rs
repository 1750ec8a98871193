// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use itertools::Itertools as _;

use spotisplit_core::{
    Track, TrackId,
    cluster::{Assignment, Label},
    track::album::Kind as AlbumKind,
    util::clock::YearType,
};

const TOP_TRACKS_COUNT: usize = 3;

/// Mean and sample standard deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    pub mean: f64,

    /// Undefined for less than two values
    pub std_dev: Option<f64>,
}

impl Spread {
    #[must_use]
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len() as f64;
        let mean = values.iter().sum::<f64>() / count;
        let std_dev = (values.len() > 1).then(|| {
            let sum_of_squares = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>();
            (sum_of_squares / (count - 1.0)).sqrt()
        });
        Some(Self { mean, std_dev })
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { mean, std_dev } = self;
        write!(f, "{mean:.1}")?;
        if let Some(std_dev) = std_dev {
            write!(f, " ± {std_dev:.1}")?;
        }
        Ok(())
    }
}

/// Characteristics of the tracks in a single cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    pub label: Label,
    pub size: usize,
    pub popularity: Spread,
    pub duration_minutes: Spread,
    pub age_years: Spread,
    pub explicit_count: usize,
    pub local_count: usize,
    pub mean_available_markets: f64,

    /// The most frequent album type and its count
    pub dominant_album_kind: Option<(AlbumKind, usize)>,

    /// The most popular tracks, in original order if equally popular
    pub top_tracks: Vec<TrackId>,
}

impl ClusterSummary {
    #[must_use]
    pub fn explicit_share(&self) -> f64 {
        self.explicit_count as f64 / self.size as f64
    }

    #[must_use]
    pub fn local_share(&self) -> f64 {
        self.local_count as f64 / self.size as f64
    }
}

fn summarize_cluster(
    label: Label,
    members: &[&Track],
    reference_year: YearType,
) -> Option<ClusterSummary> {
    let size = members.len();
    let popularity = Spread::of(
        &members
            .iter()
            .map(|track| f64::from(track.popularity.value()))
            .collect::<Vec<_>>(),
    )?;
    let duration_minutes = Spread::of(
        &members
            .iter()
            .map(|track| track.duration.to_minutes())
            .collect::<Vec<_>>(),
    )?;
    let age_years = Spread::of(
        &members
            .iter()
            .map(|track| {
                let release_year = track.album.release_year().unwrap_or(reference_year);
                f64::from(reference_year) - f64::from(release_year)
            })
            .collect::<Vec<_>>(),
    )?;
    let explicit_count = members.iter().filter(|track| track.explicit).count();
    let local_count = members.iter().filter(|track| track.is_local).count();
    let mean_available_markets = members
        .iter()
        .map(|track| f64::from(track.available_markets))
        .sum::<f64>()
        / size as f64;
    let kind_counts = members
        .iter()
        .filter_map(|track| track.album.kind)
        .counts();
    // First occurrence wins ties
    let dominant_album_kind = members
        .iter()
        .filter_map(|track| track.album.kind)
        .unique()
        .map(|kind| (kind, kind_counts[&kind]))
        .fold(None, |dominant: Option<(AlbumKind, usize)>, next| match dominant {
            Some(dominant) if dominant.1 >= next.1 => Some(dominant),
            _ => Some(next),
        });
    let top_tracks = members
        .iter()
        .sorted_by(|lhs, rhs| rhs.popularity.cmp(&lhs.popularity))
        .take(TOP_TRACKS_COUNT)
        .map(|track| track.id.clone())
        .collect();
    Some(ClusterSummary {
        label,
        size,
        popularity,
        duration_minutes,
        age_years,
        explicit_count,
        local_count,
        mean_available_markets,
        dominant_album_kind,
        top_tracks,
    })
}

/// Summarizes all clusters in ascending order of their labels.
///
/// Excluded tracks are not considered.
#[must_use]
pub fn summarize(
    tracks: &[Track],
    assignment: &Assignment,
    reference_year: YearType,
) -> Vec<ClusterSummary> {
    debug_assert_eq!(tracks.len(), assignment.len());
    tracks
        .iter()
        .zip(assignment.iter())
        .filter(|(_, (_, label))| !label.is_excluded())
        .map(|(track, (_, label))| (label, track))
        .into_group_map()
        .into_iter()
        .sorted_by_key(|(label, _)| *label)
        .filter_map(|(label, members)| summarize_cluster(label, &members, reference_year))
        .collect()
}
