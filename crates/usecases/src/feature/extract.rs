// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use semval::IsValid as _;

use spotisplit_core::{
    Track,
    audio::{
        DurationMs,
        descriptor::{AudioDescriptor, UnitScore},
    },
    track::album::Kind as AlbumKind,
    util::clock::YearType,
};

use super::Schema;
use crate::InvalidInput;

pub type FeatureValue = f64;

/// Marks an absent audio attribute inside a [`FeatureVector`].
///
/// Never reaches a feature matrix, incomplete vectors are excluded
/// before.
pub const MISSING_AUDIO_VALUE: FeatureValue = FeatureValue::NAN;

/// The release year that is assumed if unknown and from which the
/// age of a track is measured.
pub const DEFAULT_REFERENCE_YEAR: YearType = 2024;

const MAX_MARKETS: FeatureValue = 100.0;

const MAX_AGE_YEARS: FeatureValue = 50.0;

/// The primary features of a single track in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<FeatureValue>);

impl FeatureVector {
    #[must_use]
    pub fn as_slice(&self) -> &[FeatureValue] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that no value is [`MISSING_AUDIO_VALUE`].
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.iter().all(|value| !value.is_nan())
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<FeatureValue> {
        self.0
    }
}

/// Ordinal encoding of the album type.
#[must_use]
pub const fn album_kind_ordinal(kind: Option<AlbumKind>) -> FeatureValue {
    match kind {
        Some(AlbumKind::Album) => 3.0,
        Some(AlbumKind::Compilation) => 2.0,
        Some(AlbumKind::Ep) => 1.5,
        Some(AlbumKind::Single) | None => 1.0,
    }
}

/// Extracts the primary features of a track.
///
/// Audio attributes that are either missing or out of range are
/// substituted with [`MISSING_AUDIO_VALUE`]. Derived metadata is
/// always available, an invalid duration counts as 0.
pub fn extract_features(
    schema: Schema,
    track: &Track,
    descriptor: Option<&AudioDescriptor>,
    reference_year: YearType,
) -> Result<FeatureVector, InvalidInput> {
    if track.id.is_empty() {
        return Err(InvalidInput::EmptyTrackId);
    }
    let values = match schema {
        Schema::Audio => audio_features(descriptor),
        Schema::Metadata => metadata_features(track, reference_year),
    };
    debug_assert_eq!(schema.primary_columns().len(), values.len());
    Ok(FeatureVector(values))
}

fn unit_score_value(score: Option<UnitScore>) -> FeatureValue {
    score
        .filter(UnitScore::is_valid)
        .map_or(MISSING_AUDIO_VALUE, UnitScore::value)
}

fn audio_features(descriptor: Option<&AudioDescriptor>) -> Vec<FeatureValue> {
    let Some(descriptor) = descriptor else {
        return vec![MISSING_AUDIO_VALUE; super::AUDIO_COLUMNS.len()];
    };
    let tempo = descriptor
        .tempo
        .filter(|tempo| tempo.is_valid())
        .map_or(MISSING_AUDIO_VALUE, |tempo| tempo.value());
    vec![
        unit_score_value(descriptor.danceability),
        unit_score_value(descriptor.energy),
        unit_score_value(descriptor.acousticness),
        tempo,
    ]
}

fn metadata_features(track: &Track, reference_year: YearType) -> Vec<FeatureValue> {
    // Negative or non-finite durations would leak into the matrix
    let duration = Some(track.duration)
        .filter(|duration| duration.is_valid())
        .unwrap_or_else(DurationMs::empty);
    let duration_ms = duration.to_inner();
    let duration_minutes = duration.to_minutes();
    let popularity = FeatureValue::from(track.popularity.value());
    let popularity_normalized = track.popularity.to_fraction();
    let explicit = FeatureValue::from(u8::from(track.explicit));
    let is_local = FeatureValue::from(u8::from(track.is_local));
    let track_number = FeatureValue::from(track.track_number.unwrap_or_default());
    let disc_number = FeatureValue::from(track.disc_number.unwrap_or_default());
    let track_position_ratio = track_number
        / FeatureValue::from(track.disc_number.filter(|&disc| disc > 0).unwrap_or(1));
    let available_markets = FeatureValue::from(track.available_markets);
    let market_coverage = available_markets / MAX_MARKETS;
    let release_year = track.album.release_year().unwrap_or(reference_year);
    let age_years = FeatureValue::from(reference_year) - FeatureValue::from(release_year);
    let age_normalized = age_years / MAX_AGE_YEARS;
    let album_type_numeric = album_kind_ordinal(track.album.kind);
    vec![
        duration_minutes,
        popularity_normalized,
        explicit,
        is_local,
        track_position_ratio,
        market_coverage,
        age_normalized,
        album_type_numeric,
        track_number,
        disc_number,
        available_markets,
        duration_ms,
        popularity,
        FeatureValue::from(release_year),
        age_years,
    ]
}
