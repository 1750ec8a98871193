// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Numeric feature schemas.
//!
//! A schema fixes the order and the width of the feature vectors for
//! the lifetime of a run.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

use spotisplit_core::{TrackId, audio::descriptor::AudioDescriptor};

pub mod extract;
pub mod space;

/// Audio descriptors keyed by track.
///
/// Tracks without an entry simply have no descriptor.
pub type AudioDescriptors = HashMap<TrackId, AudioDescriptor>;

/// Columns of the audio schema, all of them required.
pub const AUDIO_COLUMNS: [&str; 4] = ["danceability", "energy", "acousticness", "tempo"];

/// Primary columns of the metadata schema.
pub const METADATA_COLUMNS: [&str; 15] = [
    "duration_minutes",
    "popularity_normalized",
    "explicit",
    "is_local",
    "track_position_ratio",
    "market_coverage",
    "age_normalized",
    "album_type_numeric",
    "track_number",
    "disc_number",
    "available_markets",
    "duration_ms",
    "popularity",
    "release_year",
    "age_years",
];

/// The product of two primary columns, appended after all primary columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interaction {
    pub name: &'static str,
    pub lhs: usize,
    pub rhs: usize,
}

const DURATION_MINUTES: usize = 0;
const POPULARITY_NORMALIZED: usize = 1;
const EXPLICIT: usize = 2;
const MARKET_COVERAGE: usize = 5;
const AGE_NORMALIZED: usize = 6;

pub const METADATA_INTERACTIONS: [Interaction; 5] = [
    Interaction {
        name: "popularity_duration",
        lhs: POPULARITY_NORMALIZED,
        rhs: DURATION_MINUTES,
    },
    Interaction {
        name: "age_popularity",
        lhs: AGE_NORMALIZED,
        rhs: POPULARITY_NORMALIZED,
    },
    Interaction {
        name: "explicit_popularity",
        lhs: EXPLICIT,
        rhs: POPULARITY_NORMALIZED,
    },
    Interaction {
        name: "market_popularity",
        lhs: MARKET_COVERAGE,
        rhs: POPULARITY_NORMALIZED,
    },
    Interaction {
        name: "duration_age",
        lhs: DURATION_MINUTES,
        rhs: AGE_NORMALIZED,
    },
];

const_assert_eq!(20, METADATA_COLUMNS.len() + METADATA_INTERACTIONS.len());

/// Selects the feature set and the missing-value policy of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Schema {
    /// Perceptual audio attributes.
    ///
    /// Tracks without all required attributes are excluded.
    #[default]
    Audio,

    /// Derived track metadata plus interaction features.
    ///
    /// Never excludes any track.
    Metadata,
}

impl Schema {
    #[must_use]
    pub const fn primary_columns(self) -> &'static [&'static str] {
        match self {
            Self::Audio => &AUDIO_COLUMNS,
            Self::Metadata => &METADATA_COLUMNS,
        }
    }

    #[must_use]
    pub const fn interactions(self) -> &'static [Interaction] {
        match self {
            Self::Audio => &[],
            Self::Metadata => &METADATA_INTERACTIONS,
        }
    }

    /// Total number of columns including interactions.
    #[must_use]
    pub const fn width(self) -> usize {
        self.primary_columns().len() + self.interactions().len()
    }

    /// All column names in matrix order.
    pub fn column_names(self) -> impl Iterator<Item = &'static str> {
        self.primary_columns()
            .iter()
            .copied()
            .chain(self.interactions().iter().map(|interaction| interaction.name))
    }

    #[must_use]
    pub const fn excludes_incomplete(self) -> bool {
        matches!(self, Self::Audio)
    }
}
