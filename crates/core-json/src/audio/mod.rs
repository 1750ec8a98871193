// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use semval::IsValid as _;

use spotisplit_core::{
    TrackId,
    music::{
        key::{Mode, PitchClass},
        tempo::TempoBpm,
    },
};

use crate::prelude::*;

mod _core {
    pub(super) use spotisplit_core::audio::descriptor::*;
}

/// Audio features of a single track.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct AudioFeatures {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub danceability: Option<f64>,

    #[serde(default)]
    pub energy: Option<f64>,

    #[serde(default)]
    pub speechiness: Option<f64>,

    #[serde(default)]
    pub acousticness: Option<f64>,

    #[serde(default)]
    pub instrumentalness: Option<f64>,

    #[serde(default)]
    pub liveness: Option<f64>,

    #[serde(default)]
    pub valence: Option<f64>,

    #[serde(default)]
    pub tempo: Option<f64>,

    #[serde(default)]
    pub loudness: Option<f64>,

    /// Pitch class or -1 if no key was detected
    #[serde(default)]
    pub key: Option<i32>,

    /// 0 = minor, 1 = major
    #[serde(default)]
    pub mode: Option<u8>,

    #[serde(default)]
    pub time_signature: Option<u8>,
}

impl AudioFeatures {
    /// Converts into a descriptor keyed by its track.
    ///
    /// Returns `None` without an identifier. Attributes that are out of
    /// range are kept, they are rejected later when extracting features.
    #[must_use]
    pub fn into_core(self) -> Option<(TrackId, _core::AudioDescriptor)> {
        let Self {
            id,
            danceability,
            energy,
            speechiness,
            acousticness,
            instrumentalness,
            liveness,
            valence,
            tempo,
            loudness,
            key,
            mode,
            time_signature,
        } = self;
        let track_id = TrackId::new(id?);
        if track_id.is_empty() {
            return None;
        }
        let descriptor = _core::AudioDescriptor {
            danceability: danceability.map(_core::UnitScore::new),
            energy: energy.map(_core::UnitScore::new),
            speechiness: speechiness.map(_core::UnitScore::new),
            acousticness: acousticness.map(_core::UnitScore::new),
            instrumentalness: instrumentalness.map(_core::UnitScore::new),
            liveness: liveness.map(_core::UnitScore::new),
            valence: valence.map(_core::UnitScore::new),
            tempo: tempo.map(TempoBpm::new),
            loudness: loudness.map(_core::LoudnessDb::new),
            key: key.and_then(PitchClass::from_signed),
            mode: mode.and_then(Mode::from_repr),
            time_signature,
        };
        if !descriptor.is_valid() {
            log::debug!("Audio features of track {track_id} are out of range");
        }
        Some((track_id, descriptor))
    }
}

/// Response of the batch request for audio features.
///
/// Contains `null` entries for unknown tracks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct AudioFeaturesList {
    #[serde(default)]
    pub audio_features: Vec<Option<AudioFeatures>>,
}

impl AudioFeaturesList {
    pub fn into_core(self) -> impl Iterator<Item = (TrackId, _core::AudioDescriptor)> {
        self.audio_features
            .into_iter()
            .flatten()
            .filter_map(AudioFeatures::into_core)
    }
}

#[cfg(test)]
mod tests;
