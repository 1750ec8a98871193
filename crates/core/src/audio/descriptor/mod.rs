// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Perceptual audio attributes as published by the streaming service's
//! audio analysis.

use std::fmt;

use crate::{
    music::{
        key::{Mode, PitchClass, PitchClassInvalidity},
        tempo::{TempoBpm, TempoBpmInvalidity},
    },
    prelude::*,
};

///////////////////////////////////////////////////////////////////////
// UnitScore
///////////////////////////////////////////////////////////////////////

pub type UnitScoreValue = f64;

/// A confidence or intensity in the closed interval [0.0, 1.0].
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct UnitScore(UnitScoreValue);

impl UnitScore {
    pub const MIN: Self = Self(0.0);
    pub const MAX: Self = Self(1.0);

    #[must_use]
    pub const fn new(value: UnitScoreValue) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> UnitScoreValue {
        let Self(value) = self;
        value
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnitScoreInvalidity {
    OutOfRange,
}

impl Validate for UnitScore {
    type Invalidity = UnitScoreInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                !(*self >= Self::MIN && *self <= Self::MAX),
                Self::Invalidity::OutOfRange,
            )
            .into()
    }
}

impl fmt::Display for UnitScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.value())
    }
}

///////////////////////////////////////////////////////////////////////
// Loudness
///////////////////////////////////////////////////////////////////////

pub type DecibelsValue = f64;

/// Average loudness relative to full scale, typically in the range
/// [-60 dB, 0 dB].
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct LoudnessDb(DecibelsValue);

impl LoudnessDb {
    pub const UNIT_OF_MEASURE: &'static str = "dB";

    #[must_use]
    pub const fn new(value: DecibelsValue) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> DecibelsValue {
        let Self(value) = self;
        value
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoudnessDbInvalidity {
    NotFinite,
}

impl Validate for LoudnessDb {
    type Invalidity = LoudnessDbInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(!self.value().is_finite(), Self::Invalidity::NotFinite)
            .into()
    }
}

impl fmt::Display for LoudnessDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} {}", self.value(), Self::UNIT_OF_MEASURE)
    }
}

///////////////////////////////////////////////////////////////////////
// AudioDescriptor
///////////////////////////////////////////////////////////////////////

/// Continuous audio attributes of a single track.
///
/// Each attribute is optional on its own. The analysis may be
/// incomplete or not available at all for some tracks, e.g. for
/// very recent releases.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AudioDescriptor {
    pub danceability: Option<UnitScore>,
    pub energy: Option<UnitScore>,
    pub speechiness: Option<UnitScore>,
    pub acousticness: Option<UnitScore>,
    pub instrumentalness: Option<UnitScore>,
    pub liveness: Option<UnitScore>,
    pub valence: Option<UnitScore>,
    pub tempo: Option<TempoBpm>,
    pub loudness: Option<LoudnessDb>,
    pub key: Option<PitchClass>,
    pub mode: Option<Mode>,

    /// Estimated number of beats per bar
    pub time_signature: Option<u8>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AudioDescriptorInvalidity {
    Danceability(UnitScoreInvalidity),
    Energy(UnitScoreInvalidity),
    Speechiness(UnitScoreInvalidity),
    Acousticness(UnitScoreInvalidity),
    Instrumentalness(UnitScoreInvalidity),
    Liveness(UnitScoreInvalidity),
    Valence(UnitScoreInvalidity),
    Tempo(TempoBpmInvalidity),
    Loudness(LoudnessDbInvalidity),
    Key(PitchClassInvalidity),
}

impl Validate for AudioDescriptor {
    type Invalidity = AudioDescriptorInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        use AudioDescriptorInvalidity::*;
        let Self {
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
            mode: _,
            time_signature: _,
        } = self;
        ValidationContext::new()
            .validate_with(danceability, Danceability)
            .validate_with(energy, Energy)
            .validate_with(speechiness, Speechiness)
            .validate_with(acousticness, Acousticness)
            .validate_with(instrumentalness, Instrumentalness)
            .validate_with(liveness, Liveness)
            .validate_with(valence, Valence)
            .validate_with(tempo, Tempo)
            .validate_with(loudness, Loudness)
            .validate_with(key, Key)
            .into()
    }
}
