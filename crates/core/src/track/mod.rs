// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod album;

use std::fmt;

use derive_more::Display;
use smol_str::SmolStr;

use self::album::{Album, AlbumInvalidity};
use crate::{
    audio::{DurationMs, DurationMsInvalidity},
    prelude::*,
};

///////////////////////////////////////////////////////////////////////
// TrackId
///////////////////////////////////////////////////////////////////////

/// Identifier of a track as assigned by the streaming service.
///
/// Unique within a batch of tracks.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[repr(transparent)]
pub struct TrackId(SmolStr);

impl TrackId {
    #[must_use]
    pub fn new(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for TrackId {
    fn from(from: &str) -> Self {
        Self::new(from)
    }
}

impl From<String> for TrackId {
    fn from(from: String) -> Self {
        Self::new(from)
    }
}

impl AsRef<str> for TrackId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackIdInvalidity {
    Empty,
}

impl Validate for TrackId {
    type Invalidity = TrackIdInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(self.is_empty(), Self::Invalidity::Empty)
            .into()
    }
}

///////////////////////////////////////////////////////////////////////
// Popularity
///////////////////////////////////////////////////////////////////////

pub type PopularityValue = u8;

/// Relative popularity of a track in the range [0, 100].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Popularity(PopularityValue);

impl Popularity {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(100);

    #[must_use]
    pub const fn new(value: PopularityValue) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> PopularityValue {
        let Self(value) = self;
        value
    }

    /// The fraction of [`Self::MAX`].
    #[must_use]
    pub fn to_fraction(self) -> f64 {
        f64::from(self.value()) / f64::from(Self::MAX.value())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PopularityInvalidity {
    OutOfRange,
}

impl Validate for Popularity {
    type Invalidity = PopularityInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(*self > Self::MAX, Self::Invalidity::OutOfRange)
            .into()
    }
}

impl fmt::Display for Popularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

///////////////////////////////////////////////////////////////////////
// Track
///////////////////////////////////////////////////////////////////////

/// A saved track as retrieved from the streaming service.
///
/// Records are immutable after retrieval.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    pub id: TrackId,

    pub name: String,

    /// Artist names in credited order
    pub artists: Vec<String>,

    pub album: Album,

    pub duration: DurationMs,

    pub popularity: Popularity,

    pub explicit: bool,

    /// Local files are not hosted by the streaming service.
    pub is_local: bool,

    /// 1-based disc number, if known
    pub disc_number: Option<u32>,

    /// 1-based position on the disc, if known
    pub track_number: Option<u32>,

    /// Number of markets in which the track is available
    pub available_markets: u32,

    /// Playable URI, e.g. `spotify:track:<id>`
    pub uri: Option<String>,
}

impl Track {
    /// Artist names joined for display.
    #[must_use]
    pub fn artist_names(&self) -> String {
        self.artists.join(", ")
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackInvalidity {
    Id(TrackIdInvalidity),
    Album(AlbumInvalidity),
    Duration(DurationMsInvalidity),
    Popularity(PopularityInvalidity),
}

impl Validate for Track {
    type Invalidity = TrackInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .validate_with(&self.id, Self::Invalidity::Id)
            .validate_with(&self.album, Self::Invalidity::Album)
            .validate_with(&self.duration, Self::Invalidity::Duration)
            .validate_with(&self.popularity, Self::Invalidity::Popularity)
            .into()
    }
}

#[cfg(test)]
mod tests;
