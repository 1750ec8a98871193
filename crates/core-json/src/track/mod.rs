// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use spotisplit_core::{
    TrackId,
    audio::DurationMs,
    track::Popularity,
    util::clock::YyyyMmDdDate,
};

use crate::prelude::*;

mod _core {
    pub(super) use spotisplit_core::track::{Track, album::*};
}

///////////////////////////////////////////////////////////////////////
// Album
///////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct Album {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// "album", "single", "compilation", or "ep"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_type: Option<String>,

    /// Either "YYYY", "YYYY-MM", or "YYYY-MM-DD"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl From<Album> for _core::Album {
    fn from(from: Album) -> Self {
        let Album {
            name,
            album_type,
            release_date,
        } = from;
        let kind = album_type.as_deref().and_then(|album_type| {
            album_type
                .parse::<_core::Kind>()
                .map_err(|_| log::debug!("Unknown album type \"{album_type}\""))
                .ok()
        });
        let release_date = release_date.as_deref().and_then(|release_date| {
            release_date
                .parse::<YyyyMmDdDate>()
                .map_err(|_| log::debug!("Invalid release date \"{release_date}\""))
                .ok()
        });
        Self {
            name,
            kind,
            release_date,
        }
    }
}

///////////////////////////////////////////////////////////////////////
// Track
///////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct Track {
    /// Missing for local files
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub artists: Vec<Artist>,

    #[serde(default)]
    pub album: Option<Album>,

    #[serde(default)]
    pub duration_ms: u64,

    #[serde(default)]
    pub popularity: u8,

    #[serde(default)]
    pub explicit: bool,

    #[serde(default)]
    pub is_local: bool,

    #[serde(default)]
    pub disc_number: Option<u32>,

    #[serde(default)]
    pub track_number: Option<u32>,

    /// ISO 3166-1 alpha-2 country codes
    #[serde(default)]
    pub available_markets: Vec<String>,

    #[serde(default)]
    pub uri: Option<String>,
}

impl Track {
    /// Converts into a track record.
    ///
    /// Returns `None` for tracks without an identifier.
    #[must_use]
    pub fn into_core(self) -> Option<_core::Track> {
        let Self {
            id,
            name,
            artists,
            album,
            duration_ms,
            popularity,
            explicit,
            is_local,
            disc_number,
            track_number,
            available_markets,
            uri,
        } = self;
        let id = TrackId::new(id?);
        if id.is_empty() {
            return None;
        }
        let popularity = Popularity::new(popularity.min(Popularity::MAX.value()));
        Some(_core::Track {
            id,
            name,
            artists: artists.into_iter().map(|artist| artist.name).collect(),
            album: album.map(Into::into).unwrap_or_default(),
            duration: DurationMs::from(duration_ms),
            popularity,
            explicit,
            is_local,
            disc_number,
            track_number,
            available_markets: u32::try_from(available_markets.len()).unwrap_or(u32::MAX),
            uri,
        })
    }
}

/// An entry of the user's saved tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct SavedTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<String>,

    /// Missing for unavailable or removed content
    #[serde(default)]
    pub track: Option<Track>,
}

/// Converts saved tracks into track records.
///
/// Entries without a track or without an identifier are skipped.
pub fn saved_tracks_into_core(
    saved_tracks: impl IntoIterator<Item = SavedTrack>,
) -> impl Iterator<Item = _core::Track> {
    saved_tracks
        .into_iter()
        .filter_map(|saved_track| saved_track.track)
        .filter_map(Track::into_core)
}
