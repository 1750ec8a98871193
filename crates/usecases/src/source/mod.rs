// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Retrieving the batch of tracks.

use std::{collections::HashSet, sync::LazyLock};

use regex::Regex;

use spotisplit_core::{Track, TrackId};

use crate::{Error, Result, feature::AudioDescriptors};

/// Provides the saved tracks of the current user.
pub trait TrackSource {
    /// Fetches all saved tracks.
    ///
    /// Pagination is handled by the implementation.
    fn fetch_tracks(&mut self) -> anyhow::Result<Vec<Track>>;

    /// Fetches the audio descriptors for the given tracks.
    ///
    /// Tracks without a descriptor are omitted from the result.
    fn fetch_audio_descriptors(
        &mut self,
        track_ids: &[TrackId],
    ) -> anyhow::Result<AudioDescriptors>;
}

/// A complete batch of tracks with optional descriptors.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    pub tracks: Vec<Track>,
    pub descriptors: AudioDescriptors,
}

/// Removes tracks without an identifier and all but the first
/// occurrence of each identifier.
#[must_use]
pub fn dedup_tracks(tracks: impl IntoIterator<Item = Track>) -> Vec<Track> {
    let mut track_ids = HashSet::new();
    tracks
        .into_iter()
        .filter(|track| {
            if track.id.is_empty() {
                log::debug!("Skipping track \"{}\" without identifier", track.name);
                return false;
            }
            if track_ids.insert(track.id.clone()) {
                true
            } else {
                log::debug!("Skipping duplicate track {}", track.id);
                false
            }
        })
        .collect()
}

/// Fetches the batch of tracks and, if requested, their descriptors.
///
/// Any failure of the source is reported as [`Error::Source`].
pub fn load_batch<S>(source: &mut S, with_descriptors: bool) -> Result<Batch>
where
    S: TrackSource + ?Sized,
{
    let fetched = source.fetch_tracks().map_err(Error::Source)?;
    let fetched_count = fetched.len();
    let tracks = dedup_tracks(fetched);
    log::info!(
        "Fetched {count} track(s), ignored {ignored}",
        count = tracks.len(),
        ignored = fetched_count - tracks.len(),
    );
    let descriptors = if with_descriptors {
        let track_ids = tracks
            .iter()
            .map(|track| track.id.clone())
            .collect::<Vec<_>>();
        let descriptors = source
            .fetch_audio_descriptors(&track_ids)
            .map_err(Error::Source)?;
        log::info!(
            "Fetched audio descriptors for {count} of {total} track(s)",
            count = descriptors.len(),
            total = tracks.len(),
        );
        descriptors
    } else {
        AudioDescriptors::new()
    };
    Ok(Batch {
        tracks,
        descriptors,
    })
}

static PLAYLIST_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"playlist/([a-zA-Z0-9]+)").expect("valid regex"));

/// Extracts the playlist identifier from either a URL or a bare identifier.
#[must_use]
pub fn extract_playlist_id(url_or_id: &str) -> &str {
    PLAYLIST_ID_REGEX
        .captures(url_or_id)
        .and_then(|captures| captures.get(1))
        .map_or_else(|| url_or_id.trim(), |id| id.as_str())
}
