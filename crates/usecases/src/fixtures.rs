// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use spotisplit_core::{
    Track, TrackId,
    audio::{
        DurationMs,
        descriptor::{AudioDescriptor, UnitScore},
    },
    music::tempo::TempoBpm,
    track::{
        Popularity,
        album::{Album, Kind as AlbumKind},
    },
    util::clock::YyyyMmDdDate,
};

use crate::feature::AudioDescriptors;

pub(crate) fn init_logger() {
    env_logger::builder().is_test(true).try_init().ok();
}

pub(crate) fn track(id: &str) -> Track {
    Track {
        id: TrackId::new(id),
        name: format!("Track {id}"),
        artists: vec!["Artist".to_owned()],
        album: Album {
            name: Some("Album".to_owned()),
            kind: Some(AlbumKind::Album),
            release_date: Some(YyyyMmDdDate::from_year(2014)),
        },
        duration: DurationMs::new(180_000.0),
        popularity: Popularity::new(50),
        disc_number: Some(1),
        track_number: Some(1),
        available_markets: 80,
        uri: Some(format!("spotify:track:{id}")),
        ..Default::default()
    }
}

pub(crate) fn descriptor(
    danceability: f64,
    energy: f64,
    acousticness: f64,
    tempo: f64,
) -> AudioDescriptor {
    AudioDescriptor {
        danceability: Some(UnitScore::new(danceability)),
        energy: Some(UnitScore::new(energy)),
        acousticness: Some(UnitScore::new(acousticness)),
        tempo: Some(TempoBpm::new(tempo)),
        ..Default::default()
    }
}

/// Tracks with descriptors that form three well separated groups.
pub(crate) fn separable_audio_batch(count: usize) -> (Vec<Track>, AudioDescriptors) {
    const CENTERS: [(f64, f64, f64, f64); 3] = [
        (0.1, 0.1, 0.9, 70.0),
        (0.5, 0.5, 0.5, 120.0),
        (0.9, 0.9, 0.1, 170.0),
    ];
    let tracks = (0..count)
        .map(|index| track(&format!("t{index:02}")))
        .collect::<Vec<_>>();
    let descriptors = tracks
        .iter()
        .enumerate()
        .map(|(index, track)| {
            let (danceability, energy, acousticness, tempo) = CENTERS[index % CENTERS.len()];
            let jitter = (index / CENTERS.len()) as f64 * 0.01;
            (
                track.id.clone(),
                descriptor(
                    danceability + jitter,
                    energy - jitter,
                    acousticness + jitter,
                    tempo + jitter * 100.0,
                ),
            )
        })
        .collect();
    (tracks, descriptors)
}
