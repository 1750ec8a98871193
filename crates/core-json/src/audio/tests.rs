// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use serde_json::json;

use super::*;

#[test]
fn audio_features_into_core() {
    let features: AudioFeatures = serde_json::from_value(json!({
        "danceability": 0.735,
        "energy": 0.578,
        "key": 5,
        "loudness": -11.84,
        "mode": 0,
        "speechiness": 0.0461,
        "acousticness": 0.514,
        "instrumentalness": 0.0902,
        "liveness": 0.159,
        "valence": 0.636,
        "tempo": 98.002,
        "type": "audio_features",
        "id": "06AKEBrKUckW0KREUWRnvT",
        "uri": "spotify:track:06AKEBrKUckW0KREUWRnvT",
        "duration_ms": 255_349,
        "time_signature": 4,
    }))
    .unwrap();
    let (track_id, descriptor) = features.into_core().unwrap();
    assert_eq!("06AKEBrKUckW0KREUWRnvT", track_id.as_str());
    assert!(descriptor.is_valid());
    assert_eq!(Some(0.735), descriptor.danceability.map(_core::UnitScore::value));
    assert_eq!(Some(98.002), descriptor.tempo.map(TempoBpm::value));
    assert_eq!(Some(5), descriptor.key.map(PitchClass::value));
    assert_eq!(Some(Mode::Minor), descriptor.mode);
    assert_eq!(Some(4), descriptor.time_signature);
}

#[test]
fn undetected_key() {
    let (_, descriptor) = AudioFeatures {
        id: Some("a".to_owned()),
        key: Some(-1),
        ..Default::default()
    }
    .into_core()
    .unwrap();
    assert!(descriptor.key.is_none());
    assert!(descriptor.danceability.is_none());
}

#[test]
fn skip_null_entries() {
    let list: AudioFeaturesList = serde_json::from_value(json!({
        "audio_features": [
            { "id": "a", "energy": 0.5 },
            null,
            { "energy": 0.7 },
            { "id": "b", "tempo": 120.0 },
        ],
    }))
    .unwrap();
    let descriptors = list.into_core().collect::<Vec<_>>();
    assert_eq!(
        vec!["a", "b"],
        descriptors
            .iter()
            .map(|(track_id, _)| track_id.as_str())
            .collect::<Vec<_>>()
    );
}
