// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn empty_track_id_is_invalid() {
    assert!(!TrackId::default().is_valid());
    assert!(!TrackId::new("  ").is_valid());
    assert!(TrackId::new("4uLU6hMCjMI75M1A2tKUQC").is_valid());
}

#[test]
fn popularity_fraction() {
    assert!((Popularity::new(0).to_fraction() - 0.0).abs() < f64::EPSILON);
    assert!((Popularity::new(42).to_fraction() - 0.42).abs() < f64::EPSILON);
    assert!((Popularity::MAX.to_fraction() - 1.0).abs() < f64::EPSILON);
    assert!(!Popularity::new(101).is_valid());
}

#[test]
fn artist_names_are_joined_in_credited_order() {
    let track = Track {
        artists: vec!["Daft Punk".to_owned(), "Pharrell Williams".to_owned()],
        ..Default::default()
    };
    assert_eq!("Daft Punk, Pharrell Williams", track.artist_names());
}

#[test]
fn validate_track() {
    let track = Track {
        id: "4uLU6hMCjMI75M1A2tKUQC".into(),
        duration: DurationMs::new(213_000.0),
        popularity: Popularity::new(77),
        ..Default::default()
    };
    assert!(track.is_valid());
    assert!(
        !Track {
            duration: DurationMs::new(-1.0),
            ..track.clone()
        }
        .is_valid()
    );
    assert!(
        !Track {
            id: TrackId::default(),
            ..track
        }
        .is_valid()
    );
}
