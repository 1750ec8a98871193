// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Split saved tracks into playlists of similar tracks.
//!
//! Facade that re-exports the workspace crates.

pub use spotisplit_core as model;

#[cfg(feature = "json")]
pub use spotisplit_core_json as json;

#[cfg(feature = "usecases")]
pub use spotisplit_usecases as usecases;
