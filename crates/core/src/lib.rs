// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

// Importing all enum variants into a narrow, local scope is acceptable.
#![allow(clippy::enum_glob_use)]

pub mod audio;
pub mod cluster;
pub mod music;
pub mod util;

pub mod track;
pub use self::track::{Track, TrackId};

pub mod prelude {
    // Re-export trait methods from semval
    pub use semval::{IsValid, Validate as _};

    pub(crate) use semval::prelude::*;
}
