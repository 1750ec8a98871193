// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::{
    prelude::*,
    util::clock::{YearType, YyyyMmDdDate, YyyyMmDdDateInvalidity},
};

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::Display, strum::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Kind {
    Album,
    Single,
    Compilation,
    Ep,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Album {
    pub name: Option<String>,

    pub kind: Option<Kind>,

    /// The release date with varying precision
    pub release_date: Option<YyyyMmDdDate>,
}

impl Album {
    #[must_use]
    pub fn release_year(&self) -> Option<YearType> {
        self.release_date.map(YyyyMmDdDate::year)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlbumInvalidity {
    ReleaseDate(YyyyMmDdDateInvalidity),
}

impl Validate for Album {
    type Invalidity = AlbumInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .validate_with(&self.release_date, Self::Invalidity::ReleaseDate)
            .into()
    }
}
