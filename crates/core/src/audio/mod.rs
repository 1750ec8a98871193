// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use crate::prelude::*;

pub mod descriptor;

///////////////////////////////////////////////////////////////////////
// Duration
///////////////////////////////////////////////////////////////////////

pub type DurationInMilliseconds = f64;

pub const MILLIS_PER_MINUTE: DurationInMilliseconds = 60_000.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct DurationMs(DurationInMilliseconds);

impl DurationMs {
    #[must_use]
    pub const fn unit_of_measure() -> &'static str {
        "ms"
    }

    #[must_use]
    pub const fn new(inner: DurationInMilliseconds) -> Self {
        Self(inner)
    }

    #[must_use]
    pub const fn to_inner(self) -> DurationInMilliseconds {
        let Self(inner) = self;
        inner
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self(0_f64)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self <= Self::empty()
    }

    #[must_use]
    pub fn to_minutes(self) -> f64 {
        self.to_inner() / MILLIS_PER_MINUTE
    }
}

impl From<u64> for DurationMs {
    fn from(millis: u64) -> Self {
        Self(millis as DurationInMilliseconds)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DurationMsInvalidity {
    OutOfRange,
}

impl Validate for DurationMs {
    type Invalidity = DurationMsInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                !(self.0.is_finite() && *self >= Self::empty()),
                Self::Invalidity::OutOfRange,
            )
            .into()
    }
}

impl fmt::Display for DurationMs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_inner(), Self::unit_of_measure())
    }
}
