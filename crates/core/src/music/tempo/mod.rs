// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use crate::prelude::*;

pub type TempoBpmValue = f64;

#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct TempoBpm(TempoBpmValue);

impl TempoBpm {
    pub const UNIT_OF_MEASURE: &'static str = "bpm";

    pub const ZERO: Self = Self(0.0);
    pub const MAX: Self = Self(TempoBpmValue::MAX);

    #[must_use]
    pub const fn new(value: TempoBpmValue) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> TempoBpmValue {
        let Self(value) = self;
        value
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        <Self as IsValid>::is_valid(self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TempoBpmInvalidity {
    OutOfRange,
}

// Tempo detection reports 0 bpm for tracks without a detectable beat.
impl Validate for TempoBpm {
    type Invalidity = TempoBpmInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(
                !(*self >= Self::ZERO && *self <= Self::MAX),
                Self::Invalidity::OutOfRange,
            )
            .into()
    }
}

impl fmt::Display for TempoBpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{value} {unit}",
            value = self.value(),
            unit = Self::UNIT_OF_MEASURE
        )
    }
}
