// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::fmt;

use crate::prelude::*;

pub type PitchClassValue = u8;

/// Tonic of a key in standard pitch class notation.
///
/// 0 = C, 1 = C\u{266F}/D\u{266D}, 2 = D, ..., 11 = B
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PitchClass(PitchClassValue);

impl PitchClass {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(11);

    const NAMES: [&'static str; 12] = [
        "C", "C\u{266F}", "D", "E\u{266D}", "E", "F", "F\u{266F}", "G", "A\u{266D}", "A",
        "B\u{266D}", "B",
    ];

    #[must_use]
    pub const fn new(value: PitchClassValue) -> Self {
        Self(value)
    }

    /// Decode the signed notation of analysis services that use -1
    /// when no key has been detected.
    #[must_use]
    pub fn from_signed(value: i32) -> Option<Self> {
        PitchClassValue::try_from(value).ok().map(Self)
    }

    #[must_use]
    pub const fn value(self) -> PitchClassValue {
        let Self(value) = self;
        value
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        <Self as IsValid>::is_valid(self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PitchClassInvalidity {
    OutOfRange,
}

impl Validate for PitchClass {
    type Invalidity = PitchClassInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(*self > Self::MAX, Self::Invalidity::OutOfRange)
            .into()
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Self::NAMES.get(usize::from(self.value())) {
            Some(name) => f.write_str(name),
            None => write!(f, "?{}", self.value()),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::FromRepr, strum::Display)]
#[repr(u8)]
pub enum Mode {
    #[strum(to_string = "minor")]
    Minor = 0,

    #[strum(to_string = "major")]
    Major = 1,
}
