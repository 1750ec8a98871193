// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use jiff::civil::Date;
use semval::prelude::*;

// 4-digit year
pub type YearType = i16;

// 2-digit month
pub type MonthType = i8;

// 2-digit day of month
pub type DayOfMonthType = i8;

pub const YEAR_MIN: YearType = 1;
pub const YEAR_MAX: YearType = 9999;

pub type YyyyMmDdDateValue = i32;

/// 8-digit year+month+day (YYYYMMDD)
///
/// Release dates are published with varying precision, i.e. only the
/// year or year and month. Missing components are encoded as 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct YyyyMmDdDate(YyyyMmDdDateValue);

impl YyyyMmDdDate {
    pub const MIN: Self = Self(10_000);

    pub const MAX: Self = Self(99_991_231);

    #[must_use]
    pub const fn new_unchecked(value: YyyyMmDdDateValue) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> YyyyMmDdDateValue {
        let Self(value) = self;
        value
    }

    #[must_use]
    pub const fn year(self) -> YearType {
        (self.0 / 10_000) as YearType
    }

    #[must_use]
    pub const fn month(self) -> MonthType {
        ((self.0 % 10_000) / 100) as MonthType
    }

    #[must_use]
    pub const fn day_of_month(self) -> DayOfMonthType {
        (self.0 % 100) as DayOfMonthType
    }

    #[must_use]
    pub fn from_date(from: Date) -> Self {
        Self(
            YyyyMmDdDateValue::from(from.year()) * 10_000
                + YyyyMmDdDateValue::from(from.month()) * 100
                + YyyyMmDdDateValue::from(from.day()),
        )
    }

    #[must_use]
    pub fn from_year(year: YearType) -> Self {
        Self(YyyyMmDdDateValue::from(year) * 10_000)
    }

    #[must_use]
    pub fn from_year_month(year: YearType, month: MonthType) -> Self {
        Self(YyyyMmDdDateValue::from(year) * 10_000 + YyyyMmDdDateValue::from(month) * 100)
    }

    #[must_use]
    pub fn is_year(self) -> bool {
        Self::from_year(self.year()) == self
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        <Self as IsValid>::is_valid(self)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum YyyyMmDdDateInvalidity {
    Min,
    Max,
    MonthOutOfRange,
    DayOfMonthOutOfRange,
    DayWithoutMonth,
    Invalid,
}

impl Validate for YyyyMmDdDate {
    type Invalidity = YyyyMmDdDateInvalidity;

    fn validate(&self) -> ValidationResult<Self::Invalidity> {
        ValidationContext::new()
            .invalidate_if(*self < Self::MIN, Self::Invalidity::Min)
            .invalidate_if(*self > Self::MAX, Self::Invalidity::Max)
            .invalidate_if(
                self.month() < 0 || self.month() > 12,
                Self::Invalidity::MonthOutOfRange,
            )
            .invalidate_if(
                self.day_of_month() < 0 || self.day_of_month() > 31,
                Self::Invalidity::DayOfMonthOutOfRange,
            )
            .invalidate_if(
                self.month() < 1 && self.day_of_month() > 0,
                Self::Invalidity::DayWithoutMonth,
            )
            .invalidate_if(
                self.month() >= 1
                    && self.month() <= 12
                    && self.day_of_month() >= 1
                    && self.day_of_month() <= 31
                    && Date::new(self.year(), self.month(), self.day_of_month()).is_err(),
                Self::Invalidity::Invalid,
            )
            .into()
    }
}

impl fmt::Display for YyyyMmDdDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_year() {
            return write!(f, "{:04}", self.year());
        }
        if self.day_of_month() == 0 {
            return write!(f, "{:04}-{:02}", self.year(), self.month());
        }
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year(),
            self.month(),
            self.day_of_month()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("invalid date")]
pub struct ParseDateError;

/// Parses `YYYY`, `YYYY-MM`, or `YYYY-MM-DD`.
///
/// Dates that fail validation are rejected, e.g. the placeholder
/// `0000` that is used for unknown release dates.
impl FromStr for YyyyMmDdDate {
    type Err = ParseDateError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut components = input.trim().splitn(3, '-');
        let year = components
            .next()
            .filter(|year| year.len() == 4)
            .and_then(|year| year.parse::<YearType>().ok())
            .ok_or(ParseDateError)?;
        let month = components
            .next()
            .map(str::parse::<MonthType>)
            .transpose()
            .map_err(|_| ParseDateError)?
            .unwrap_or(0);
        let day_of_month = components
            .next()
            .map(str::parse::<DayOfMonthType>)
            .transpose()
            .map_err(|_| ParseDateError)?
            .unwrap_or(0);
        let date = Self::new_unchecked(
            YyyyMmDdDateValue::from(year) * 10_000
                + YyyyMmDdDateValue::from(month) * 100
                + YyyyMmDdDateValue::from(day_of_month),
        );
        if !date.is_valid() {
            return Err(ParseDateError);
        }
        Ok(date)
    }
}

///////////////////////////////////////////////////////////////////////
// Tests
///////////////////////////////////////////////////////////////////////
